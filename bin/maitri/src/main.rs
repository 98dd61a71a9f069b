// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maitri::{
    commands::{analyze_files, user_history},
    config::{load_config, MaitriConfig},
    http::build_router,
    telemetry::init_tracing,
    AppState,
};
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(name = "maitri", about = "Multimodal emotion monitoring and crew support service")]
struct Cli {
    /// Configuration file; defaults to ./maitri.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP service.
    Serve,
    /// Analyze one frame and one voice clip from disk.
    Analyze {
        #[arg(long)]
        frame: PathBuf,
        #[arg(long)]
        voice: PathBuf,
        #[arg(long)]
        user: Option<String>,
    },
    /// Print the most recent saved sessions for a user.
    History {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(cfg.logging.json);

    let state = AppState::from_config(&cfg);
    match cli.cmd.unwrap_or(Command::Serve) {
        Command::Serve => run_server(&cfg, state).await,
        Command::Analyze { frame, voice, user } => {
            analyze_command(&state, &frame, &voice, user.as_deref()).await
        }
        Command::History { user, limit } => history_command(&state, user.as_deref(), limit).await,
    }
}

async fn run_server(cfg: &MaitriConfig, state: AppState) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .with_context(|| format!("binding {}:{}", cfg.server.host, cfg.server.port))?;
    info!(addr = %listener.local_addr()?, "MAITRI listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn analyze_command(
    state: &AppState,
    frame: &Path,
    voice: &Path,
    user: Option<&str>,
) -> Result<()> {
    let analysis = analyze_files(state, frame, voice, user).await?;
    println!("{}", serde_json::to_string_pretty(&analysis.response)?);
    Ok(())
}

async fn history_command(state: &AppState, user: Option<&str>, limit: Option<usize>) -> Result<()> {
    let sessions = user_history(state, user, limit).await?;
    println!("{}", serde_json::to_string_pretty(&sessions)?);
    Ok(())
}
