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

//! Service configuration: built-in defaults, then `maitri.toml` (or the
//! file given on the command line), then `MAITRI__SECTION__KEY` variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct MaitriConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    pub user_id: String,
    pub history_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub json: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            user_id: "astronaut_1".to_string(),
            history_limit: 10,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<MaitriConfig, ConfigError> {
    load_layers(path, maitri_env())
}

fn maitri_env() -> Environment {
    Environment::with_prefix("MAITRI")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_layers(path: Option<&Path>, env: Environment) -> Result<MaitriConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("maitri").required(false),
    };

    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("storage.data_dir", "data")?
        .set_default("defaults.user_id", "astronaut_1")?
        .set_default("defaults.history_limit", 10)?
        .set_default("logging.json", false)?
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()
}
