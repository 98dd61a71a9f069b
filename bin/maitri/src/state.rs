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

use crate::config::{DefaultsConfig, MaitriConfig};
use affect_engine::AnalysisPipeline;
use affect_store::{LocalStore, ReportStore};
use std::sync::Arc;
use tracing::info;

/// Shared by every request. The pipeline's alert counter is atomic, so one
/// instance serves all sessions.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub store: Arc<dyn ReportStore>,
    pub defaults: DefaultsConfig,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline, store: Arc<dyn ReportStore>, defaults: DefaultsConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            store,
            defaults,
        }
    }

    pub fn from_config(cfg: &MaitriConfig) -> Self {
        let store = LocalStore::new(&cfg.storage.data_dir);
        info!(
            backend = store.backend(),
            root = %store.root().display(),
            "Report store ready"
        );
        Self::new(AnalysisPipeline::default(), Arc::new(store), cfg.defaults.clone())
    }
}
