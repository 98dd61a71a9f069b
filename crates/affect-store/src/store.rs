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

use crate::error::StoreResult;
use affect_contracts::AlertReport;
use async_trait::async_trait;
use serde_json::Value;

/// Where alert reports and session records end up.
///
/// Every write returns a stable locator (a path or remote identifier) for
/// the stored artifact.
#[async_trait]
pub trait ReportStore: Send + Sync {
    fn backend(&self) -> &str;

    /// Stores the report together with its human-readable rendering and
    /// returns the locator of the structured copy.
    async fn save_alert(&self, report: &AlertReport) -> StoreResult<String>;

    async fn save_session(&self, session: &Value, user_id: &str) -> StoreResult<String>;

    /// Most recent sessions first, at most `limit` of them.
    async fn user_sessions(&self, user_id: &str, limit: usize) -> StoreResult<Vec<Value>>;
}
