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

//! Tagged results for stages that always produce a value.
//!
//! Every stage of the analysis cycle yields something usable. When a stage
//! had to fall back to a documented default it says so through
//! [`Outcome::Degraded`] instead of returning an error.

use crate::types::Channel;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegradeReason {
    /// No expression model is installed for the channel.
    NoModel { channel: Channel },
    /// The model ran but found no face in the frame.
    NoFace,
    DetectorFailure { channel: Channel, detail: String },
    FusionFault { detail: String },
    /// Report fields that were absent and got their default value.
    MissingFields { fields: Vec<String> },
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::NoModel { channel } => write!(f, "no {channel} model available"),
            DegradeReason::NoFace => f.write_str("no face detected"),
            DegradeReason::DetectorFailure { channel, detail } => {
                write!(f, "{channel} detector failed: {detail}")
            }
            DegradeReason::FusionFault { detail } => write!(f, "fusion fault: {detail}"),
            DegradeReason::MissingFields { fields } => {
                write!(f, "missing fields: {}", fields.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    Degraded { value: T, reason: DegradeReason },
}

impl<T> Outcome<T> {
    pub fn degraded(value: T, reason: DegradeReason) -> Self {
        Outcome::Degraded { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_parts(self) -> (T, Option<DegradeReason>) {
        match self {
            Outcome::Ok(value) => (value, None),
            Outcome::Degraded { value, reason } => (value, Some(reason)),
        }
    }

    pub const fn reason(&self) -> Option<&DegradeReason> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub const fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Degraded { value, reason } => Outcome::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}
