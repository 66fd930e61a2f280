// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine configuration
//!
//! Layered via figment: compiled defaults, then an optional TOML file, then
//! `IFC_ENERGY__`-prefixed environment variables (double underscore as the
//! nesting separator, e.g. `IFC_ENERGY__AI__TIMEOUT_SECS=10`).

use crate::benchmarks::{BenchmarkTable, RangePolicy};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// External strategy (AI estimator) settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Whether an installed external strategy should be consulted at all
    pub enabled: bool,
    /// Deadline for a single strategy call, in seconds
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 30,
        }
    }
}

/// Analysis engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Annual operating hours used for peak-demand estimation
    pub operating_hours: f64,
    /// How benchmark intensity ranges collapse to single values
    pub range_policy: RangePolicy,
    /// Benchmark intensity table
    pub benchmarks: BenchmarkTable,
    /// External strategy settings
    pub ai: AiConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            operating_hours: 2000.0,
            range_policy: RangePolicy::default(),
            benchmarks: BenchmarkTable::default(),
            ai: AiConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default layering
    ///
    /// Reads `config/default.toml` when present; the file is optional and
    /// compiled defaults apply underneath.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from("config/default.toml")
    }

    /// Load configuration with an explicit TOML path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("IFC_ENERGY__").split("__"))
            .extract()
    }
}
