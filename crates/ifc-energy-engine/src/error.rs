// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run-level error types

use ifc_energy_model::{LoadError, ParseError, SchemaError};
use thiserror::Error;

/// Errors that abort an analysis run
///
/// Only structurally invalid input and a rejected schema are fatal; every
/// other condition (missing properties, zero areas, strategy failures)
/// degrades inside the pipeline and still yields a report.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The declared schema version is not supported
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The input is not a structurally valid IFC file
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Engine configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(#[from] figment::Error),

    /// The blocking extraction task was cancelled or panicked
    #[error("Analysis task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<LoadError> for EngineError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Schema(e) => EngineError::Schema(e),
            LoadError::Parse(e) => EngineError::Parse(e),
        }
    }
}

/// Errors surfaced by an external consumption strategy
///
/// These never abort a run; the analyzer logs them and falls back to the
/// benchmark calculator.
#[derive(Error, Debug)]
pub enum StrategyError {
    /// The strategy did not answer within the configured deadline
    #[error("Strategy timed out after {0} seconds")]
    Timeout(u64),

    /// The strategy returned an unusable response
    #[error("Strategy failed: {0}")]
    Failed(String),
}

impl StrategyError {
    /// Create a new failure error
    pub fn failed(msg: impl Into<String>) -> Self {
        StrategyError::Failed(msg.into())
    }
}
