// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pluggable consumption estimation strategies

use crate::error::StrategyError;
use async_trait::async_trait;
use ifc_energy_model::{BuildingModel, ConsumptionReport};
use std::time::Duration;
use tracing::warn;

/// An external consumption estimator
///
/// Implementations may call out to remote services; the analyzer bounds
/// every call with a deadline and treats any error as non-fatal.
#[async_trait]
pub trait ConsumptionStrategy: Send + Sync {
    /// Estimate consumption for the extracted building model
    async fn estimate(&self, model: &BuildingModel) -> Result<ConsumptionReport, StrategyError>;

    /// Method tag written into reports produced by this strategy
    fn method(&self) -> &str;
}

/// Run a strategy under a deadline
///
/// Returns `None` on timeout or strategy error after logging; the caller
/// falls back to the benchmark calculator.
pub async fn run_with_deadline(
    strategy: &dyn ConsumptionStrategy,
    model: &BuildingModel,
    timeout_secs: u64,
) -> Option<ConsumptionReport> {
    let deadline = Duration::from_secs(timeout_secs);

    match tokio::time::timeout(deadline, strategy.estimate(model)).await {
        Ok(Ok(report)) => Some(report),
        Ok(Err(err)) => {
            warn!(method = strategy.method(), %err, "consumption strategy failed, using benchmarks");
            None
        }
        Err(_) => {
            let err = StrategyError::Timeout(timeout_secs);
            warn!(method = strategy.method(), %err, "consumption strategy timed out, using benchmarks");
            None
        }
    }
}
