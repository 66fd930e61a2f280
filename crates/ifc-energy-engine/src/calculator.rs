// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmark-based consumption calculation
//!
//! Pure and synchronous: the same building model and table always produce
//! the same report.

use crate::benchmarks::{BenchmarkTable, RangePolicy};
use ifc_energy_model::{BuildingModel, ConsumptionReport};
use tracing::{debug, info};

/// Method tag reported for benchmark-based estimates
pub const BENCHMARK_METHOD: &str = "Standard Building Energy Benchmarks";

/// Benchmark consumption calculator
#[derive(Clone, Debug)]
pub struct BenchmarkCalculator {
    table: BenchmarkTable,
    policy: RangePolicy,
    operating_hours: f64,
}

impl BenchmarkCalculator {
    pub fn new(table: BenchmarkTable, policy: RangePolicy, operating_hours: f64) -> Self {
        Self {
            table,
            policy,
            operating_hours,
        }
    }

    /// Estimate annual consumption for the extracted building model
    ///
    /// Per space: category intensity (kWh/m²/yr) × floor area, summed over
    /// all spaces. `energy_intensity` and `peak_demand` divisions are
    /// guarded to 0 for degenerate inputs.
    pub fn calculate(&self, model: &BuildingModel) -> ConsumptionReport {
        let mut lighting = 0.0;
        let mut hvac = 0.0;
        let mut equipment = 0.0;

        for space in &model.spaces {
            let intensities = self.table.intensities_for(&space.space_type, self.policy);
            lighting += intensities.lighting * space.area;
            hvac += intensities.hvac * space.area;
            equipment += intensities.equipment * space.area;

            debug!(
                space = %space.name,
                space_type = %space.space_type,
                area = space.area,
                "applied benchmark intensities"
            );
        }

        let total = lighting + hvac + equipment;

        let energy_intensity = if model.total_floor_area > 0.0 {
            total / model.total_floor_area
        } else {
            0.0
        };

        let peak_demand = if self.operating_hours > 0.0 {
            total / self.operating_hours
        } else {
            0.0
        };

        info!(
            spaces = model.spaces.len(),
            total_floor_area = model.total_floor_area,
            total_annual_consumption = total,
            "benchmark consumption calculated"
        );

        ConsumptionReport {
            lighting_consumption: lighting,
            hvac_consumption: hvac,
            equipment_consumption: equipment,
            total_annual_consumption: total,
            energy_intensity,
            peak_demand,
            calculation_method: BENCHMARK_METHOD.to_string(),
        }
    }
}
