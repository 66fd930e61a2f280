// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmark energy-intensity tables
//!
//! Intensities are kWh/m²/year per energy category. The table is an
//! immutable value injected into the calculator; deployments can load an
//! alternative table from configuration without touching the calculation.

use serde::{Deserialize, Serialize};

/// How to collapse an intensity range to a single value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePolicy {
    /// Use the low end of each range
    LowerBound,
    /// Use the midpoint of each range
    #[default]
    Midpoint,
    /// Use the high end of each range
    UpperBound,
}

/// An intensity range in kWh/m²/year
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntensityRange {
    pub low: f64,
    pub high: f64,
}

impl IntensityRange {
    /// A degenerate range carrying a single value
    pub fn point(value: f64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// Range between two bounds
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Collapse the range under the given policy
    pub fn resolve(&self, policy: RangePolicy) -> f64 {
        match policy {
            RangePolicy::LowerBound => self.low,
            RangePolicy::Midpoint => (self.low + self.high) / 2.0,
            RangePolicy::UpperBound => self.high,
        }
    }
}

/// Per-category intensity ranges for one space-type class
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub lighting: IntensityRange,
    pub hvac: IntensityRange,
    pub equipment: IntensityRange,
}

/// Resolved per-category intensities, kWh/m²/year
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intensities {
    pub lighting: f64,
    pub hvac: f64,
    pub equipment: f64,
}

/// Benchmark intensity table keyed by space-type class
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    /// Row applied to parking spaces
    pub parking: BenchmarkRow,
    /// Row applied to everything else (offices included)
    pub default: BenchmarkRow,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        // Standard commercial benchmark values. The published office ranges
        // (15-20 / 60-80 / 25-35) ship collapsed to their reference values
        // so default results match the established benchmarks exactly.
        Self {
            default: BenchmarkRow {
                lighting: IntensityRange::point(15.0),
                hvac: IntensityRange::point(60.0),
                equipment: IntensityRange::point(25.0),
            },
            parking: BenchmarkRow {
                lighting: IntensityRange::new(5.0, 10.0),
                hvac: IntensityRange::new(20.0, 30.0),
                equipment: IntensityRange::point(5.0),
            },
        }
    }
}

impl BenchmarkTable {
    /// Row for a classified space type; unknown classes use the default row
    pub fn row_for(&self, space_type: &str) -> &BenchmarkRow {
        if space_type.to_uppercase().contains("PARK") {
            &self.parking
        } else {
            &self.default
        }
    }

    /// Resolved intensities for a space type under the given policy
    pub fn intensities_for(&self, space_type: &str, policy: RangePolicy) -> Intensities {
        let row = self.row_for(space_type);
        Intensities {
            lighting: row.lighting.resolve(policy),
            hvac: row.hvac.resolve(policy),
            equipment: row.equipment.resolve(policy),
        }
    }
}
