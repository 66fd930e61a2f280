// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Energy Engine - building data extraction and consumption estimation
//!
//! Takes a parsed IFC model and produces an electricity consumption report:
//! spaces with resolved or estimated floor areas, an envelope census,
//! classified MEP equipment, and benchmark-based annual consumption per
//! energy category.
//!
//! # Example
//!
//! ```ignore
//! use ifc_energy_engine::{EnergyAnalyzer, EngineConfig};
//!
//! let analyzer = EnergyAnalyzer::new(EngineConfig::default());
//! let report = analyzer.analyze(bytes).await?;
//! println!("{} kWh/year", report.electricity_consumption.total_annual_consumption);
//! ```

pub mod analyzer;
pub mod area;
pub mod benchmarks;
pub mod calculator;
pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod report;
pub mod strategy;
pub mod systems;

pub use analyzer::{extract_building, EnergyAnalyzer};
pub use benchmarks::{BenchmarkTable, IntensityRange, RangePolicy};
pub use calculator::{BenchmarkCalculator, BENCHMARK_METHOD};
pub use config::{AiConfig, EngineConfig};
pub use error::{EngineError, StrategyError};
pub use strategy::ConsumptionStrategy;

// Report types pass through for downstream consumers
pub use ifc_energy_model::{AnalysisReport, BuildingData, BuildingModel, ConsumptionReport};
