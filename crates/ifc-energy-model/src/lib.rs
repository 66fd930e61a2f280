// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Energy Model - Trait definitions and shared types for IFC energy analysis
//!
//! This crate provides the core abstractions for estimating a building's
//! electricity consumption from IFC (Industry Foundation Classes) files. It
//! defines the entity-graph types produced by a parser backend, the building
//! data model the extraction engine assembles, and the consumption report
//! types the calculator produces.
//!
//! # Architecture
//!
//! The crate is organized around a few key pieces:
//!
//! - [`EntityResolver`] - Entity lookup and reference resolution
//! - [`PropertyReader`] - Access to property sets and quantity sets
//! - [`BuildingModel`] - Extracted building data (spaces, envelope, systems)
//! - [`ConsumptionReport`] - Annual consumption estimate per energy category
//!
//! # Example
//!
//! ```ignore
//! use ifc_energy_model::{EntityResolver, IfcType};
//!
//! fn count_spaces(resolver: &dyn EntityResolver) -> usize {
//!     resolver.count_by_type(&IfcType::IfcSpace)
//! }
//! ```

pub mod building;
pub mod error;
pub mod properties;
pub mod report;
pub mod resolver;
pub mod types;

// Re-export all public types
pub use building::*;
pub use error::*;
pub use properties::*;
pub use report::*;
pub use resolver::*;
pub use types::*;
