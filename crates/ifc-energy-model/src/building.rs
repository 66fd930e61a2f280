// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extracted building data model
//!
//! These types are assembled once per extraction run and never mutated
//! after the report assembler consumes them.

use crate::PropertyValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Building-level metadata read from the root IfcBuilding entity
///
/// Missing fields default to empty string / 0.0, never a failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    /// Building name
    pub name: String,
    /// Building description
    pub description: String,
    /// Building type (from ObjectType)
    pub building_type: String,
    /// Elevation of reference height in meters
    pub elevation: f64,
}

/// A bounded area/volume within the spatial hierarchy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Space name
    pub name: String,
    /// Floor area in m² (declared, or estimated when the declared value is 0)
    pub area: f64,
    /// Volume in m³
    pub volume: f64,
    /// Classified space type, "GENERIC" when the model declares none
    pub space_type: String,
    /// Floor elevation
    pub elevation: f64,
    /// All property sets attached to the space: set name → attribute → value
    pub properties: BTreeMap<String, BTreeMap<String, PropertyValue>>,
}

/// Counts and aggregate areas of envelope elements
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSummary {
    pub walls_count: usize,
    pub windows_count: usize,
    pub doors_count: usize,
    pub slabs_count: usize,
    pub roofs_count: usize,
    /// Aggregate net side area of walls in m²
    pub total_wall_area: f64,
    /// Aggregate area of windows in m²
    pub total_window_area: f64,
    /// total_window_area / total_wall_area, 0 when there is no wall area
    pub window_to_wall_ratio: f64,
}

impl EnvelopeSummary {
    /// Guarded window-to-wall ratio
    pub fn ratio(total_window_area: f64, total_wall_area: f64) -> f64 {
        if total_wall_area > 0.0 {
            total_window_area / total_wall_area
        } else {
            0.0
        }
    }
}

/// Energy category assigned to a piece of equipment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EquipmentCategory {
    Hvac,
    Lighting,
    Electrical,
    Equipment,
}

impl EquipmentCategory {
    /// Category label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCategory::Hvac => "HVAC",
            EquipmentCategory::Lighting => "LIGHTING",
            EquipmentCategory::Electrical => "ELECTRICAL",
            EquipmentCategory::Equipment => "EQUIPMENT",
        }
    }
}

/// A classified equipment entity
///
/// Entities whose type tag the classifier does not recognize are dropped
/// during extraction; there is no "uncategorized" state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// GlobalId of the entity, or its `#n` id when absent
    pub id: String,
    /// Native IFC type tag
    #[serde(rename = "type")]
    pub equipment_type: String,
    /// Assigned energy category
    pub category: EquipmentCategory,
}

/// Detailed record for an HVAC / lighting / electrical system entity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    /// GlobalId of the entity, or its `#n` id when absent
    pub id: String,
    /// Entity name
    pub name: String,
    /// Native IFC type tag
    #[serde(rename = "type")]
    pub equipment_type: String,
    /// Single-value properties attached to the entity
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Classified equipment grouped by energy category
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemsSummary {
    /// Every classified equipment entity, in classification-table order
    pub equipment: Vec<Equipment>,
    /// HVAC system detail records
    pub hvac: Vec<SystemRecord>,
    /// Lighting system detail records
    pub lighting: Vec<SystemRecord>,
    /// Electrical system detail records
    pub electrical: Vec<SystemRecord>,
}

/// Root aggregate produced by one extraction run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingModel {
    /// Building-level metadata
    pub info: BuildingInfo,
    /// All spaces in hierarchy-traversal order
    pub spaces: Vec<Space>,
    /// Sum of all space areas (declared or estimated), m²
    pub total_floor_area: f64,
    /// Envelope element counts and areas
    pub envelope: EnvelopeSummary,
    /// Classified equipment
    pub systems: SystemsSummary,
}
