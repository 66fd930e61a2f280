// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Consumption report types

use crate::{BuildingInfo, BuildingModel, EnvelopeSummary, Equipment, Space, SystemRecord};
use serde::{Deserialize, Serialize};

/// Annual electricity consumption estimate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReport {
    /// Lighting consumption, kWh/year
    pub lighting_consumption: f64,
    /// HVAC consumption, kWh/year
    pub hvac_consumption: f64,
    /// Plug/equipment consumption, kWh/year
    pub equipment_consumption: f64,
    /// Sum of the three categories, kWh/year
    pub total_annual_consumption: f64,
    /// kWh/m²/year, 0 when the building has no floor area
    pub energy_intensity: f64,
    /// Estimated peak power draw, kW
    pub peak_demand: f64,
    /// Tag identifying the strategy that produced the numbers
    pub calculation_method: String,
}

/// Building data section of the final report
///
/// Field names match the external JSON contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    pub spaces: Vec<Space>,
    pub building_elements: EnvelopeSummary,
    pub equipment: Vec<Equipment>,
    pub total_floor_area: f64,
    pub building_info: BuildingInfo,
    pub hvac_systems: Vec<SystemRecord>,
    pub lighting_systems: Vec<SystemRecord>,
    pub electrical_systems: Vec<SystemRecord>,
}

impl From<BuildingModel> for BuildingData {
    fn from(model: BuildingModel) -> Self {
        Self {
            spaces: model.spaces,
            building_elements: model.envelope,
            equipment: model.systems.equipment,
            total_floor_area: model.total_floor_area,
            building_info: model.info,
            hvac_systems: model.systems.hvac,
            lighting_systems: model.systems.lighting,
            electrical_systems: model.systems.electrical,
        }
    }
}

/// Final structured result of one analysis run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub building_data: BuildingData,
    pub electricity_consumption: ConsumptionReport,
}
