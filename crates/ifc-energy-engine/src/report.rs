// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Final report assembly

use ifc_energy_model::{AnalysisReport, BuildingModel, ConsumptionReport};

/// Merge the extracted model and consumption estimate into the final report
///
/// Pure shaping; no computation happens here.
pub fn assemble(model: BuildingModel, consumption: ConsumptionReport) -> AnalysisReport {
    AnalysisReport {
        building_data: model.into(),
        electricity_consumption: consumption,
    }
}
