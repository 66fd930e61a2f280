// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building envelope census: element counts and glazing ratio

use ifc_energy_model::{
    EntityResolver, EnvelopeSummary, IfcType, PropertyReader, QuantityType,
};

/// Counts envelope elements and aggregates wall / window areas
pub struct EnvelopeAnalyzer<'a> {
    resolver: &'a dyn EntityResolver,
    properties: &'a dyn PropertyReader,
}

impl<'a> EnvelopeAnalyzer<'a> {
    pub fn new(resolver: &'a dyn EntityResolver, properties: &'a dyn PropertyReader) -> Self {
        Self {
            resolver,
            properties,
        }
    }

    /// Produce the envelope summary
    ///
    /// Wall area takes only quantities whose name contains "NetSideArea";
    /// window area takes every area quantity. Missing quantities contribute
    /// nothing; there is no area fallback for envelope elements.
    pub fn analyze(&self) -> EnvelopeSummary {
        // Curtain walls count as walls; exporters use the three tags
        // interchangeably for the same envelope role
        let wall_types = [
            IfcType::IfcWall,
            IfcType::IfcWallStandardCase,
            IfcType::IfcCurtainWall,
        ];

        let mut walls_count = 0;
        let mut total_wall_area = 0.0;
        for wall_type in &wall_types {
            for wall in self.resolver.entities_by_type(wall_type) {
                walls_count += 1;
                for qset in self.properties.quantity_sets(wall.id) {
                    for q in &qset.quantities {
                        if q.quantity_type == QuantityType::Area
                            && q.name.contains("NetSideArea")
                        {
                            total_wall_area += q.value;
                        }
                    }
                }
            }
        }

        let mut total_window_area = 0.0;
        let windows = self.resolver.entities_by_type(&IfcType::IfcWindow);
        for window in &windows {
            for qset in self.properties.quantity_sets(window.id) {
                for q in &qset.quantities {
                    if q.quantity_type == QuantityType::Area {
                        total_window_area += q.value;
                    }
                }
            }
        }

        EnvelopeSummary {
            walls_count,
            windows_count: windows.len(),
            doors_count: self.resolver.count_by_type(&IfcType::IfcDoor),
            slabs_count: self.resolver.count_by_type(&IfcType::IfcSlab),
            roofs_count: self.resolver.count_by_type(&IfcType::IfcRoof),
            total_wall_area,
            total_window_area,
            window_to_wall_ratio: EnvelopeSummary::ratio(total_window_area, total_wall_area),
        }
    }
}
