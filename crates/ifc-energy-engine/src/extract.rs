// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial hierarchy traversal and space extraction
//!
//! Flattens the project → site → building → storey → space containment tree
//! into a single sequence of spaces, resolving declared areas and volumes
//! with graceful fallback.

use crate::area::estimate_area;
use ifc_energy_model::{
    BuildingInfo, EntityId, EntityResolver, IfcType, PropertyReader, Space,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use tracing::debug;

/// Walks the spatial structure and assembles per-space data
pub struct SpatialExtractor<'a> {
    resolver: &'a dyn EntityResolver,
    properties: &'a dyn PropertyReader,
}

impl<'a> SpatialExtractor<'a> {
    pub fn new(resolver: &'a dyn EntityResolver, properties: &'a dyn PropertyReader) -> Self {
        Self {
            resolver,
            properties,
        }
    }

    /// Extract all spaces in hierarchy-traversal order
    ///
    /// Traversal uses an explicit worklist stack; deep or cyclic aggregation
    /// graphs cannot overflow the call stack. Spaces detached from the
    /// hierarchy are appended afterwards in entity-ID order so no space is
    /// silently dropped.
    pub fn extract_spaces(&self) -> Vec<Space> {
        let children = self.child_map();

        let mut spaces = Vec::new();
        let mut visited: FxHashSet<u32> = FxHashSet::default();
        let mut stack: Vec<EntityId> = Vec::new();

        // Roots in ID order for determinism
        for project in self.resolver.entities_by_type(&IfcType::IfcProject) {
            stack.push(project.id);
        }
        stack.reverse();

        while let Some(id) = stack.pop() {
            if !visited.insert(id.0) {
                continue;
            }

            if let Some(entity) = self.resolver.get(id) {
                if entity.ifc_type == IfcType::IfcSpace {
                    spaces.push(self.extract_space(id));
                }
            }

            if let Some(child_ids) = children.get(&id.0) {
                // Reverse push so children pop in declaration order
                for child in child_ids.iter().rev() {
                    stack.push(*child);
                }
            }
        }

        // Orphaned spaces (no containment edge back to the project)
        for space in self.resolver.entities_by_type(&IfcType::IfcSpace) {
            if visited.insert(space.id.0) {
                debug!(id = %space.id, "space not reachable from spatial hierarchy");
                spaces.push(self.extract_space(space.id));
            }
        }

        spaces
    }

    /// Parent ID -> child IDs over both decomposition edge kinds
    fn child_map(&self) -> FxHashMap<u32, Vec<EntityId>> {
        let mut children: FxHashMap<u32, Vec<EntityId>> = FxHashMap::default();

        // IFCRELAGGREGATES: RelatingObject at 4, RelatedObjects at 5
        for rel in self.resolver.entities_by_type(&IfcType::IfcRelAggregates) {
            if let (Some(parent), Some(related)) = (rel.get_ref(4), rel.get_refs(5)) {
                children.entry(parent.0).or_default().extend(related);
            }
        }

        // IFCRELCONTAINEDINSPATIALSTRUCTURE: RelatedElements at 4,
        // RelatingStructure at 5
        for rel in self
            .resolver
            .entities_by_type(&IfcType::IfcRelContainedInSpatialStructure)
        {
            if let (Some(related), Some(parent)) = (rel.get_refs(4), rel.get_ref(5)) {
                children.entry(parent.0).or_default().extend(related);
            }
        }

        children
    }

    /// Assemble one space record
    fn extract_space(&self, id: EntityId) -> Space {
        let name = self.properties.name(id).unwrap_or_default();
        // Declared ObjectType wins; without one, PARK-named spaces classify
        // as parking (same name test the area fallback uses) so the reduced
        // benchmark row applies to them
        let space_type = match self.properties.object_type(id) {
            Some(t) => t.to_uppercase(),
            None if name.to_uppercase().contains("PARK") => "PARKING".to_string(),
            None => "GENERIC".to_string(),
        };

        // Full property capture: set name -> attribute -> value
        let mut property_map: BTreeMap<String, BTreeMap<String, _>> = BTreeMap::new();
        for pset in self.properties.property_sets(id) {
            property_map.insert(pset.name.clone(), pset.to_map());
        }

        let qto = self
            .properties
            .quantity_set(id, "Qto_SpaceBaseQuantities");

        let mut area = qto
            .get("NetFloorArea")
            .or_else(|| qto.get("GrossFloorArea"))
            .copied()
            .unwrap_or(0.0);
        let mut volume = qto
            .get("NetVolume")
            .or_else(|| qto.get("GrossVolume"))
            .copied()
            .unwrap_or(0.0);

        // Some authoring tools publish bare Area/Volume properties instead
        // of base quantities
        if area <= 0.0 {
            area = property_number(&property_map, "Area").unwrap_or(0.0);
        }
        if volume <= 0.0 {
            volume = property_number(&property_map, "Volume").unwrap_or(0.0);
        }

        let elevation = property_number(&property_map, "FinishFloorHeight")
            .or_else(|| property_number(&property_map, "Elevation"))
            .unwrap_or(0.0);

        if area <= 0.0 {
            area = estimate_area(&name, &space_type);
        }

        Space {
            name,
            area,
            volume,
            space_type,
            elevation,
            properties: property_map,
        }
    }

    /// Building metadata from the first IfcBuilding entity
    ///
    /// Missing fields default to empty string / 0.0; a model with no
    /// building entity yields a default record, never a failure.
    pub fn building_info(&self) -> BuildingInfo {
        let building = match self
            .resolver
            .entities_by_type(&IfcType::IfcBuilding)
            .into_iter()
            .next()
        {
            Some(b) => b,
            None => return BuildingInfo::default(),
        };

        BuildingInfo {
            name: self.properties.name(building.id).unwrap_or_default(),
            description: self.properties.description(building.id).unwrap_or_default(),
            building_type: self.properties.object_type(building.id).unwrap_or_default(),
            // ElevationOfRefHeight at index 9
            elevation: building.get_float(9).unwrap_or(0.0),
        }
    }
}

/// Search every captured property set for a numeric attribute
fn property_number(
    properties: &BTreeMap<String, BTreeMap<String, ifc_energy_model::PropertyValue>>,
    attribute: &str,
) -> Option<f64> {
    properties
        .values()
        .find_map(|set| set.get(attribute).and_then(|v| v.as_number()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_energy_parser::ParsedModel;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('pr',$,'Project',$,$,$,$,$,$);
#2=IFCSITE('si',$,'Site',$,$,$,$,$,.ELEMENT.,$,$,$,$,$);
#3=IFCBUILDING('bu',$,'HQ','Head office','OFFICE BUILDING',$,$,$,.ELEMENT.,12.5,$,$);
#4=IFCBUILDINGSTOREY('st',$,'Level 1',$,$,$,$,$,.ELEMENT.,0.0);
#10=IFCSPACE('sp1',$,'Office 101',$,'Office',$,$,$,.ELEMENT.,.INTERNAL.,$);
#11=IFCSPACE('sp2',$,'Parking P1',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#20=IFCELEMENTQUANTITY('q1',$,'Qto_SpaceBaseQuantities',$,$,(#21,#22));
#21=IFCQUANTITYAREA('NetFloorArea',$,$,96.0);
#22=IFCQUANTITYVOLUME('NetVolume',$,$,288.0);
#30=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#10),#20);
#40=IFCRELAGGREGATES('a1',$,$,$,#1,(#2));
#41=IFCRELAGGREGATES('a2',$,$,$,#2,(#3));
#42=IFCRELAGGREGATES('a3',$,$,$,#3,(#4));
#43=IFCRELCONTAINEDINSPATIALSTRUCTURE('c1',$,$,$,(#10,#11),#4);
ENDSEC;
END-ISO-10303-21;
"#;

    fn extract() -> (BuildingInfo, Vec<Space>) {
        let model = ParsedModel::from_bytes(TEST_IFC.as_bytes()).unwrap();
        let extractor = SpatialExtractor::new(model.resolver().as_ref(), model.properties().as_ref());
        (extractor.building_info(), extractor.extract_spaces())
    }

    #[test]
    fn test_declared_area_preserved() {
        let (_, spaces) = extract();
        let office = spaces.iter().find(|s| s.name == "Office 101").unwrap();
        assert_eq!(office.area, 96.0);
        assert_eq!(office.volume, 288.0);
        assert_eq!(office.space_type, "OFFICE");
    }

    #[test]
    fn test_parking_fallback_area_and_classification() {
        let (_, spaces) = extract();
        let parking = spaces.iter().find(|s| s.name == "Parking P1").unwrap();
        assert_eq!(parking.area, 25.0);
        assert_eq!(parking.space_type, "PARKING");
    }

    #[test]
    fn test_declared_object_type_wins_over_park_name() {
        let typed = TEST_IFC.replace(
            "#11=IFCSPACE('sp2',$,'Parking P1',$,$,",
            "#11=IFCSPACE('sp2',$,'Parking P1',$,'Storage',",
        );
        let model = ParsedModel::from_bytes(typed.as_bytes()).unwrap();
        let extractor = SpatialExtractor::new(model.resolver().as_ref(), model.properties().as_ref());
        let spaces = extractor.extract_spaces();
        let parking = spaces.iter().find(|s| s.name == "Parking P1").unwrap();
        assert_eq!(parking.space_type, "STORAGE");
    }

    #[test]
    fn test_unnamed_untyped_space_is_generic() {
        let bare = TEST_IFC.replace(
            "#11=IFCSPACE('sp2',$,'Parking P1',$,$,",
            "#11=IFCSPACE('sp2',$,$,$,$,",
        );
        let model = ParsedModel::from_bytes(bare.as_bytes()).unwrap();
        let extractor = SpatialExtractor::new(model.resolver().as_ref(), model.properties().as_ref());
        let spaces = extractor.extract_spaces();
        let bare_space = spaces.iter().find(|s| s.name.is_empty()).unwrap();
        assert_eq!(bare_space.space_type, "GENERIC");
        assert_eq!(bare_space.area, 20.0);
    }

    #[test]
    fn test_traversal_order() {
        let (_, spaces) = extract();
        assert_eq!(spaces.len(), 2);
        assert_eq!(spaces[0].name, "Office 101");
        assert_eq!(spaces[1].name, "Parking P1");
    }

    #[test]
    fn test_building_info() {
        let (info, _) = extract();
        assert_eq!(info.name, "HQ");
        assert_eq!(info.description, "Head office");
        assert_eq!(info.building_type, "OFFICE BUILDING");
        assert_eq!(info.elevation, 12.5);
    }

    #[test]
    fn test_orphaned_space_still_extracted() {
        // Drop the containment edge; the spaces become orphans but survive
        let detached = TEST_IFC.replace(
            "#43=IFCRELCONTAINEDINSPATIALSTRUCTURE('c1',$,$,$,(#10,#11),#4);\n",
            "",
        );
        let model = ParsedModel::from_bytes(detached.as_bytes()).unwrap();
        let extractor = SpatialExtractor::new(model.resolver().as_ref(), model.properties().as_ref());
        let spaces = extractor.extract_spaces();
        assert_eq!(spaces.len(), 2);
    }

    #[test]
    fn test_cyclic_aggregation_terminates() {
        // Introduce a back edge from the storey to the site
        let cyclic = TEST_IFC.replace(
            "#42=IFCRELAGGREGATES('a3',$,$,$,#3,(#4));",
            "#42=IFCRELAGGREGATES('a3',$,$,$,#3,(#4));\n#44=IFCRELAGGREGATES('a4',$,$,$,#4,(#2));",
        );
        let model = ParsedModel::from_bytes(cyclic.as_bytes()).unwrap();
        let extractor = SpatialExtractor::new(model.resolver().as_ref(), model.properties().as_ref());
        let spaces = extractor.extract_spaces();
        assert_eq!(spaces.len(), 2);
    }

    #[test]
    fn test_property_capture() {
        let ifc = TEST_IFC.replace(
            "#30=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#10),#20);",
            "#30=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#10),#20);\n#31=IFCPROPERTYSET('ps',$,'Pset_SpaceCommon',$,(#32));\n#32=IFCPROPERTYSINGLEVALUE('IsExternal',$,IFCBOOLEAN(.F.),$);\n#33=IFCRELDEFINESBYPROPERTIES('r2',$,$,$,(#10),#31);",
        );
        let model = ParsedModel::from_bytes(ifc.as_bytes()).unwrap();
        let extractor = SpatialExtractor::new(model.resolver().as_ref(), model.properties().as_ref());
        let spaces = extractor.extract_spaces();
        let office = spaces.iter().find(|s| s.name == "Office 101").unwrap();
        assert!(office.properties.contains_key("Pset_SpaceCommon"));
    }
}
