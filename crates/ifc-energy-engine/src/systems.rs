// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Equipment classification into energy categories

use ifc_energy_model::{
    EntityId, EntityResolver, Equipment, EquipmentCategory, IfcType, PropertyReader, PropertyValue,
    SystemRecord, SystemsSummary,
};
use std::collections::BTreeMap;

/// Classification table: recognized equipment types and their category
///
/// Order is significant: equipment lists in the report follow table order,
/// then entity-ID order within a type. Types absent from this table are
/// ignored entirely.
const CLASSIFICATION: &[(IfcType, EquipmentCategory)] = &[
    (IfcType::IfcAirTerminal, EquipmentCategory::Hvac),
    (IfcType::IfcBoiler, EquipmentCategory::Hvac),
    (IfcType::IfcChiller, EquipmentCategory::Hvac),
    (IfcType::IfcFan, EquipmentCategory::Hvac),
    (IfcType::IfcHeatExchanger, EquipmentCategory::Hvac),
    (IfcType::IfcLightFixture, EquipmentCategory::Lighting),
    (IfcType::IfcLamp, EquipmentCategory::Lighting),
    (
        IfcType::IfcElectricDistributionBoard,
        EquipmentCategory::Electrical,
    ),
    (
        IfcType::IfcElectricFlowStorageDevice,
        EquipmentCategory::Electrical,
    ),
    (IfcType::IfcElectricGenerator, EquipmentCategory::Electrical),
    (IfcType::IfcElectricMotor, EquipmentCategory::Electrical),
    (IfcType::IfcFlowTerminal, EquipmentCategory::Equipment),
    (IfcType::IfcDistributionElement, EquipmentCategory::Equipment),
    (IfcType::IfcSanitaryTerminal, EquipmentCategory::Equipment),
    (IfcType::IfcWasteTerminal, EquipmentCategory::Equipment),
];

/// Category for a recognized equipment type, `None` for everything else
pub fn classify(ifc_type: &IfcType) -> Option<EquipmentCategory> {
    CLASSIFICATION
        .iter()
        .find(|(t, _)| t == ifc_type)
        .map(|(_, category)| *category)
}

/// Classifies equipment entities and captures system detail records
pub struct SystemsClassifier<'a> {
    resolver: &'a dyn EntityResolver,
    properties: &'a dyn PropertyReader,
}

impl<'a> SystemsClassifier<'a> {
    pub fn new(resolver: &'a dyn EntityResolver, properties: &'a dyn PropertyReader) -> Self {
        Self {
            resolver,
            properties,
        }
    }

    /// Classify every recognized equipment entity in the model
    pub fn classify_all(&self) -> SystemsSummary {
        let mut summary = SystemsSummary::default();

        for (ifc_type, category) in CLASSIFICATION {
            for entity in self.resolver.entities_by_type(ifc_type) {
                summary.equipment.push(Equipment {
                    id: self.entity_label(entity.id),
                    equipment_type: ifc_type.name().to_string(),
                    category: *category,
                });

                // HVAC / lighting / electrical entities additionally get a
                // detail record with their attached properties
                let records = match category {
                    EquipmentCategory::Hvac => &mut summary.hvac,
                    EquipmentCategory::Lighting => &mut summary.lighting,
                    EquipmentCategory::Electrical => &mut summary.electrical,
                    EquipmentCategory::Equipment => continue,
                };

                records.push(SystemRecord {
                    id: self.entity_label(entity.id),
                    name: self.properties.name(entity.id).unwrap_or_default(),
                    equipment_type: ifc_type.name().to_string(),
                    properties: self.flat_properties(entity.id),
                });
            }
        }

        summary
    }

    /// GlobalId when present, `#n` otherwise
    fn entity_label(&self, id: EntityId) -> String {
        self.properties
            .global_id(id)
            .unwrap_or_else(|| id.to_string())
    }

    /// All single-value properties across every attached set
    fn flat_properties(&self, id: EntityId) -> BTreeMap<String, PropertyValue> {
        let mut flat = BTreeMap::new();
        for pset in self.properties.property_sets(id) {
            flat.extend(pset.to_map());
        }
        flat
    }
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
#1=IFCBOILER('b1',$,'Boiler 1',$,$,$,$,$,$);
#2=IFCLIGHTFIXTURE('l1',$,'Fixture 1',$,$,$,$,$,$);
#3=IFCELECTRICMOTOR('m1',$,'Motor 1',$,$,$,$,$,$);
#4=IFCSANITARYTERMINAL('st1',$,'Sink 1',$,$,$,$,$,$);
#5=IFCFURNITURE('f1',$,'Desk 1',$,$,$,$,$,$);
#20=IFCPROPERTYSET('ps',$,'Pset_BoilerTypeCommon',$,(#21));
#21=IFCPROPERTYSINGLEVALUE('NominalEnergyConsumption',$,24000.0,$);
#30=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#1),#20);
ENDSEC;
END-ISO-10303-21;
"#;

    fn summary() -> SystemsSummary {
        let model = ParsedModel::from_bytes(TEST_IFC.as_bytes()).unwrap();
        SystemsClassifier::new(model.resolver().as_ref(), model.properties().as_ref())
            .classify_all()
    }

    #[test]
    fn test_categories_assigned() {
        let s = summary();
        assert_eq!(s.equipment.len(), 4);
        let by_id = |id: &str| s.equipment.iter().find(|e| e.id == id).unwrap();
        assert_eq!(by_id("b1").category, EquipmentCategory::Hvac);
        assert_eq!(by_id("l1").category, EquipmentCategory::Lighting);
        assert_eq!(by_id("m1").category, EquipmentCategory::Electrical);
        assert_eq!(by_id("st1").category, EquipmentCategory::Equipment);
    }

    #[test]
    fn test_unrecognized_type_dropped() {
        let s = summary();
        assert!(s.equipment.iter().all(|e| e.id != "f1"));
        assert!(classify(&IfcType::Unknown("IFCFURNITURE".to_string())).is_none());
    }

    #[test]
    fn test_detail_records() {
        let s = summary();
        assert_eq!(s.hvac.len(), 1);
        assert_eq!(s.hvac[0].name, "Boiler 1");
        assert_eq!(s.hvac[0].equipment_type, "IFCBOILER");
        assert_eq!(
            s.hvac[0].properties.get("NominalEnergyConsumption"),
            Some(&PropertyValue::Number(24000.0))
        );
        assert_eq!(s.lighting.len(), 1);
        assert_eq!(s.electrical.len(), 1);
        // Generic equipment gets no detail record
        assert!(s.hvac.iter().all(|r| r.id != "st1"));
    }

    #[test]
    fn test_missing_global_id_falls_back_to_entity_id() {
        let ifc = TEST_IFC.replace("IFCBOILER('b1'", "IFCBOILER($");
        let model = ParsedModel::from_bytes(ifc.as_bytes()).unwrap();
        let s = SystemsClassifier::new(model.resolver().as_ref(), model.properties().as_ref())
            .classify_all();
        assert!(s.equipment.iter().any(|e| e.id == "#1"));
    }
}
