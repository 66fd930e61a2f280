// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline tests on an inline IFC fixture

use approx::assert_relative_eq;
use async_trait::async_trait;
use ifc_energy_engine::{
    ConsumptionReport, ConsumptionStrategy, EnergyAnalyzer, EngineConfig, EngineError,
    StrategyError,
};
use ifc_energy_model::BuildingModel;
use std::sync::Arc;

const OFFICE_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('office.ifc','2024-05-01T00:00:00',('Author'),('Org'),'Preprocessor','App','');
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('pr0',$,'Office Project',$,$,$,$,$,$);
#2=IFCSITE('si0',$,'Site',$,$,$,$,$,.ELEMENT.,$,$,$,$,$);
#3=IFCBUILDING('bu0',$,'HQ','Headquarters','OFFICE BUILDING',$,$,$,.ELEMENT.,4.5,$,$);
#4=IFCBUILDINGSTOREY('st0',$,'Level 1',$,$,$,$,$,.ELEMENT.,0.0);
#10=IFCSPACE('sp1',$,'Office 101',$,'Office',$,$,$,.ELEMENT.,.INTERNAL.,$);
#11=IFCSPACE('sp2',$,'Parking P1',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);
#20=IFCELEMENTQUANTITY('q1',$,'Qto_SpaceBaseQuantities',$,$,(#21,#22));
#21=IFCQUANTITYAREA('NetFloorArea',$,$,IFCAREAMEASURE(96.0));
#22=IFCQUANTITYVOLUME('NetVolume',$,$,IFCVOLUMEMEASURE(288.0));
#23=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#10),#20);
#30=IFCWALL('w1',$,'Wall 1',$,$,$,$,$);
#31=IFCWALLSTANDARDCASE('w2',$,'Wall 2',$,$,$,$,$);
#32=IFCWINDOW('wi1',$,'Window 1',$,$,$,$,$,$);
#33=IFCDOOR('d1',$,'Door 1',$,$,$,$,$,$);
#34=IFCSLAB('sl1',$,'Slab 1',$,$,$,$,$,$);
#40=IFCELEMENTQUANTITY('q2',$,'Qto_WallBaseQuantities',$,$,(#41));
#41=IFCQUANTITYAREA('NetSideArea',$,$,IFCAREAMEASURE(80.0));
#42=IFCELEMENTQUANTITY('q3',$,'Qto_WindowBaseQuantities',$,$,(#43));
#43=IFCQUANTITYAREA('Area',$,$,IFCAREAMEASURE(20.0));
#44=IFCRELDEFINESBYPROPERTIES('r2',$,$,$,(#30),#40);
#45=IFCRELDEFINESBYPROPERTIES('r3',$,$,$,(#32),#42);
#50=IFCBOILER('eq1',$,'Boiler 1',$,$,$,$,$,$);
#51=IFCLIGHTFIXTURE('eq2',$,'Fixture 1',$,$,$,$,$,$);
#52=IFCELECTRICMOTOR('eq3',$,'Motor 1',$,$,$,$,$,$);
#53=IFCFURNITURE('eq4',$,'Desk 1',$,$,$,$,$,$);
#60=IFCRELAGGREGATES('a1',$,$,$,#1,(#2));
#61=IFCRELAGGREGATES('a2',$,$,$,#2,(#3));
#62=IFCRELAGGREGATES('a3',$,$,$,#3,(#4));
#63=IFCRELCONTAINEDINSPATIALSTRUCTURE('c1',$,$,$,(#10,#11),#4);
ENDSEC;
END-ISO-10303-21;
"#;

fn analyzer() -> EnergyAnalyzer {
    EnergyAnalyzer::new(EngineConfig::default())
}

#[test]
fn declared_area_preserved_and_fallbacks_applied() {
    let report = analyzer().analyze_blocking(OFFICE_IFC.as_bytes()).unwrap();
    let spaces = &report.building_data.spaces;
    assert_eq!(spaces.len(), 2);

    let office = spaces.iter().find(|s| s.name == "Office 101").unwrap();
    assert_eq!(office.area, 96.0);
    assert_eq!(office.volume, 288.0);
    assert_eq!(office.space_type, "OFFICE");

    let parking = spaces.iter().find(|s| s.name == "Parking P1").unwrap();
    assert_eq!(parking.area, 25.0);
    assert_eq!(parking.space_type, "PARKING");

    assert_eq!(report.building_data.total_floor_area, 121.0);
}

#[test]
fn envelope_summary_counts_and_ratio() {
    let report = analyzer().analyze_blocking(OFFICE_IFC.as_bytes()).unwrap();
    let envelope = &report.building_data.building_elements;
    assert_eq!(envelope.walls_count, 2);
    assert_eq!(envelope.windows_count, 1);
    assert_eq!(envelope.doors_count, 1);
    assert_eq!(envelope.slabs_count, 1);
    assert_eq!(envelope.roofs_count, 0);
    assert_eq!(envelope.total_wall_area, 80.0);
    assert_eq!(envelope.total_window_area, 20.0);
    assert_relative_eq!(envelope.window_to_wall_ratio, 0.25);
}

#[test]
fn unrecognized_equipment_absent_everywhere() {
    let report = analyzer().analyze_blocking(OFFICE_IFC.as_bytes()).unwrap();
    let data = &report.building_data;
    assert_eq!(data.equipment.len(), 3);
    assert!(data.equipment.iter().all(|e| e.id != "eq4"));
    assert!(data.hvac_systems.iter().all(|r| r.id != "eq4"));
    assert!(data.lighting_systems.iter().all(|r| r.id != "eq4"));
    assert!(data.electrical_systems.iter().all(|r| r.id != "eq4"));

    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.contains("eq4"));
    assert!(!json.contains("IFCFURNITURE"));
}

#[test]
fn office_reference_consumption() {
    // The 96 m² office plus the 25 m² estimated parking space
    let report = analyzer().analyze_blocking(OFFICE_IFC.as_bytes()).unwrap();
    let c = &report.electricity_consumption;

    // Office at 15/60/25 kWh/m²/yr, parking at the reduced parking row
    assert_relative_eq!(c.lighting_consumption, 96.0 * 15.0 + 25.0 * 7.5);
    assert_relative_eq!(c.hvac_consumption, 96.0 * 60.0 + 25.0 * 25.0);
    assert_relative_eq!(c.equipment_consumption, 96.0 * 25.0 + 25.0 * 5.0);
    assert_relative_eq!(
        c.total_annual_consumption,
        c.lighting_consumption + c.hvac_consumption + c.equipment_consumption
    );
    assert_relative_eq!(c.peak_demand, c.total_annual_consumption / 2000.0);
    assert_relative_eq!(c.energy_intensity, c.total_annual_consumption / 121.0);
    assert_eq!(c.calculation_method, "Standard Building Energy Benchmarks");
}

#[test]
fn office_only_end_to_end_reference_values() {
    // Single 96 m² office: the canonical benchmark example
    let office_only = OFFICE_IFC.replace(
        "#11=IFCSPACE('sp2',$,'Parking P1',$,$,$,$,$,.ELEMENT.,.INTERNAL.,$);\n",
        "",
    )
    .replace("(#10,#11)", "(#10)");
    let report = analyzer().analyze_blocking(office_only.as_bytes()).unwrap();
    let c = &report.electricity_consumption;

    assert_relative_eq!(c.lighting_consumption, 1440.0);
    assert_relative_eq!(c.hvac_consumption, 5760.0);
    assert_relative_eq!(c.equipment_consumption, 2400.0);
    assert_relative_eq!(c.total_annual_consumption, 9600.0);
    assert_relative_eq!(c.energy_intensity, 100.0);
    assert_relative_eq!(c.peak_demand, 4.8);
}

#[test]
fn unsupported_schema_rejected() {
    let bad = OFFICE_IFC.replace("FILE_SCHEMA(('IFC4'));", "FILE_SCHEMA(('IFC9X9'));");
    let err = analyzer().analyze_blocking(bad.as_bytes()).unwrap_err();
    match err {
        EngineError::Schema(e) => assert_eq!(e.declared, "IFC9X9"),
        other => panic!("expected schema rejection, got {other}"),
    }
}

#[test]
fn idempotent_serialization() {
    let a = analyzer().analyze_blocking(OFFICE_IFC.as_bytes()).unwrap();
    let b = analyzer().analyze_blocking(OFFICE_IFC.as_bytes()).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn consumption_monotonic_in_space_area() {
    let larger = OFFICE_IFC.replace("IFCAREAMEASURE(96.0)", "IFCAREAMEASURE(150.0)");
    let base = analyzer().analyze_blocking(OFFICE_IFC.as_bytes()).unwrap();
    let bigger = analyzer().analyze_blocking(larger.as_bytes()).unwrap();
    assert!(
        bigger.electricity_consumption.total_annual_consumption
            > base.electricity_consumption.total_annual_consumption
    );
}

struct UnreachableEstimator;

#[async_trait]
impl ConsumptionStrategy for UnreachableEstimator {
    async fn estimate(&self, _model: &BuildingModel) -> Result<ConsumptionReport, StrategyError> {
        Err(StrategyError::failed("connection refused"))
    }

    fn method(&self) -> &str {
        "AI Estimator"
    }
}

struct OverridingEstimator;

#[async_trait]
impl ConsumptionStrategy for OverridingEstimator {
    async fn estimate(&self, _model: &BuildingModel) -> Result<ConsumptionReport, StrategyError> {
        Ok(ConsumptionReport {
            total_annual_consumption: 42.0,
            calculation_method: "AI Estimator".to_string(),
            ..Default::default()
        })
    }

    fn method(&self) -> &str {
        "AI Estimator"
    }
}

#[tokio::test]
async fn failing_strategy_falls_back_to_benchmarks() {
    let analyzer = EnergyAnalyzer::new(EngineConfig::default())
        .with_strategy(Arc::new(UnreachableEstimator));
    let report = analyzer.analyze(OFFICE_IFC.as_bytes().to_vec()).await.unwrap();
    assert_eq!(
        report.electricity_consumption.calculation_method,
        "Standard Building Energy Benchmarks"
    );
    assert!(report.electricity_consumption.total_annual_consumption > 0.0);
}

#[tokio::test]
async fn successful_strategy_overrides_benchmarks() {
    let analyzer = EnergyAnalyzer::new(EngineConfig::default())
        .with_strategy(Arc::new(OverridingEstimator));
    let report = analyzer.analyze(OFFICE_IFC.as_bytes().to_vec()).await.unwrap();
    assert_eq!(report.electricity_consumption.calculation_method, "AI Estimator");
    assert_eq!(report.electricity_consumption.total_annual_consumption, 42.0);
}

#[tokio::test]
async fn disabled_ai_skips_strategy() {
    let mut config = EngineConfig::default();
    config.ai.enabled = false;
    let analyzer = EnergyAnalyzer::new(config).with_strategy(Arc::new(OverridingEstimator));
    let report = analyzer.analyze(OFFICE_IFC.as_bytes().to_vec()).await.unwrap();
    assert_eq!(
        report.electricity_consumption.calculation_method,
        "Standard Building Energy Benchmarks"
    );
}
