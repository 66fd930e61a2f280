// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analysis pipeline facade
//!
//! Owns the full run: bytes → parse → extract → estimate → assemble.

use crate::calculator::BenchmarkCalculator;
use crate::config::EngineConfig;
use crate::envelope::EnvelopeAnalyzer;
use crate::error::EngineError;
use crate::extract::SpatialExtractor;
use crate::report::assemble;
use crate::strategy::{run_with_deadline, ConsumptionStrategy};
use crate::systems::SystemsClassifier;
use ifc_energy_model::{AnalysisReport, BuildingModel, ConsumptionReport};
use ifc_energy_parser::ParsedModel;
use std::sync::Arc;
use tracing::info;

/// Facade over the extraction-and-estimation pipeline
#[derive(Clone)]
pub struct EnergyAnalyzer {
    config: EngineConfig,
    strategy: Option<Arc<dyn ConsumptionStrategy>>,
}

impl EnergyAnalyzer {
    /// Create an analyzer using benchmark estimation only
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            strategy: None,
        }
    }

    /// Install an external consumption strategy
    ///
    /// The strategy is consulted first on every run when enabled in the
    /// configuration; any failure falls back to benchmarks.
    pub fn with_strategy(mut self, strategy: Arc<dyn ConsumptionStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Run the full pipeline asynchronously
    ///
    /// Parsing and extraction dominate CPU, so they run on a blocking
    /// worker; concurrent analyses do not serialize on the async runtime.
    pub async fn analyze(&self, bytes: Vec<u8>) -> Result<AnalysisReport, EngineError> {
        let model = tokio::task::spawn_blocking(move || extract_building(&bytes)).await??;

        let consumption = self.estimate(&model).await;
        Ok(assemble(model, consumption))
    }

    /// Run the full pipeline synchronously with benchmark estimation
    pub fn analyze_blocking(&self, bytes: &[u8]) -> Result<AnalysisReport, EngineError> {
        let model = extract_building(bytes)?;
        let consumption = self.calculator().calculate(&model);
        Ok(assemble(model, consumption))
    }

    /// Pick the consumption estimate: external strategy first, benchmarks
    /// as the unconditional fallback
    async fn estimate(&self, model: &BuildingModel) -> ConsumptionReport {
        if self.config.ai.enabled {
            if let Some(strategy) = &self.strategy {
                if let Some(report) =
                    run_with_deadline(strategy.as_ref(), model, self.config.ai.timeout_secs).await
                {
                    return report;
                }
            }
        }

        self.calculator().calculate(model)
    }

    fn calculator(&self) -> BenchmarkCalculator {
        BenchmarkCalculator::new(
            self.config.benchmarks.clone(),
            self.config.range_policy,
            self.config.operating_hours,
        )
    }
}

/// Parse the IFC bytes and extract the building data model
///
/// Strict schema mode: an unsupported declared schema aborts the run.
pub fn extract_building(bytes: &[u8]) -> Result<BuildingModel, EngineError> {
    let parsed = ParsedModel::from_bytes(bytes)?;

    info!(
        schema = %parsed.metadata().schema_version,
        entities = parsed.entity_count(),
        "model loaded"
    );

    let resolver = parsed.resolver().as_ref();
    let properties = parsed.properties().as_ref();

    let extractor = SpatialExtractor::new(resolver, properties);
    let info = extractor.building_info();
    let spaces = extractor.extract_spaces();
    let total_floor_area = spaces.iter().map(|s| s.area).sum();

    let envelope = EnvelopeAnalyzer::new(resolver, properties).analyze();
    let systems = SystemsClassifier::new(resolver, properties).classify_all();

    info!(
        spaces = spaces.len(),
        total_floor_area,
        equipment = systems.equipment.len(),
        "building data extracted"
    );

    Ok(BuildingModel {
        info,
        spaces,
        total_floor_area,
        envelope,
        systems,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('pr',$,'Project',$,$,$,$,$,$);
#2=IFCBUILDING('bu',$,'HQ',$,$,$,$,$,.ELEMENT.,0.0,$,$);
#10=IFCSPACE('sp1',$,'Office 101',$,'Office',$,$,$,.ELEMENT.,.INTERNAL.,$);
#20=IFCELEMENTQUANTITY('q1',$,'Qto_SpaceBaseQuantities',$,$,(#21));
#21=IFCQUANTITYAREA('NetFloorArea',$,$,96.0);
#30=IFCRELDEFINESBYPROPERTIES('r1',$,$,$,(#10),#20);
#40=IFCRELAGGREGATES('a1',$,$,$,#1,(#2));
#41=IFCRELCONTAINEDINSPATIALSTRUCTURE('c1',$,$,$,(#10),#2);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_analyze_blocking() {
        let analyzer = EnergyAnalyzer::new(EngineConfig::default());
        let report = analyzer.analyze_blocking(TEST_IFC.as_bytes()).unwrap();
        assert_eq!(report.building_data.total_floor_area, 96.0);
        assert_eq!(
            report.electricity_consumption.total_annual_consumption,
            9600.0
        );
    }

    #[test]
    fn test_schema_rejection() {
        let analyzer = EnergyAnalyzer::new(EngineConfig::default());
        let bad = TEST_IFC.replace("IFC4", "IFC9X9");
        assert!(matches!(
            analyzer.analyze_blocking(bad.as_bytes()),
            Err(EngineError::Schema(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_async_matches_blocking() {
        let analyzer = EnergyAnalyzer::new(EngineConfig::default());
        let async_report = analyzer.analyze(TEST_IFC.as_bytes().to_vec()).await.unwrap();
        let blocking_report = analyzer.analyze_blocking(TEST_IFC.as_bytes()).unwrap();
        assert_eq!(async_report, blocking_report);
    }
}
