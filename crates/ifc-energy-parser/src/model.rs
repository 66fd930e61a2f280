// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level parsed model: schema gate, index construction, accessors

use crate::properties::PropertyIndex;
use crate::resolver::EntityGraph;
use crate::scanner::{self, EntityScanner};
use ifc_energy_model::{
    EntityId, EntityResolver, IfcType, LoadError, ModelMetadata, SchemaError,
};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Schema versions the extraction pipeline understands
///
/// Comparison is against the exact FILE_SCHEMA string, uppercased. ADD/TC
/// suffixes other than the ones listed here are rejected.
pub const SUPPORTED_SCHEMAS: &[&str] = &["IFC2X3", "IFC4", "IFC4X1", "IFC4X3", "IFC4X3_ADD2"];

/// A fully indexed IFC model
///
/// Owns the entity graph and the property index. Entities decode lazily on
/// first access; the model itself is cheap to clone via the shared `Arc`s.
pub struct ParsedModel {
    resolver: Arc<EntityGraph>,
    properties: Arc<PropertyIndex>,
    metadata: ModelMetadata,
    degraded: bool,
}

impl fmt::Debug for ParsedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedModel")
            .field("metadata", &self.metadata)
            .field("degraded", &self.degraded)
            .field("entities", &self.entity_count())
            .finish_non_exhaustive()
    }
}

impl ParsedModel {
    /// Parse IFC content, rejecting unsupported schema versions
    ///
    /// This is the strict entry point: a schema outside
    /// [`SUPPORTED_SCHEMAS`] aborts the load with [`LoadError::Schema`]
    /// before any entity is decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let model = Self::from_bytes_lenient(bytes)?;
        if model.degraded {
            return Err(SchemaError::new(&model.metadata.schema_version).into());
        }
        Ok(model)
    }

    /// Parse IFC content, keeping a degraded graph for unsupported schemas
    ///
    /// Structural errors (bad framing, missing header) still fail; only the
    /// schema gate is relaxed. Callers must check [`ParsedModel::degraded`]
    /// before trusting extraction results.
    pub fn from_bytes_lenient(bytes: &[u8]) -> Result<Self, LoadError> {
        let content = std::str::from_utf8(bytes)
            .map_err(ifc_energy_model::ParseError::from)?
            .to_string();

        scanner::validate_structure(&content)?;
        let header = scanner::parse_header(&content)?;

        let schema = header.schema_version.to_uppercase();
        let degraded = !SUPPORTED_SCHEMAS.contains(&schema.as_str());

        let index = EntityScanner::build_index(&content);

        let mut type_index: FxHashMap<IfcType, Vec<EntityId>> = FxHashMap::default();
        let mut type_scanner = EntityScanner::new(&content);
        while let Some((id, type_name, _, _)) = type_scanner.next_entity() {
            type_index
                .entry(IfcType::parse(type_name))
                .or_default()
                .push(EntityId(id));
        }

        let metadata = ModelMetadata {
            schema_version: schema,
            file_name: header.file_name,
            timestamp: header.timestamp,
            originating_system: None,
        };

        let resolver = Arc::new(EntityGraph::with_type_index(content, index, type_index));
        let properties = Arc::new(PropertyIndex::new(
            Arc::clone(&resolver) as Arc<dyn EntityResolver>
        ));

        Ok(Self {
            resolver,
            properties,
            metadata,
            degraded,
        })
    }

    /// Entity graph for resolving references and type queries
    pub fn resolver(&self) -> &Arc<EntityGraph> {
        &self.resolver
    }

    /// Property and quantity reader
    pub fn properties(&self) -> &Arc<PropertyIndex> {
        &self.properties
    }

    /// Header metadata (schema, file name, timestamp)
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// True when the declared schema is outside the supported set
    pub fn degraded(&self) -> bool {
        self.degraded
    }

    /// Total number of indexed entities
    pub fn entity_count(&self) -> usize {
        self.resolver.all_ids().len()
    }
}
