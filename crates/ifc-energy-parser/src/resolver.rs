// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lazily-decoding entity graph implementing `EntityResolver`

use crate::scanner::EntityIndex;
use crate::tokenizer::parse_entity_at;
use ifc_energy_model::{DecodedEntity, EntityId, EntityResolver, IfcType};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe entity graph with lazy decoding
///
/// Entities are decoded from their byte ranges on first access and cached.
/// The graph is read-only for the lifetime of a run, so cached entities are
/// shared freely across threads via `Arc`.
pub struct EntityGraph {
    /// Raw IFC content (owned for thread safety)
    content: String,
    /// Entity ID -> (start, end) byte offsets
    index: EntityIndex,
    /// Decoded entity cache (thread-safe)
    cache: RwLock<FxHashMap<u32, Arc<DecodedEntity>>>,
    /// Type -> entity IDs index, IDs sorted for deterministic iteration
    type_index: FxHashMap<IfcType, Vec<EntityId>>,
}

impl EntityGraph {
    /// Create a graph with a pre-built type index
    pub fn with_type_index(
        content: String,
        index: EntityIndex,
        mut type_index: FxHashMap<IfcType, Vec<EntityId>>,
    ) -> Self {
        for ids in type_index.values_mut() {
            ids.sort_by_key(|id| id.0);
        }

        Self {
            content,
            index,
            cache: RwLock::new(FxHashMap::default()),
            type_index,
        }
    }

    /// Get raw content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Decode and cache an entity
    fn decode_and_cache(&self, id: u32) -> Option<Arc<DecodedEntity>> {
        // Check cache with read lock
        {
            let cache = self.cache.read().ok()?;
            if let Some(cached) = cache.get(&id) {
                return Some(Arc::clone(cached));
            }
        }

        // Get byte offsets
        let (start, end) = self.index.get(&id)?;

        // Parse entity
        let entity = parse_entity_at(&self.content, *start, *end).ok()?;
        let arc = Arc::new(entity);

        // Cache with write lock
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(id, Arc::clone(&arc));
        }

        Some(arc)
    }
}

impl EntityResolver for EntityGraph {
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>> {
        self.decode_and_cache(id.0)
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>> {
        self.type_index
            .get(ifc_type)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.type_index.get(ifc_type).map(|v| v.len()).unwrap_or(0)
    }

    fn all_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.index.keys().map(|&id| EntityId(id)).collect();
        ids.sort_by_key(|id| id.0);
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::EntityScanner;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('guid',$,'Project',$,$,$,$,$,$);
#2=IFCSPACE('guid2',$,'Office 101',$,'OFFICE',$,$,$,.ELEMENT.,.INTERNAL.,$);
#3=IFCSPACE('guid3',$,'Office 102',$,'OFFICE',$,$,$,.ELEMENT.,.INTERNAL.,$);
#4=IFCWALL('guid4',$,'Wall 1',$,$,$,$,$);
ENDSEC;
END-ISO-10303-21;
"#;

    fn graph() -> EntityGraph {
        let index = EntityScanner::build_index(TEST_IFC);
        let mut type_index: FxHashMap<IfcType, Vec<EntityId>> = FxHashMap::default();
        let mut scanner = EntityScanner::new(TEST_IFC);
        while let Some((id, type_name, _, _)) = scanner.next_entity() {
            type_index
                .entry(IfcType::parse(type_name))
                .or_default()
                .push(EntityId(id));
        }
        EntityGraph::with_type_index(TEST_IFC.to_string(), index, type_index)
    }

    #[test]
    fn test_get() {
        let graph = graph();
        let entity = graph.get(EntityId(1)).unwrap();
        assert_eq!(entity.id, EntityId(1));
        assert_eq!(entity.ifc_type, IfcType::IfcProject);
    }

    #[test]
    fn test_entities_by_type_ordered() {
        let graph = graph();
        let spaces = graph.entities_by_type(&IfcType::IfcSpace);
        assert_eq!(spaces.len(), 2);
        assert_eq!(spaces[0].id, EntityId(2));
        assert_eq!(spaces[1].id, EntityId(3));
    }

    #[test]
    fn test_count_by_type() {
        let graph = graph();
        assert_eq!(graph.count_by_type(&IfcType::IfcSpace), 2);
        assert_eq!(graph.count_by_type(&IfcType::IfcRoof), 0);
    }

    #[test]
    fn test_thread_safe() {
        use std::thread;

        let graph = Arc::new(graph());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let graph = Arc::clone(&graph);
                thread::spawn(move || {
                    for id in 1..=4 {
                        let _ = graph.get(EntityId(id));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
