// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PropertyReader implementation backed by a relationship cache

use ifc_energy_model::{
    AttributeValue, DecodedEntity, EntityId, EntityResolver, IfcType, Property, PropertyReader,
    PropertySet, PropertyValue, Quantity, QuantitySet, QuantityType,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Property and quantity index
///
/// Built once per parse from IFCRELDEFINESBYPROPERTIES relationships; the
/// graph is read-only afterwards, so lookups are stable for the whole run.
pub struct PropertyIndex {
    /// Reference to resolver for entity lookups
    resolver: Arc<dyn EntityResolver>,
    /// Cache: entity ID -> property set IDs
    pset_cache: FxHashMap<u32, Vec<EntityId>>,
    /// Cache: entity ID -> quantity set IDs
    qset_cache: FxHashMap<u32, Vec<EntityId>>,
}

impl PropertyIndex {
    /// Build the index from the entity graph
    pub fn new(resolver: Arc<dyn EntityResolver>) -> Self {
        let mut pset_cache: FxHashMap<u32, Vec<EntityId>> = FxHashMap::default();
        let mut qset_cache: FxHashMap<u32, Vec<EntityId>> = FxHashMap::default();

        for rel in resolver.entities_by_type(&IfcType::IfcRelDefinesByProperties) {
            // RelatedObjects at index 4, RelatingPropertyDefinition at index 5
            let related_ids = match rel.get(4) {
                Some(AttributeValue::List(list)) => list
                    .iter()
                    .filter_map(|v| v.as_entity_ref())
                    .collect::<Vec<_>>(),
                _ => continue,
            };

            let pset_id = match rel.get_ref(5) {
                Some(id) => id,
                None => continue,
            };

            if let Some(pset) = resolver.get(pset_id) {
                let cache = match pset.ifc_type {
                    IfcType::IfcPropertySet => &mut pset_cache,
                    IfcType::IfcElementQuantity => &mut qset_cache,
                    _ => continue,
                };

                for related_id in related_ids {
                    cache.entry(related_id.0).or_default().push(pset_id);
                }
            }
        }

        // Deterministic set ordering regardless of relationship order
        for ids in pset_cache.values_mut().chain(qset_cache.values_mut()) {
            ids.sort_by_key(|id| id.0);
        }

        Self {
            resolver,
            pset_cache,
            qset_cache,
        }
    }

    /// Extract properties from an IfcPropertySet entity
    fn extract_properties(&self, pset: &DecodedEntity) -> Vec<Property> {
        let mut properties = Vec::new();

        // HasProperties at index 4
        let prop_refs = match pset.get(4) {
            Some(AttributeValue::List(list)) => list,
            _ => return properties,
        };

        for prop_ref in prop_refs {
            if let AttributeValue::EntityRef(prop_id) = prop_ref {
                if let Some(prop_entity) = self.resolver.get(*prop_id) {
                    if let Some(prop) = extract_single_value(&prop_entity) {
                        properties.push(prop);
                    }
                }
            }
        }

        properties
    }

    /// Extract quantities from an IfcElementQuantity entity
    fn extract_quantities(&self, qset: &DecodedEntity) -> Vec<Quantity> {
        let mut quantities = Vec::new();

        // Quantities at index 5
        let qty_refs = match qset.get(5) {
            Some(AttributeValue::List(list)) => list,
            _ => return quantities,
        };

        for qty_ref in qty_refs {
            if let AttributeValue::EntityRef(qty_id) = qty_ref {
                if let Some(qty_entity) = self.resolver.get(*qty_id) {
                    if let Some(qty) = extract_single_quantity(&qty_entity) {
                        quantities.push(qty);
                    }
                }
            }
        }

        quantities
    }
}

/// Extract a property from an IfcPropertySingleValue entity
fn extract_single_value(prop: &DecodedEntity) -> Option<Property> {
    if prop.ifc_type != IfcType::IfcPropertySingleValue {
        return None;
    }

    // Name at index 0, NominalValue at index 2
    let name = prop.get_string(0)?.to_string();
    let value = to_property_value(prop.get(2)?)?;
    Some(Property::new(name, value))
}

/// Narrow an attribute value to a typed property value
///
/// Nulls yield `None` (the property is simply absent); unrecognized shapes
/// are skipped rather than stringified.
fn to_property_value(attr: &AttributeValue) -> Option<PropertyValue> {
    match attr {
        AttributeValue::String(s) => Some(PropertyValue::Text(s.clone())),
        AttributeValue::Float(f) => Some(PropertyValue::Number(*f)),
        AttributeValue::Integer(i) => Some(PropertyValue::Number(*i as f64)),
        AttributeValue::Bool(b) => Some(PropertyValue::Boolean(*b)),
        AttributeValue::Enum(e) => match e.to_uppercase().as_str() {
            "TRUE" | "T" => Some(PropertyValue::Boolean(true)),
            "FALSE" | "F" => Some(PropertyValue::Boolean(false)),
            _ => Some(PropertyValue::Text(e.clone())),
        },
        AttributeValue::TypedValue(_, args) if !args.is_empty() => to_property_value(&args[0]),
        _ => None,
    }
}

/// Extract a quantity from an IfcQuantity* entity
fn extract_single_quantity(qty: &DecodedEntity) -> Option<Quantity> {
    // Name at index 0, value at index 3
    let name = qty.get_string(0)?.to_string();

    let (value, quantity_type) = match qty.ifc_type {
        IfcType::IfcQuantityLength => (qty.get_float(3)?, QuantityType::Length),
        IfcType::IfcQuantityArea => (qty.get_float(3)?, QuantityType::Area),
        IfcType::IfcQuantityVolume => (qty.get_float(3)?, QuantityType::Volume),
        IfcType::IfcQuantityCount => (qty.get_float(3)?, QuantityType::Count),
        _ => return None,
    };

    Some(Quantity::new(name, value, quantity_type))
}

impl PropertyReader for PropertyIndex {
    fn property_sets(&self, id: EntityId) -> Vec<PropertySet> {
        let pset_ids = match self.pset_cache.get(&id.0) {
            Some(ids) => ids,
            None => return Vec::new(),
        };

        let mut result = Vec::new();

        for pset_id in pset_ids {
            if let Some(pset) = self.resolver.get(*pset_id) {
                // Name at index 2
                let name = pset.get_string(2).unwrap_or_default().to_string();
                let properties = self.extract_properties(&pset);

                if !properties.is_empty() {
                    result.push(PropertySet { name, properties });
                }
            }
        }

        result
    }

    fn quantity_sets(&self, id: EntityId) -> Vec<QuantitySet> {
        let qset_ids = match self.qset_cache.get(&id.0) {
            Some(ids) => ids,
            None => return Vec::new(),
        };

        let mut result = Vec::new();

        for qset_id in qset_ids {
            if let Some(qset) = self.resolver.get(*qset_id) {
                // Name at index 2
                let name = qset.get_string(2).unwrap_or_default().to_string();
                let quantities = self.extract_quantities(&qset);

                if !quantities.is_empty() {
                    result.push(QuantitySet { name, quantities });
                }
            }
        }

        result
    }

    fn global_id(&self, id: EntityId) -> Option<String> {
        let entity = self.resolver.get(id)?;
        // GlobalId at index 0 for rooted entities
        entity.get_string(0).map(|s| s.to_string())
    }

    fn name(&self, id: EntityId) -> Option<String> {
        let entity = self.resolver.get(id)?;
        // Name at index 2 for rooted entities
        entity.get_string(2).map(|s| s.to_string())
    }

    fn description(&self, id: EntityId) -> Option<String> {
        let entity = self.resolver.get(id)?;
        // Description at index 3
        entity.get_string(3).map(|s| s.to_string())
    }

    fn object_type(&self, id: EntityId) -> Option<String> {
        let entity = self.resolver.get(id)?;
        // ObjectType at index 4
        entity.get_string(4).map(|s| s.to_string())
    }
}
