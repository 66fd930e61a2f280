// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property and quantity access for IFC entities

use crate::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed property value
///
/// IFC property sets are duck-typed bundles; values are narrowed to the
/// three shapes the engine cares about. Serializes untagged so reports
/// carry plain JSON scalars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean value
    Boolean(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
}

impl PropertyValue {
    /// Try to get as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A single named property
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Property value
    pub value: PropertyValue,
}

impl Property {
    /// Create a new property
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A property set containing multiple properties
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    /// Property set name (e.g., "Pset_SpaceCommon")
    pub name: String,
    /// Properties in this set
    pub properties: Vec<Property>,
}

impl PropertySet {
    /// Create a new property set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Get a property by name
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Collect the properties into an attribute map
    pub fn to_map(&self) -> BTreeMap<String, PropertyValue> {
        self.properties
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }
}

/// Quantity kinds supported in IFC
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityType {
    /// Linear measurement (IfcQuantityLength)
    Length,
    /// Area measurement (IfcQuantityArea)
    Area,
    /// Volume measurement (IfcQuantityVolume)
    Volume,
    /// Count (IfcQuantityCount)
    Count,
}

/// A measured quantity value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Quantity name
    pub name: String,
    /// Numeric value
    pub value: f64,
    /// Kind of quantity
    pub quantity_type: QuantityType,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(name: impl Into<String>, value: f64, quantity_type: QuantityType) -> Self {
        Self {
            name: name.into(),
            value,
            quantity_type,
        }
    }
}

/// A named quantity set (IfcElementQuantity)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantitySet {
    /// Quantity set name (e.g., "Qto_SpaceBaseQuantities")
    pub name: String,
    /// Quantities in this set
    pub quantities: Vec<Quantity>,
}

impl QuantitySet {
    /// Get a quantity by name
    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.quantities.iter().find(|q| q.name == name)
    }
}

/// Property and quantity reader
///
/// Provides access to property sets (IfcPropertySet linked via
/// IfcRelDefinesByProperties) and quantity sets (IfcElementQuantity)
/// attached to entities. A missing bundle is never an error: the named
/// lookups return empty maps. The underlying graph is read-only during a
/// run, so repeated lookups for the same entity/set pair are identical.
pub trait PropertyReader: Send + Sync {
    /// Get all property sets associated with an entity (empty if none)
    fn property_sets(&self, id: EntityId) -> Vec<PropertySet>;

    /// Get all quantity sets associated with an entity (empty if none)
    fn quantity_sets(&self, id: EntityId) -> Vec<QuantitySet>;

    /// Resolve a named property set to an attribute map
    ///
    /// Exact, case-sensitive match on the declared set name. Returns an
    /// empty map when the entity has no bundle under that name.
    fn property_set(&self, id: EntityId, set_name: &str) -> BTreeMap<String, PropertyValue> {
        self.property_sets(id)
            .into_iter()
            .find(|pset| pset.name == set_name)
            .map(|pset| pset.to_map())
            .unwrap_or_default()
    }

    /// Resolve a named quantity set to a name → value map
    ///
    /// Exact, case-sensitive match; empty map on miss.
    fn quantity_set(&self, id: EntityId, set_name: &str) -> BTreeMap<String, f64> {
        self.quantity_sets(id)
            .into_iter()
            .find(|qset| qset.name == set_name)
            .map(|qset| {
                qset.quantities
                    .into_iter()
                    .map(|q| (q.name, q.value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get a specific quantity by name, searching all quantity sets
    fn get_quantity(&self, id: EntityId, name: &str) -> Option<Quantity> {
        self.quantity_sets(id)
            .into_iter()
            .flat_map(|qset| qset.quantities)
            .find(|q| q.name == name)
    }

    /// Get entity's GlobalId (GUID)
    fn global_id(&self, id: EntityId) -> Option<String>;

    /// Get entity's Name attribute
    fn name(&self, id: EntityId) -> Option<String>;

    /// Get entity's Description attribute
    fn description(&self, id: EntityId) -> Option<String>;

    /// Get entity's ObjectType attribute
    fn object_type(&self, id: EntityId) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_to_map() {
        let mut pset = PropertySet::new("Pset_SpaceCommon");
        pset.properties
            .push(Property::new("IsExternal", PropertyValue::Boolean(false)));
        pset.properties
            .push(Property::new("Category", PropertyValue::Text("OFFICE".into())));

        let map = pset.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["IsExternal"], PropertyValue::Boolean(false));
    }

    #[test]
    fn test_property_value_untagged_json() {
        let json = serde_json::to_string(&PropertyValue::Number(42.5)).unwrap();
        assert_eq!(json, "42.5");
        let json = serde_json::to_string(&PropertyValue::Text("A".into())).unwrap();
        assert_eq!(json, "\"A\"");
    }
}
