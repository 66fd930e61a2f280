// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for IFC data representation
//!
//! This module defines the fundamental types used throughout the parsing and
//! extraction pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw IFC entity ID (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// IFC entity type enumeration
///
/// Covers the entity kinds the energy engine consumes: spatial structure,
/// envelope elements, property/relationship entities, and the MEP equipment
/// kinds the systems classifier recognizes. Every other type tag is captured
/// as `Unknown` with its original string representation.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IfcType {
    // ========================================================================
    // Spatial Structure
    // ========================================================================
    IfcProject,
    IfcSite,
    IfcBuilding,
    IfcBuildingStorey,
    IfcSpace,

    // ========================================================================
    // Envelope Elements
    // ========================================================================
    IfcWall,
    IfcWallStandardCase,
    IfcCurtainWall,
    IfcWindow,
    IfcDoor,
    IfcSlab,
    IfcRoof,

    // ========================================================================
    // HVAC Equipment
    // ========================================================================
    IfcAirTerminal,
    IfcBoiler,
    IfcChiller,
    IfcFan,
    IfcHeatExchanger,

    // ========================================================================
    // Lighting Equipment
    // ========================================================================
    IfcLightFixture,
    IfcLamp,

    // ========================================================================
    // Electrical Equipment
    // ========================================================================
    IfcElectricDistributionBoard,
    IfcElectricFlowStorageDevice,
    IfcElectricGenerator,
    IfcElectricMotor,

    // ========================================================================
    // Other Building Equipment
    // ========================================================================
    IfcFlowTerminal,
    IfcDistributionElement,
    IfcSanitaryTerminal,
    IfcWasteTerminal,

    // ========================================================================
    // Relationships
    // ========================================================================
    IfcRelAggregates,
    IfcRelContainedInSpatialStructure,
    IfcRelDefinesByProperties,

    // ========================================================================
    // Properties and Quantities
    // ========================================================================
    IfcPropertySet,
    IfcPropertySingleValue,
    IfcElementQuantity,
    IfcQuantityLength,
    IfcQuantityArea,
    IfcQuantityVolume,
    IfcQuantityCount,

    /// Unknown type - stores the original type name string
    Unknown(String),
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Parse a type name string into an IfcType
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            // Spatial structure
            "IFCPROJECT" => IfcType::IfcProject,
            "IFCSITE" => IfcType::IfcSite,
            "IFCBUILDING" => IfcType::IfcBuilding,
            "IFCBUILDINGSTOREY" => IfcType::IfcBuildingStorey,
            "IFCSPACE" => IfcType::IfcSpace,

            // Envelope elements
            "IFCWALL" => IfcType::IfcWall,
            "IFCWALLSTANDARDCASE" => IfcType::IfcWallStandardCase,
            "IFCCURTAINWALL" => IfcType::IfcCurtainWall,
            "IFCWINDOW" => IfcType::IfcWindow,
            "IFCDOOR" => IfcType::IfcDoor,
            "IFCSLAB" => IfcType::IfcSlab,
            "IFCROOF" => IfcType::IfcRoof,

            // HVAC equipment
            "IFCAIRTERMINAL" => IfcType::IfcAirTerminal,
            "IFCBOILER" => IfcType::IfcBoiler,
            "IFCCHILLER" => IfcType::IfcChiller,
            "IFCFAN" => IfcType::IfcFan,
            "IFCHEATEXCHANGER" => IfcType::IfcHeatExchanger,

            // Lighting equipment
            "IFCLIGHTFIXTURE" => IfcType::IfcLightFixture,
            "IFCLAMP" => IfcType::IfcLamp,

            // Electrical equipment
            "IFCELECTRICDISTRIBUTIONBOARD" => IfcType::IfcElectricDistributionBoard,
            "IFCELECTRICFLOWSTORAGEDEVICE" => IfcType::IfcElectricFlowStorageDevice,
            "IFCELECTRICGENERATOR" => IfcType::IfcElectricGenerator,
            "IFCELECTRICMOTOR" => IfcType::IfcElectricMotor,

            // Other building equipment
            "IFCFLOWTERMINAL" => IfcType::IfcFlowTerminal,
            "IFCDISTRIBUTIONELEMENT" => IfcType::IfcDistributionElement,
            "IFCSANITARYTERMINAL" => IfcType::IfcSanitaryTerminal,
            "IFCWASTETERMINAL" => IfcType::IfcWasteTerminal,

            // Relationships
            "IFCRELAGGREGATES" => IfcType::IfcRelAggregates,
            "IFCRELCONTAINEDINSPATIALSTRUCTURE" => IfcType::IfcRelContainedInSpatialStructure,
            "IFCRELDEFINESBYPROPERTIES" => IfcType::IfcRelDefinesByProperties,

            // Properties and quantities
            "IFCPROPERTYSET" => IfcType::IfcPropertySet,
            "IFCPROPERTYSINGLEVALUE" => IfcType::IfcPropertySingleValue,
            "IFCELEMENTQUANTITY" => IfcType::IfcElementQuantity,
            "IFCQUANTITYLENGTH" => IfcType::IfcQuantityLength,
            "IFCQUANTITYAREA" => IfcType::IfcQuantityArea,
            "IFCQUANTITYVOLUME" => IfcType::IfcQuantityVolume,
            "IFCQUANTITYCOUNT" => IfcType::IfcQuantityCount,

            // Unknown
            _ => IfcType::Unknown(s.to_uppercase()),
        }
    }

    /// Get the type name as a string
    pub fn name(&self) -> &str {
        match self {
            IfcType::IfcProject => "IFCPROJECT",
            IfcType::IfcSite => "IFCSITE",
            IfcType::IfcBuilding => "IFCBUILDING",
            IfcType::IfcBuildingStorey => "IFCBUILDINGSTOREY",
            IfcType::IfcSpace => "IFCSPACE",
            IfcType::IfcWall => "IFCWALL",
            IfcType::IfcWallStandardCase => "IFCWALLSTANDARDCASE",
            IfcType::IfcCurtainWall => "IFCCURTAINWALL",
            IfcType::IfcWindow => "IFCWINDOW",
            IfcType::IfcDoor => "IFCDOOR",
            IfcType::IfcSlab => "IFCSLAB",
            IfcType::IfcRoof => "IFCROOF",
            IfcType::IfcAirTerminal => "IFCAIRTERMINAL",
            IfcType::IfcBoiler => "IFCBOILER",
            IfcType::IfcChiller => "IFCCHILLER",
            IfcType::IfcFan => "IFCFAN",
            IfcType::IfcHeatExchanger => "IFCHEATEXCHANGER",
            IfcType::IfcLightFixture => "IFCLIGHTFIXTURE",
            IfcType::IfcLamp => "IFCLAMP",
            IfcType::IfcElectricDistributionBoard => "IFCELECTRICDISTRIBUTIONBOARD",
            IfcType::IfcElectricFlowStorageDevice => "IFCELECTRICFLOWSTORAGEDEVICE",
            IfcType::IfcElectricGenerator => "IFCELECTRICGENERATOR",
            IfcType::IfcElectricMotor => "IFCELECTRICMOTOR",
            IfcType::IfcFlowTerminal => "IFCFLOWTERMINAL",
            IfcType::IfcDistributionElement => "IFCDISTRIBUTIONELEMENT",
            IfcType::IfcSanitaryTerminal => "IFCSANITARYTERMINAL",
            IfcType::IfcWasteTerminal => "IFCWASTETERMINAL",
            IfcType::IfcRelAggregates => "IFCRELAGGREGATES",
            IfcType::IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",
            IfcType::IfcRelDefinesByProperties => "IFCRELDEFINESBYPROPERTIES",
            IfcType::IfcPropertySet => "IFCPROPERTYSET",
            IfcType::IfcPropertySingleValue => "IFCPROPERTYSINGLEVALUE",
            IfcType::IfcElementQuantity => "IFCELEMENTQUANTITY",
            IfcType::IfcQuantityLength => "IFCQUANTITYLENGTH",
            IfcType::IfcQuantityArea => "IFCQUANTITYAREA",
            IfcType::IfcQuantityVolume => "IFCQUANTITYVOLUME",
            IfcType::IfcQuantityCount => "IFCQUANTITYCOUNT",
            IfcType::Unknown(s) => s,
        }
    }

    /// Check if this type is a spatial structure element
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            IfcType::IfcProject
                | IfcType::IfcSite
                | IfcType::IfcBuilding
                | IfcType::IfcBuildingStorey
                | IfcType::IfcSpace
        )
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded attribute value
///
/// Represents any value that can appear in an IFC entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_float(),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Enum(s) => match s.to_uppercase().as_str() {
                "TRUE" | "T" => Some(true),
                "FALSE" | "F" => Some(false),
                _ => None,
            },
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_bool(),
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

/// Decoded IFC entity
///
/// Represents a fully decoded IFC entity with its ID, type, and attribute values.
#[derive(Clone, Debug)]
pub struct DecodedEntity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Attribute values in order
    pub attributes: Vec<AttributeValue>,
}

impl DecodedEntity {
    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Get entity reference at index
    pub fn get_ref(&self, index: usize) -> Option<EntityId> {
        self.get(index).and_then(|v| v.as_entity_ref())
    }

    /// Get string at index
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_string())
    }

    /// Get float at index
    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|v| v.as_float())
    }

    /// Get enum string at index
    pub fn get_enum(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_enum())
    }

    /// Get list at index
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Get list of entity references at index
    pub fn get_refs(&self, index: usize) -> Option<Vec<EntityId>> {
        self.get_list(index)
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
    }
}

/// Model metadata extracted from the IFC header
#[derive(Clone, Debug, Default)]
pub struct ModelMetadata {
    /// IFC schema version (e.g., "IFC2X3", "IFC4", "IFC4X3")
    pub schema_version: String,
    /// File name from header
    pub file_name: Option<String>,
    /// Timestamp
    pub timestamp: Option<String>,
    /// Originating system (CAD application)
    pub originating_system: Option<String>,
}
