// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model loading

use crate::EntityId;
use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing an IFC byte stream
///
/// Structural errors are fatal: no partial entity graph is ever returned.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Invalid IFC file format (missing magic, truncated sections)
    #[error("Invalid IFC format: {0}")]
    InvalidFormat(String),

    /// Failed to parse header section
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Failed to parse entity
    #[error("Failed to parse entity {0}: {1}")]
    EntityParse(EntityId, String),

    /// Entity not found
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// Input is not valid UTF-8
    #[error("Input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        ParseError::InvalidFormat(msg.into())
    }

    /// Create a new header error
    pub fn header(msg: impl Into<String>) -> Self {
        ParseError::InvalidHeader(msg.into())
    }

    /// Create a new entity parse error
    pub fn entity_parse(id: EntityId, msg: impl Into<String>) -> Self {
        ParseError::EntityParse(id, msg.into())
    }
}

/// The declared schema version is not in the supported set
///
/// Kept separate from [`ParseError`] so callers can distinguish a rejected
/// schema (the file may well be structurally valid) from unparseable input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported schema version: {declared}")]
pub struct SchemaError {
    /// The schema string declared in FILE_SCHEMA
    pub declared: String,
}

impl SchemaError {
    /// Create a new schema error
    pub fn new(declared: impl Into<String>) -> Self {
        Self {
            declared: declared.into(),
        }
    }
}

/// Fatal model-loading errors
///
/// These are the only two conditions that abort a run; everything else
/// degrades gracefully inside the engine.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Unsupported declared schema version
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Structurally invalid input
    #[error(transparent)]
    Parse(#[from] ParseError),
}
