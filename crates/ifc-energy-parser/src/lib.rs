// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Energy Parser - STEP/IFC parser backend
//!
//! This crate provides a fast, memory-efficient parser for IFC (STEP) files,
//! producing the entity graph the energy engine extracts building data from.
//!
//! # Features
//!
//! - **Fast tokenization** using `nom` combinators
//! - **SIMD-accelerated scanning** using `memchr`
//! - **Lazy entity decoding** - only parse entities when needed
//! - **Schema gate** - strict mode rejects unsupported schema versions,
//!   lenient mode keeps a degraded graph
//!
//! # Example
//!
//! ```ignore
//! use ifc_energy_parser::ParsedModel;
//!
//! let model = ParsedModel::from_bytes(&bytes)?;
//! let spaces = model.resolver().entities_by_type(&IfcType::IfcSpace);
//! println!("Found {} spaces", spaces.len());
//! ```

mod model;
mod properties;
mod resolver;
mod scanner;
mod tokenizer;

pub use model::{ParsedModel, SUPPORTED_SCHEMAS};
pub use properties::PropertyIndex;
pub use resolver::EntityGraph;
pub use scanner::EntityScanner;
pub use tokenizer::{parse_entity, Token};
