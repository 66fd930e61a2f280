// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fast entity scanner using SIMD-accelerated byte searching
//!
//! Scans IFC files to discover entity boundaries without full parsing, and
//! validates the overall STEP file structure.

use ifc_energy_model::{ParseError, Result};
use memchr::memchr;
use rustc_hash::FxHashMap;

/// Entity index mapping ID to byte offsets
pub type EntityIndex = FxHashMap<u32, (usize, usize)>;

/// Validate the STEP physical-file framing
///
/// Rejects input missing the ISO-10303-21 magic, the DATA section, or the
/// end-of-file marker (truncated upload). No partial graph is built when
/// this fails.
pub fn validate_structure(content: &str) -> Result<()> {
    if !content.trim_start().starts_with("ISO-10303-21;") {
        return Err(ParseError::format("missing ISO-10303-21 magic"));
    }
    if !content.contains("DATA;") {
        return Err(ParseError::format("missing DATA section"));
    }
    if !content.contains("END-ISO-10303-21") {
        return Err(ParseError::format("truncated file: missing end marker"));
    }
    Ok(())
}

/// Fast entity scanner for IFC files
///
/// Uses memchr for SIMD-accelerated scanning to quickly find entity
/// boundaries without full parsing.
pub struct EntityScanner<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> EntityScanner<'a> {
    /// Create a new scanner for the given content
    pub fn new(content: &'a str) -> Self {
        // Skip header section (find DATA; line)
        let pos = content.find("DATA;").map(|p| p + 5).unwrap_or(0);

        Self { content, pos }
    }

    /// Scan to find the next entity
    ///
    /// Returns (id, type_name, start_byte, end_byte)
    pub fn next_entity(&mut self) -> Option<(u32, &'a str, usize, usize)> {
        let bytes = self.content.as_bytes();

        while self.pos < bytes.len() {
            // Use memchr for fast # search
            let hash_pos = memchr(b'#', &bytes[self.pos..])?;
            self.pos += hash_pos;

            // Entity definitions start at the beginning of a line (or right
            // after the previous entity's semicolon); a # elsewhere is a
            // reference inside an attribute list.
            let is_entity_start = self.pos == 0
                || bytes[self.pos - 1] == b'\n'
                || bytes[self.pos - 1] == b'\r'
                || bytes[self.pos - 1] == b';';

            if !is_entity_start {
                self.pos += 1;
                continue;
            }

            let start = self.pos;

            // Parse entity ID
            self.pos += 1; // Skip #
            let id_start = self.pos;

            while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }

            if self.pos == id_start {
                // No digits found
                continue;
            }

            let id: u32 = self.content[id_start..self.pos].parse().ok()?;

            // Skip whitespace and =
            while self.pos < bytes.len() && (bytes[self.pos] == b' ' || bytes[self.pos] == b'\t') {
                self.pos += 1;
            }

            if self.pos >= bytes.len() || bytes[self.pos] != b'=' {
                continue;
            }
            self.pos += 1; // Skip =

            while self.pos < bytes.len() && (bytes[self.pos] == b' ' || bytes[self.pos] == b'\t') {
                self.pos += 1;
            }

            // Parse type name
            let type_start = self.pos;
            while self.pos < bytes.len()
                && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
            {
                self.pos += 1;
            }

            if self.pos == type_start {
                continue;
            }

            let type_name = &self.content[type_start..self.pos];

            // Find end of entity (semicolon, but handle strings)
            let end = self.find_entity_end()?;

            return Some((id, type_name, start, end));
        }

        None
    }

    /// Find the end of an entity (semicolon), handling quoted strings
    fn find_entity_end(&mut self) -> Option<usize> {
        let bytes = self.content.as_bytes();
        let mut in_string = false;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\'' => {
                    // Check for escaped quote ''
                    if in_string && self.pos + 1 < bytes.len() && bytes[self.pos + 1] == b'\'' {
                        self.pos += 2;
                        continue;
                    }
                    in_string = !in_string;
                }
                b';' if !in_string => {
                    self.pos += 1;
                    return Some(self.pos);
                }
                _ => {}
            }
            self.pos += 1;
        }

        None
    }

    /// Build an index of all entities (ID -> byte offsets)
    pub fn build_index(content: &'a str) -> EntityIndex {
        let mut scanner = Self::new(content);
        let mut index = FxHashMap::default();

        while let Some((id, _, start, end)) = scanner.next_entity() {
            index.insert(id, (start, end));
        }

        index
    }
}

/// Header information extracted from an IFC file
#[derive(Clone, Debug, Default)]
pub struct HeaderInfo {
    pub schema_version: String,
    pub file_name: Option<String>,
    pub timestamp: Option<String>,
}

/// Parse the header section to extract schema and file metadata
///
/// A missing or empty FILE_SCHEMA is a header error; everything else in the
/// header is optional.
pub fn parse_header(content: &str) -> Result<HeaderInfo> {
    let header_start = content
        .find("HEADER;")
        .ok_or_else(|| ParseError::header("missing HEADER section"))?;
    let header_end = content[header_start..]
        .find("ENDSEC;")
        .map(|p| header_start + p)
        .unwrap_or(content.len());
    let header = &content[header_start..header_end];

    let mut info = HeaderInfo::default();

    // FILE_SCHEMA(('IFC4'));
    let schema_start = header
        .find("FILE_SCHEMA")
        .ok_or_else(|| ParseError::header("missing FILE_SCHEMA"))?;
    if let Some((schema, _)) = next_quoted(&header[schema_start..]) {
        info.schema_version = schema;
    }
    if info.schema_version.is_empty() {
        return Err(ParseError::header("empty FILE_SCHEMA"));
    }

    // FILE_NAME(name, timestamp, author, organization, ...)
    if let Some(name_start) = header.find("FILE_NAME") {
        if let Some((file_name, rest)) = next_quoted(&header[name_start..]) {
            info.file_name = Some(file_name);
            if let Some((timestamp, _)) = next_quoted(rest) {
                info.timestamp = Some(timestamp);
            }
        }
    }

    Ok(info)
}

/// Find the next quoted string ('value'), un-escaping doubled quotes
fn next_quoted(s: &str) -> Option<(String, &str)> {
    let open = s.find('\'')?;
    let rest = &s[open + 1..];
    let bytes = rest.as_bytes();

    let mut end = 0;
    while end < bytes.len() {
        if bytes[end] == b'\'' {
            if end + 1 < bytes.len() && bytes[end + 1] == b'\'' {
                end += 2;
                continue;
            }
            break;
        }
        end += 1;
    }

    let value = rest[..end].replace("''", "'");
    Some((value, &rest[end + 1..]))
}
