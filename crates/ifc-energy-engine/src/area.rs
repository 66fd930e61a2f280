// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fallback floor-area estimation for spaces without declared quantities

use tracing::debug;

/// Estimate a plausible floor area (m²) from a space's name and type
///
/// Applied only when the model declares no usable area. First match wins:
/// parking spaces before office spaces before the generic default.
pub fn estimate_area(name: &str, space_type: &str) -> f64 {
    let estimated = if name.to_uppercase().contains("PARK") {
        25.0
    } else if space_type == "OFFICE" {
        50.0
    } else {
        20.0
    };

    debug!(name, space_type, estimated, "estimated floor area for space without declared quantity");

    estimated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parking_by_name() {
        assert_eq!(estimate_area("Parking P1", "GENERIC"), 25.0);
        assert_eq!(estimate_area("CAR PARK LEVEL 2", "GENERIC"), 25.0);
        assert_eq!(estimate_area("parkering", "GENERIC"), 25.0);
    }

    #[test]
    fn test_name_beats_type() {
        // Precedence: a parking name wins even for office-typed spaces
        assert_eq!(estimate_area("Parking attendant office", "OFFICE"), 25.0);
    }

    #[test]
    fn test_office_type() {
        assert_eq!(estimate_area("Room 101", "OFFICE"), 50.0);
    }

    #[test]
    fn test_type_match_is_exact() {
        assert_eq!(estimate_area("Room 101", "office"), 20.0);
        assert_eq!(estimate_area("Room 101", "OFFICE_OPEN"), 20.0);
    }

    #[test]
    fn test_generic_default() {
        assert_eq!(estimate_area("Storage", "GENERIC"), 20.0);
        assert_eq!(estimate_area("", ""), 20.0);
    }
}
