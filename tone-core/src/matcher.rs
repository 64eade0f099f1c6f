//! # Special-Frequency Matcher Module
//!
//! Decides whether a continuously-varied frequency is close enough to a
//! catalog entry to snap to it. Both slider widgets run every input value
//! through this check.

use crate::catalog::Frequency;

/// Half-width of the snap band around each catalog entry, in Hz.
///
/// A value matches an entry when its absolute distance to the entry's `hz`
/// is strictly less than this tolerance.
pub const SNAP_TOLERANCE_HZ: f64 = 2.0;

/// Finds the special frequency the given value should snap to, if any.
///
/// Scans the catalog in insertion order and returns the *first* entry within
/// tolerance. When two entries sit within tolerance of the same input, the
/// one listed earlier in the catalog wins even if the other is numerically
/// closer - widgets and display pages rely on this ordering.
///
/// # Arguments
/// * `entries` - Catalog entries in insertion order
/// * `hz` - Input frequency in Hz
///
/// # Returns
/// * `Some(&Frequency)` - The entry to snap to
/// * `None` - No entry within tolerance
pub fn find_special(entries: &[Frequency], hz: f64) -> Option<&Frequency> {
    entries.iter().find(|f| (f.hz - hz).abs() < SNAP_TOLERANCE_HZ)
}

/// Whether applying a match would actually change the value.
///
/// An input sitting exactly on the entry's `hz` still matches, but the snap
/// is a no-op: callers skip the redundant frequency push in that case.
pub fn needs_snap(entry: &Frequency, hz: f64) -> bool {
    entry.hz != hz
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category, Frequency, Location};

    fn tone(id: &str, hz: f64) -> Frequency {
        Frequency {
            id: id.to_string(),
            name: id.to_string(),
            hz,
            description: String::new(),
            benefits: Vec::new(),
            origin: String::new(),
            location: Location {
                name: "Nowhere".to_string(),
                lat: 0.0,
                lng: 0.0,
            },
            image_url: String::new(),
            category: Category::Scientific,
            color: "#FFFFFF".to_string(),
            references: Vec::new(),
        }
    }

    #[test]
    fn test_exact_value_matches_and_needs_no_snap() {
        let catalog = Catalog::curated();
        let m = find_special(catalog.entries(), 528.0).expect("528 is curated");
        assert_eq!(m.id, "528hz");
        assert!(!needs_snap(m, 528.0));
    }

    #[test]
    fn test_near_value_requests_snap() {
        let catalog = Catalog::curated();
        let m = find_special(catalog.entries(), 433.5).expect("within band of 432");
        assert_eq!(m.hz, 432.0);
        assert!(needs_snap(m, 433.5));
    }

    #[test]
    fn test_tolerance_is_strict() {
        let catalog = Catalog::curated();
        assert!(find_special(catalog.entries(), 530.0).is_none());
        assert!(find_special(catalog.entries(), 529.9).is_some());
    }

    #[test]
    fn test_tie_break_is_catalog_order_not_nearest() {
        // Two entries within tolerance of the same input: the earlier one
        // wins even though the later one is numerically closer.
        let entries = vec![tone("a", 430.0), tone("b", 431.0)];
        let m = find_special(&entries, 430.9).unwrap();
        assert_eq!(m.id, "a");
    }

    #[test]
    fn test_no_match_far_from_everything() {
        let catalog = Catalog::curated();
        assert!(find_special(catalog.entries(), 250.0).is_none());
    }
}
