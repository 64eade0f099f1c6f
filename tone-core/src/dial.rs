//! # Rotary Dial Controller Module
//!
//! Geometry and control logic behind the rotary frequency dial: pointer
//! coordinates become an angle on a 270-degree arc, the angle becomes a
//! whole-Hz frequency, and values near a catalog tone snap immediately,
//! with no debounce.
//!
//! Angles are measured clockwise in degrees with zero at twelve o'clock,
//! so the usable sweep runs from the top, through right and bottom, to the
//! left; the top-left quadrant is the dead zone.

use crate::catalog::Frequency;
use crate::matcher::{SNAP_TOLERANCE_HZ, find_special, needs_snap};
use crate::{MAX_FREQUENCY, MIN_FREQUENCY};

/// Length of the usable sweep in degrees.
pub const DIAL_ARC_DEGREES: f64 = 270.0;

/// Hz per degree of rotation over the sweep.
const HZ_PER_DEGREE: f64 = (MAX_FREQUENCY - MIN_FREQUENCY) / DIAL_ARC_DEGREES;

/// Converts a pointer position to the dial's angle.
///
/// `atan2` of the pointer relative to the dial center, rotated by +90 so
/// zero sits at the top, normalized to [0, 360).
///
/// # Arguments
/// * `center` - Dial center in widget coordinates (x, y)
/// * `point` - Pointer position in the same coordinates
pub fn angle_from_pointer(center: (f64, f64), point: (f64, f64)) -> f64 {
    let dx = point.0 - center.0;
    let dy = point.1 - center.1;
    let mut degrees = dy.atan2(dx).to_degrees() + 90.0;
    if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees % 360.0
}

/// Clamps an angle onto the usable arc.
///
/// Readings in the dead zone collapse to the nearest boundary by angular
/// distance: past 315 degrees they wrap to 0, otherwise they pin at 270.
/// The indicator therefore never crosses the dead zone to the far side.
pub fn clamp_to_arc(degrees: f64) -> f64 {
    if degrees > DIAL_ARC_DEGREES {
        if degrees > DIAL_ARC_DEGREES + 45.0 {
            0.0
        } else {
            DIAL_ARC_DEGREES
        }
    } else {
        degrees
    }
}

/// Maps an on-arc angle to a whole-Hz frequency.
pub fn angle_to_frequency(degrees: f64) -> f64 {
    (MIN_FREQUENCY + degrees * HZ_PER_DEGREE).round()
}

/// Maps a frequency to its angle on the arc.
pub fn frequency_to_angle(hz: f64) -> f64 {
    ((hz - MIN_FREQUENCY) / (MAX_FREQUENCY - MIN_FREQUENCY)) * DIAL_ARC_DEGREES
}

/// Result of one pointer update: what to push to the tone engine, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialUpdate {
    /// The frequency read off the pointer angle, pushed first.
    pub raw: f64,
    /// The snapped catalog value, pushed right after when a snap applied.
    pub snapped: Option<f64>,
}

/// A marker on the dial face for one catalog tone.
#[derive(Debug, Clone, PartialEq)]
pub struct DialMarker {
    pub hz: f64,
    pub angle: f64,
    /// Whether the dial currently sits within tolerance of this tone.
    pub active: bool,
}

/// State machine for the rotary dial.
///
/// `Idle -> Dragging -> Idle`; snapping happens synchronously inside the
/// drag, every tracked move.
#[derive(Debug, Clone)]
pub struct RotaryDialController {
    frequency: f64,
    rotation: f64,
    matched: Option<Frequency>,
    dragging: bool,
}

impl RotaryDialController {
    /// Creates a controller with the indicator at the given frequency.
    pub fn new(initial_hz: f64, entries: &[Frequency]) -> Self {
        let frequency = initial_hz.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        Self {
            frequency,
            rotation: frequency_to_angle(frequency),
            matched: find_special(entries, frequency).cloned(),
            dragging: false,
        }
    }

    /// Starts tracking a drag. Paired with [`RotaryDialController::end_drag`].
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Stops tracking. The widget unregisters its global cursor tracking
    /// at the same time, so the pairing is enforced in one place.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Applies one pointer reading during a drag.
    ///
    /// Convenience over [`RotaryDialController::apply_angle`] for callers
    /// that have raw coordinates rather than an angle.
    pub fn pointer_update(
        &mut self,
        center: (f64, f64),
        point: (f64, f64),
        entries: &[Frequency],
    ) -> DialUpdate {
        let angle = clamp_to_arc(angle_from_pointer(center, point));
        self.apply_angle(angle, entries)
    }

    /// Applies an on-arc angle: updates rotation and frequency, then snaps
    /// immediately when within tolerance of a catalog tone.
    ///
    /// # Returns
    /// The raw frequency to push to the engine, plus the snapped value to
    /// push right after it when a snap applied (both in [`DialUpdate`]).
    pub fn apply_angle(&mut self, angle: f64, entries: &[Frequency]) -> DialUpdate {
        self.rotation = angle;
        let raw = angle_to_frequency(angle);
        self.frequency = raw;
        self.matched = find_special(entries, raw).cloned();

        let mut snapped = None;
        if let Some(m) = &self.matched {
            if needs_snap(m, raw) {
                self.frequency = m.hz;
                self.rotation = frequency_to_angle(m.hz);
                snapped = Some(m.hz);
            }
        }
        DialUpdate { raw, snapped }
    }

    /// Jumps the dial to an exact frequency (preset buttons, host sync).
    pub fn set_frequency(&mut self, hz: f64, entries: &[Frequency]) {
        let hz = hz.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        self.frequency = hz;
        self.rotation = frequency_to_angle(hz);
        self.matched = find_special(entries, hz).cloned();
    }

    /// Marker layout for the dial face, one per catalog tone.
    pub fn markers(&self, entries: &[Frequency]) -> Vec<DialMarker> {
        entries
            .iter()
            .map(|f| DialMarker {
                hz: f.hz,
                angle: frequency_to_angle(f.hz),
                active: (f.hz - self.frequency).abs() < SNAP_TOLERANCE_HZ,
            })
            .collect()
    }

    /// Current (possibly snapped) frequency.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Indicator rotation in degrees on the arc.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Whether the dial sits within tolerance of a catalog tone.
    pub fn is_at_special(&self) -> bool {
        self.matched.is_some()
    }

    /// The matched catalog tone, if any.
    pub fn matched(&self) -> Option<&Frequency> {
        self.matched.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_arc_endpoints_map_to_range_bounds() {
        assert_eq!(angle_to_frequency(0.0), 100.0);
        assert_eq!(angle_to_frequency(270.0), 1000.0);
        assert_eq!(angle_to_frequency(135.0), 550.0);
    }

    #[test]
    fn test_angle_roundtrip() {
        for hz in [100.0, 432.0, 528.0, 1000.0] {
            assert_eq!(angle_to_frequency(frequency_to_angle(hz)), hz);
        }
    }

    #[test]
    fn test_pointer_angle_quadrants() {
        let center = (0.0, 0.0);
        // Twelve o'clock is zero, then clockwise.
        assert_eq!(angle_from_pointer(center, (0.0, -1.0)), 0.0);
        assert_eq!(angle_from_pointer(center, (1.0, 0.0)), 90.0);
        assert_eq!(angle_from_pointer(center, (0.0, 1.0)), 180.0);
        assert_eq!(angle_from_pointer(center, (-1.0, 0.0)), 270.0);
    }

    #[test]
    fn test_dead_zone_clamps_to_nearest_boundary() {
        assert_eq!(clamp_to_arc(280.0), 270.0);
        assert_eq!(clamp_to_arc(315.0), 270.0);
        assert_eq!(clamp_to_arc(316.0), 0.0);
        assert_eq!(clamp_to_arc(359.0), 0.0);
        // On-arc values pass through untouched.
        assert_eq!(clamp_to_arc(0.0), 0.0);
        assert_eq!(clamp_to_arc(200.0), 200.0);
        assert_eq!(clamp_to_arc(270.0), 270.0);
    }

    #[test]
    fn test_snap_is_immediate_and_updates_rotation() {
        let catalog = Catalog::curated();
        let mut dial = RotaryDialController::new(432.0, catalog.entries());
        dial.begin_drag();

        // 128.1 degrees reads as 527 Hz, inside the band of 528.
        let update = dial.apply_angle(128.1, catalog.entries());
        assert_eq!(update.raw, 527.0);
        assert_eq!(update.snapped, Some(528.0));
        assert_eq!(dial.frequency(), 528.0);
        assert_eq!(dial.rotation(), frequency_to_angle(528.0));
        assert!(dial.is_at_special());
    }

    #[test]
    fn test_exact_angle_needs_no_second_push() {
        let catalog = Catalog::curated();
        let mut dial = RotaryDialController::new(432.0, catalog.entries());

        let update = dial.apply_angle(frequency_to_angle(528.0), catalog.entries());
        assert_eq!(update.raw, 528.0);
        assert_eq!(update.snapped, None);
    }

    #[test]
    fn test_pointer_update_tracks_quadrant() {
        let catalog = Catalog::curated();
        let mut dial = RotaryDialController::new(432.0, catalog.entries());
        dial.begin_drag();

        // Pointer straight below the center: 180 degrees -> 700 Hz.
        let update = dial.pointer_update((50.0, 50.0), (50.0, 90.0), catalog.entries());
        assert_eq!(update.raw, 700.0);
        dial.end_drag();
        assert!(!dial.is_dragging());
    }

    #[test]
    fn test_set_frequency_jumps_indicator() {
        let catalog = Catalog::curated();
        let mut dial = RotaryDialController::new(174.0, catalog.entries());
        dial.set_frequency(528.0, catalog.entries());
        assert_eq!(dial.frequency(), 528.0);
        assert_eq!(dial.rotation(), frequency_to_angle(528.0));
        assert!(dial.is_at_special());
    }

    #[test]
    fn test_markers_follow_catalog_and_highlight() {
        let catalog = Catalog::curated();
        let dial = RotaryDialController::new(528.0, catalog.entries());
        let markers = dial.markers(catalog.entries());

        assert_eq!(markers.len(), catalog.entries().len());
        let active: Vec<_> = markers.iter().filter(|m| m.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].hz, 528.0);
    }
}
