//! # Linear Slider Controller Module
//!
//! Control logic behind the horizontal frequency slider: clamping, the
//! immediate audio push on every drag step, and the debounced snap onto a
//! nearby catalog frequency.
//!
//! Timing is driven by `Instant` values passed in by the caller (the GUI's
//! tick, or a test), so the debounce is deterministic and teardown can
//! always cancel it.

use std::time::{Duration, Instant};

use crate::catalog::Frequency;
use crate::matcher::{find_special, needs_snap};
use crate::{MAX_FREQUENCY, MIN_FREQUENCY};

/// How long the input has to pause near a special frequency before the
/// value snaps onto it. Restarted by every new input (debounce, not
/// throttle), so dragging straight through a tone never snaps.
pub const SNAP_DEBOUNCE: Duration = Duration::from_millis(100);

/// How long the snapping highlight stays on after a snap. Display only -
/// the audio is already exact when the window opens.
pub const SNAP_DISPLAY: Duration = Duration::from_millis(300);

/// State machine for the linear frequency slider.
///
/// `Idle -> Dragging -> SnapPending -> Snapped -> Idle`; the pending state
/// is the armed `snap_deadline`, the snapped state the `snapping_until`
/// display window.
#[derive(Debug, Clone)]
pub struct LinearSliderController {
    frequency: f64,
    matched: Option<Frequency>,
    snap_deadline: Option<Instant>,
    snapping_until: Option<Instant>,
}

impl LinearSliderController {
    /// Creates a controller at the given frequency.
    ///
    /// The matcher runs once so an initial value sitting on a catalog tone
    /// is highlighted, but no snap is armed - snapping is input-driven.
    pub fn new(initial_hz: f64, entries: &[Frequency]) -> Self {
        let frequency = initial_hz.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        Self {
            frequency,
            matched: find_special(entries, frequency).cloned(),
            snap_deadline: None,
            snapping_until: None,
        }
    }

    /// Feeds one raw input value from the widget.
    ///
    /// Clamps to the slider's range, records the value, and re-evaluates
    /// the match. A previously armed snap is always cancelled first; a new
    /// one is armed only when the value is within tolerance of a catalog
    /// tone without being exactly on it.
    ///
    /// # Arguments
    /// * `raw_hz` - Unclamped value from the drag position
    /// * `entries` - Catalog entries for the matcher
    /// * `now` - Current time, used to arm the debounce deadline
    ///
    /// # Returns
    /// The clamped frequency to push to the tone engine immediately, so
    /// audio tracks the drag without waiting for the debounce.
    pub fn input(&mut self, raw_hz: f64, entries: &[Frequency], now: Instant) -> f64 {
        let hz = raw_hz.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        self.frequency = hz;
        self.snap_deadline = None;
        self.matched = find_special(entries, hz).cloned();
        if let Some(m) = &self.matched {
            if needs_snap(m, hz) {
                self.snap_deadline = Some(now + SNAP_DEBOUNCE);
            }
        }
        hz
    }

    /// Advances the controller's timers.
    ///
    /// Called from the host's periodic tick. When the debounce deadline has
    /// passed, the frequency becomes the matched tone's exact value, the
    /// snapping highlight window opens, and the snapped value is returned
    /// for the engine push and the host's frequency-change callback.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        if let Some(until) = self.snapping_until {
            if now >= until {
                self.snapping_until = None;
            }
        }

        let deadline = self.snap_deadline?;
        if now < deadline {
            return None;
        }
        self.snap_deadline = None;

        let hz = self.matched.as_ref().map(|m| m.hz)?;
        self.frequency = hz;
        self.snapping_until = Some(now + SNAP_DISPLAY);
        Some(hz)
    }

    /// Teardown path: drops any pending snap and the highlight window.
    ///
    /// After this call no `poll` will ever return a value, so a dismissed
    /// widget cannot push a late frequency change.
    pub fn cancel_pending(&mut self) {
        self.snap_deadline = None;
        self.snapping_until = None;
    }

    /// Current (clamped, possibly snapped) frequency.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Whether the current frequency sits within tolerance of a catalog tone.
    pub fn is_at_special(&self) -> bool {
        self.matched.is_some()
    }

    /// The matched catalog tone, if any.
    pub fn matched(&self) -> Option<&Frequency> {
        self.matched.as_ref()
    }

    /// Whether the snapping highlight window is open.
    pub fn is_snapping(&self) -> bool {
        self.snapping_until.is_some()
    }
}

/// Maps a unit position along the track to a whole-Hz frequency.
pub fn position_to_frequency(fraction: f64) -> f64 {
    let fraction = fraction.clamp(0.0, 1.0);
    (MIN_FREQUENCY + fraction * (MAX_FREQUENCY - MIN_FREQUENCY)).round()
}

/// Maps a frequency to its unit position along the track.
pub fn frequency_to_position(hz: f64) -> f64 {
    ((hz - MIN_FREQUENCY) / (MAX_FREQUENCY - MIN_FREQUENCY)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_input_is_clamped_and_pushed() {
        let catalog = Catalog::curated();
        let mut slider = LinearSliderController::new(432.0, catalog.entries());

        assert_eq!(slider.input(50.0, catalog.entries(), Instant::now()), 100.0);
        assert_eq!(slider.input(2000.0, catalog.entries(), Instant::now()), 1000.0);
        assert_eq!(slider.frequency(), 1000.0);
    }

    #[test]
    fn test_snap_fires_after_debounce() {
        let catalog = Catalog::curated();
        let mut slider = LinearSliderController::new(432.0, catalog.entries());
        let t0 = Instant::now();

        // Raw 527 is within the band of the 528 Hz entry.
        assert_eq!(slider.input(527.0, catalog.entries(), t0), 527.0);
        assert!(slider.is_at_special());
        assert!(!slider.is_snapping());

        // Nothing before the deadline...
        assert_eq!(slider.poll(t0 + ms(50)), None);
        // ...then exactly one snap to the exact value.
        assert_eq!(slider.poll(t0 + ms(100)), Some(528.0));
        assert_eq!(slider.frequency(), 528.0);
        assert!(slider.is_snapping());
        assert_eq!(slider.poll(t0 + ms(150)), None);

        // The highlight window closes 300 ms after the snap.
        assert!(slider.is_snapping());
        slider.poll(t0 + ms(400));
        assert!(!slider.is_snapping());
    }

    #[test]
    fn test_rapid_inputs_collapse_to_one_snap() {
        let catalog = Catalog::curated();
        let mut slider = LinearSliderController::new(432.0, catalog.entries());
        let t0 = Instant::now();

        // New value every 20 ms for 500 ms, always within tolerance of 528:
        // each input restarts the debounce, so no snap fires in between.
        let mut snaps = 0;
        for i in 0..25 {
            let at = t0 + ms(20 * i);
            let raw = if i % 2 == 0 { 527.0 } else { 529.0 };
            slider.input(raw, catalog.entries(), at);
            if slider.poll(at + ms(16)).is_some() {
                snaps += 1;
            }
        }
        assert_eq!(snaps, 0);
        let last = t0 + ms(20 * 24);

        // Only once the input pauses does the single snap apply.
        assert_eq!(slider.poll(last + ms(100)), Some(528.0));
        assert_eq!(slider.poll(last + ms(200)), None);
    }

    #[test]
    fn test_exact_value_never_arms_a_snap() {
        let catalog = Catalog::curated();
        let mut slider = LinearSliderController::new(432.0, catalog.entries());
        let t0 = Instant::now();

        assert_eq!(slider.input(528.0, catalog.entries(), t0), 528.0);
        assert!(slider.is_at_special());
        assert_eq!(slider.poll(t0 + ms(500)), None);
    }

    #[test]
    fn test_leaving_the_band_cancels_the_pending_snap() {
        let catalog = Catalog::curated();
        let mut slider = LinearSliderController::new(432.0, catalog.entries());
        let t0 = Instant::now();

        slider.input(527.0, catalog.entries(), t0);
        slider.input(700.0, catalog.entries(), t0 + ms(40));
        assert!(!slider.is_at_special());
        assert_eq!(slider.poll(t0 + ms(500)), None);
        assert_eq!(slider.frequency(), 700.0);
    }

    #[test]
    fn test_cancel_pending_silences_the_controller() {
        let catalog = Catalog::curated();
        let mut slider = LinearSliderController::new(432.0, catalog.entries());
        let t0 = Instant::now();

        slider.input(527.0, catalog.entries(), t0);
        slider.cancel_pending();
        assert_eq!(slider.poll(t0 + ms(500)), None);
        assert!(!slider.is_snapping());
    }

    #[test]
    fn test_position_mapping_endpoints() {
        assert_eq!(position_to_frequency(0.0), 100.0);
        assert_eq!(position_to_frequency(1.0), 1000.0);
        assert_eq!(position_to_frequency(0.5), 550.0);
        assert_eq!(frequency_to_position(550.0), 0.5);
    }
}
