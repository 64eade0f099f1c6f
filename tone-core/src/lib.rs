// tone-core/src/lib.rs

//! The core logic for the healing tones player.
//! This crate is responsible for tone synthesis, the frequency catalog,
//! special-frequency matching, and the slider/dial control state machines.
//! It is completely headless and contains no GUI code.

pub mod catalog;
pub mod dial;
pub mod engine;
pub mod fft;
pub mod matcher;
pub mod slider;
pub mod synth;

/// Lower bound of the controllable frequency range, in Hz.
pub const MIN_FREQUENCY: f64 = 100.0;

/// Upper bound of the controllable frequency range, in Hz.
pub const MAX_FREQUENCY: f64 = 1000.0;

/// Frequency the player starts at (Verdi's A).
pub const DEFAULT_FREQUENCY: f64 = 432.0;
