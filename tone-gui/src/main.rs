//! # Healing Tones - Frequency Browsing & Playback GUI
//!
//! This module contains the main GUI application for the Healing Tones
//! frequency player. It wires the tone engine, the frequency catalog and the
//! two frequency widgets (linear slider and rotary dial) together.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme
//! - **Audio**: `ToneEngine` owned by the app, built lazily on first play
//! - **Timing**: 16 ms tick subscription drives the slider's snap debounce
//!   and the spectrum refresh
//! - **Catalog**: curated entries plus JSON import/export for user tones

mod ui;

use iced::{self, Element, Subscription, Theme};
use std::time::Instant;
use tone_core::catalog::{Catalog, Frequency};
use tone_core::dial::RotaryDialController;
use tone_core::engine::ToneEngine;
use tone_core::fft;
use tone_core::slider::LinearSliderController;
use tone_core::DEFAULT_FREQUENCY;
use ui::main_display::create_main_view;

/// Where user-added catalog entries are saved and loaded.
const CATALOG_FILE: &str = "healing_tones_catalog.json";

/// The "Miracle" tone targeted by the dial's preset button.
const SOLFEGGIO_HZ: f64 = 528.0;

/// Main entry point for the Healing Tones application.
///
/// Initializes the Iced GUI application with dark theme and the continuous
/// tick used for debounce timing and visualization updates.
pub fn main() -> iced::Result {
    eprintln!("[MAIN] Starting Healing Tones application...");
    let result = iced::application("Healing Tones", PlayerApp::update, PlayerApp::view)
        .subscription(PlayerApp::subscription)
        .theme(PlayerApp::theme)
        .run();
    eprintln!("[MAIN] Application finished with result: {:?}", result);
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    // Playback controls
    TogglePlayback,            // Play/stop button was pressed
    VolumeChanged(f32),        // Volume slider moved (0.0 - 1.0)

    // Frequency widgets
    SliderInput(f64),          // Raw Hz from the linear slider drag
    DialPressed(f64),          // Dial drag started at this arc angle
    DialTurned(f64),           // Dial drag moved to this arc angle
    DialReleased,              // Dial drag ended
    SolfeggioPreset,           // Jump the dial to the 528 Hz miracle tone

    // Panel visibility toggles
    ToggleSliderPanel,         // Show/hide the linear slider
    ToggleDialPanel,           // Show/hide the rotary dial
    ToggleSpectrumPanel,       // Show/hide the spectrum view

    // Catalog management
    SaveCatalog,               // Write the catalog to disk
    LoadCatalog,               // Append entries from disk

    // Continuous update message
    Tick,                      // Timer tick for debounce + visualization
}

/// Main application state for the Healing Tones player.
///
/// The tone engine is an explicitly owned instance created at startup and
/// handed to nothing else - widgets reach audio only through these message
/// handlers.
pub struct PlayerApp {
    // Audio
    engine: ToneEngine,

    // Catalog of named frequencies (curated + user-added)
    catalog: Catalog,

    // Widget controllers
    pub slider: LinearSliderController,
    pub dial: RotaryDialController,

    // The last settled frequency, mirrored from every widget push;
    // shown on the play button and the readout.
    pub active_frequency: f64,
    pub volume: f32,

    // Spectrum of the playing tone, refreshed on tick
    pub spectrum: Vec<f32>,

    // Panel visibility
    pub slider_visible: bool,
    pub dial_visible: bool,
    pub spectrum_visible: bool,
}

impl Default for PlayerApp {
    /// Creates the application with the engine uninitialized (no audio
    /// resources until the first play), the curated catalog, and both
    /// widgets sitting at the default frequency.
    fn default() -> Self {
        eprintln!("[MAIN] Creating PlayerApp...");
        let catalog = Catalog::curated();
        let slider = LinearSliderController::new(DEFAULT_FREQUENCY, catalog.entries());
        let dial = RotaryDialController::new(DEFAULT_FREQUENCY, catalog.entries());
        Self {
            engine: ToneEngine::new(),
            catalog,
            slider,
            dial,
            active_frequency: DEFAULT_FREQUENCY,
            volume: 0.5,
            spectrum: Vec::new(),
            slider_visible: true,
            dial_visible: true,
            spectrum_visible: true,
        }
    }
}

impl PlayerApp {
    /// Handles application state updates based on incoming messages.
    fn update(&mut self, message: Message) {
        if !matches!(message, Message::Tick) {
            eprintln!("[UPDATE] Received message: {:?}", message);
        }

        match message {
            Message::TogglePlayback => {
                if self.engine.is_currently_playing() {
                    self.engine.stop();
                } else if let Err(e) = self.engine.play(Some(self.active_frequency)) {
                    // Audio failures surface here; the engine does not retry.
                    eprintln!("[MAIN] Audio unavailable: {e}");
                }
            }
            Message::VolumeChanged(volume) => {
                self.volume = volume;
                self.engine.set_volume(volume as f64);
            }
            Message::SliderInput(raw_hz) => {
                let hz = self.slider.input(raw_hz, self.catalog.entries(), Instant::now());
                self.push_frequency(hz);
            }
            Message::DialPressed(angle) => {
                self.dial.begin_drag();
                self.apply_dial_angle(angle);
            }
            Message::DialTurned(angle) => {
                self.apply_dial_angle(angle);
            }
            Message::DialReleased => {
                self.dial.end_drag();
            }
            Message::SolfeggioPreset => {
                self.dial.set_frequency(SOLFEGGIO_HZ, self.catalog.entries());
                self.push_frequency(self.dial.frequency());
            }
            Message::ToggleSliderPanel => {
                self.slider_visible = !self.slider_visible;
                if !self.slider_visible {
                    // A dismissed widget must not fire a late snap.
                    self.slider.cancel_pending();
                }
            }
            Message::ToggleDialPanel => {
                self.dial_visible = !self.dial_visible;
                if !self.dial_visible {
                    self.dial.end_drag();
                }
            }
            Message::ToggleSpectrumPanel => {
                self.spectrum_visible = !self.spectrum_visible;
            }
            Message::SaveCatalog => {
                match save_catalog(&self.catalog, CATALOG_FILE) {
                    Ok(_) => eprintln!("[MAIN] Catalog saved successfully."),
                    Err(e) => eprintln!("[MAIN] Error saving catalog: {}", e),
                }
            }
            Message::LoadCatalog => {
                match load_catalog(CATALOG_FILE) {
                    Ok(entries) => {
                        eprintln!("[MAIN] Loaded {} catalog entries.", entries.len());
                        for frequency in entries {
                            // Duplicates are warned about and skipped.
                            self.catalog.append(frequency);
                        }
                    }
                    Err(e) => eprintln!("[MAIN] Error loading catalog: {}", e),
                }
            }
            Message::Tick => {
                // Drive the slider's debounce; a fired snap is pushed to the
                // engine exactly like a live input.
                if let Some(hz) = self.slider.poll(Instant::now()) {
                    self.push_frequency(hz);
                }

                if self.engine.is_currently_playing() {
                    self.spectrum = fft::tone_spectrum(&self.engine.visualization_frame());
                } else if !self.spectrum.is_empty() {
                    self.spectrum.clear();
                }
            }
        }
    }

    /// Routes one settled frequency to the engine and the shared readout.
    ///
    /// This is the host side of the widgets' frequency-change callback: the
    /// play button label and readout always show the last pushed value.
    fn push_frequency(&mut self, hz: f64) {
        self.engine.set_frequency(hz);
        self.active_frequency = hz;
    }

    /// Applies a dial angle: the raw value is pushed first, then the
    /// snapped value right after when the dial snapped (no debounce).
    fn apply_dial_angle(&mut self, angle: f64) {
        let update = self.dial.apply_angle(angle, self.catalog.entries());
        self.push_frequency(update.raw);
        if let Some(hz) = update.snapped {
            self.push_frequency(hz);
        }
    }

    /// Renders the main application interface.
    fn view(&self) -> Element<'_, Message> {
        create_main_view(self)
    }

    /// Creates a subscription for continuous application updates.
    ///
    /// Fires every 16 ms (60 FPS) so the snap debounce resolves promptly
    /// and the spectrum stays in sync with the audio output.
    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(16)).map(|_| Message::Tick)
    }

    /// Returns the application theme.
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Catalog accessor for the view layer.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether a tone is currently audible.
    pub fn is_playing(&self) -> bool {
        self.engine.is_currently_playing()
    }
}

// --- Catalog Save/Load Functions ---

use anyhow::{Context, Result};
use std::fs;

/// Saves the full catalog (curated + user-added entries) to a JSON file.
///
/// # Arguments
/// * `catalog` - The catalog to save
/// * `path` - File path, e.g. "healing_tones_catalog.json"
///
/// # Returns
/// * `Ok(())` - Catalog saved successfully
/// * `Err(e)` - File I/O error or JSON serialization error
fn save_catalog(catalog: &Catalog, path: &str) -> Result<()> {
    let json_string = serde_json::to_string_pretty(catalog.entries())?;
    fs::write(path, json_string).with_context(|| format!("writing {path}"))?;
    Ok(())
}

/// Loads catalog entries from a JSON file.
///
/// The entries are appended to the running catalog one by one, so ids that
/// already exist are skipped with a warning rather than overwritten.
///
/// # Arguments
/// * `path` - File path to load entries from
///
/// # Returns
/// * `Ok(Vec<Frequency>)` - Successfully parsed entries
/// * `Err(e)` - File I/O error or JSON deserialization error
fn load_catalog(path: &str) -> Result<Vec<Frequency>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let entries: Vec<Frequency> = serde_json::from_str(&data)?;
    Ok(entries)
}
