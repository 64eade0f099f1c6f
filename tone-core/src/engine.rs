//! # Tone Engine Module
//!
//! This module owns audio output using CPAL (Cross-Platform Audio Library).
//! It provides the engine handed to the GUI at startup: device selection,
//! lazy stream construction, and the command queue into the render callback.
//!
//! ## Features
//! - Automatic audio device selection with format fallback
//! - Output stream built lazily on the first play (platform gesture policy)
//! - Click-free play/stop/retune via the pipeline's ramps
//! - Error handling via anyhow; failures propagate to the caller

use anyhow::{Result, anyhow};
use cpal::SupportedStreamConfigRange;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::DEFAULT_FREQUENCY;
use crate::synth::{EngineCommand, TonePipeline};

/// Engine lifecycle.
///
/// The audio stream must not exist before the user asks for sound, so the
/// engine starts `Uninitialized` and becomes `Ready` on the first play.
enum EngineState {
    Uninitialized,
    Ready {
        // Dropping the stream stops audio, so it is kept alive here.
        _stream: cpal::Stream,
        commands: Sender<EngineCommand>,
    },
}

/// The application's tone engine.
///
/// Constructed once at startup and passed to whatever needs playback; there
/// is no global instance. Widgets never touch audio primitives directly -
/// they only call these methods.
pub struct ToneEngine {
    state: EngineState,
    /// Set on play, cleared by the pipeline after the release fade.
    playing: Arc<AtomicBool>,
    /// Recent output samples for the spectrum view.
    tap: Arc<Mutex<Vec<f32>>>,
    current_frequency: f64,
    volume: f64,
}

impl Default for ToneEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneEngine {
    /// Creates an engine with no audio resources yet.
    pub fn new() -> Self {
        Self {
            state: EngineState::Uninitialized,
            playing: Arc::new(AtomicBool::new(false)),
            tap: Arc::new(Mutex::new(Vec::new())),
            current_frequency: DEFAULT_FREQUENCY,
            volume: 0.5,
        }
    }

    /// Starts playback at the given frequency, or the last-set one.
    ///
    /// Builds the output stream on first use; a device or stream failure
    /// propagates to the caller and is not retried here. If a tone is
    /// already sounding it is faded out first - no overlapping voices.
    ///
    /// # Arguments
    /// * `hz` - Frequency to play, `None` to reuse the stored value.
    ///   Must be positive and finite; values outside the widget range are
    ///   the caller's responsibility.
    pub fn play(&mut self, hz: Option<f64>) -> Result<()> {
        if let Some(hz) = hz {
            self.current_frequency = hz;
        }
        self.ensure_ready()?;
        if let Some(commands) = self.commands() {
            let _ = commands.send(EngineCommand::Play(self.current_frequency));
        }
        self.playing.store(true, Ordering::Relaxed);
        eprintln!("[ENGINE] Playing {} Hz", self.current_frequency);
        Ok(())
    }

    /// Fades out and releases the current tone. No-op when nothing plays.
    ///
    /// The voice is released by the render path once its fade completes;
    /// [`ToneEngine::is_currently_playing`] stays true until then.
    pub fn stop(&mut self) {
        if !self.is_currently_playing() {
            return;
        }
        if let Some(commands) = self.commands() {
            let _ = commands.send(EngineCommand::Stop);
        }
        eprintln!("[ENGINE] Stopped playing {} Hz", self.current_frequency);
    }

    /// Retunes the playing tone with a short glide, or just records the
    /// value for the next play when idle.
    ///
    /// Not validated: callers supply values from bounded controls.
    pub fn set_frequency(&mut self, hz: f64) {
        self.current_frequency = hz;
        if let Some(commands) = self.commands() {
            let _ = commands.send(EngineCommand::SetFrequency(hz));
        }
    }

    /// Sets the master volume, clamped to [0, 1], applied without a ramp.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(commands) = self.commands() {
            let _ = commands.send(EngineCommand::SetVolume(self.volume));
        }
    }

    /// Whether a tone is audible (including a not-yet-finished fade-out).
    pub fn is_currently_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    /// The last frequency handed to the engine.
    pub fn current_frequency(&self) -> f64 {
        self.current_frequency
    }

    /// Current master volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether the output stream has been built yet.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready { .. })
    }

    /// A copy of the most recent output samples for visualization.
    pub fn visualization_frame(&self) -> Vec<f32> {
        self.tap.lock().map(|tap| tap.clone()).unwrap_or_default()
    }

    fn commands(&self) -> Option<&Sender<EngineCommand>> {
        match &self.state {
            EngineState::Ready { commands, .. } => Some(commands),
            EngineState::Uninitialized => None,
        }
    }

    fn ensure_ready(&mut self) -> Result<()> {
        if matches!(self.state, EngineState::Ready { .. }) {
            return Ok(());
        }
        let (stream, commands) =
            open_output_stream(self.playing.clone(), self.tap.clone(), self.volume)?;
        self.state = EngineState::Ready {
            _stream: stream,
            commands,
        };
        Ok(())
    }
}

/// Builds and starts the output stream.
///
/// This function:
/// 1. Selects the default audio output device
/// 2. Picks an f32 configuration as close to 44.1 kHz as the device allows
/// 3. Moves a fresh [`TonePipeline`] into the render callback, fed by a
///    command channel drained at the head of every callback
///
/// # Returns
/// * `Ok((stream, sender))` - Live stream handle and its command queue
/// * `Err(e)` - Error if audio setup fails
fn open_output_stream(
    playing: Arc<AtomicBool>,
    tap: Arc<Mutex<Vec<f32>>>,
    volume: f64,
) -> Result<(cpal::Stream, Sender<EngineCommand>)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;

    eprintln!("[AUDIO] Using audio output device: {}", device.name()?);

    let configs = device.supported_output_configs()?.collect::<Vec<_>>();
    let supported = find_supported_config(configs, 44_100)
        .ok_or_else(|| anyhow!("No suitable f32 output format found"))?;

    let rate = 44_100u32.clamp(
        supported.min_sample_rate().0,
        supported.max_sample_rate().0,
    );
    let config = supported.with_sample_rate(cpal::SampleRate(rate));
    let channels = config.channels() as usize;
    let config: cpal::StreamConfig = config.into();

    eprintln!("[AUDIO] Selected sample rate: {} Hz", rate);

    let (command_tx, command_rx) = crossbeam_channel::unbounded::<EngineCommand>();
    let mut pipeline = TonePipeline::new(rate as f64, playing, tap);
    pipeline.handle_command(EngineCommand::SetVolume(volume));

    let err_fn = |err| eprintln!("An error occurred on the audio stream: {}", err);

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            while let Ok(command) = command_rx.try_recv() {
                pipeline.handle_command(command);
            }
            pipeline.render(data, channels);
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok((stream, command_tx))
}

/// Finds the best supported output configuration for the target sample rate.
///
/// Searches the device's configurations for 32-bit float output with the
/// closest available sample rate.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let min_diff = (c.min_sample_rate().0 as i32 - target_rate as i32).abs();
            let max_diff = (c.max_sample_rate().0 as i32 - target_rate as i32).abs();
            min_diff.min(max_diff)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Anything touching a real device stays out of tests; the pipeline has
    // its own coverage in synth.rs.

    #[test]
    fn test_new_engine_is_uninitialized_and_silent() {
        let engine = ToneEngine::new();
        assert!(!engine.is_ready());
        assert!(!engine.is_currently_playing());
        assert_eq!(engine.current_frequency(), DEFAULT_FREQUENCY);
    }

    #[test]
    fn test_set_frequency_before_init_only_stores() {
        let mut engine = ToneEngine::new();
        engine.set_frequency(528.0);
        assert_eq!(engine.current_frequency(), 528.0);
        assert!(!engine.is_ready());
    }

    #[test]
    fn test_volume_clamped_control_side() {
        let mut engine = ToneEngine::new();
        engine.set_volume(5.0);
        assert_eq!(engine.volume(), 1.0);
        engine.set_volume(-0.5);
        assert_eq!(engine.volume(), 0.0);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut engine = ToneEngine::new();
        engine.stop();
        assert!(!engine.is_ready());
        assert!(!engine.is_currently_playing());
    }
}
