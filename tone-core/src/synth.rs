//! # Tone Synthesis Module
//!
//! Sample-level state machine behind the tone engine. The pipeline renders a
//! pure sine tone through the output callback and owns every timing-sensitive
//! detail: the short attack/release gain ramps that avoid clicks, the glide
//! between frequencies, and the rule that a replaced or stopped voice keeps
//! sounding until its fade completes.
//!
//! ## Features
//! - At most one active voice; replaced voices fade on an independent ramp
//! - 50 ms linear ramps for gain (attack/release) and frequency changes
//! - Playback flag cleared only after the last voice has faded out
//! - Sample tap feeding the spectrum visualization

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::fft::FFT_SIZE;

/// Duration of the gain and frequency ramps, in seconds.
///
/// Long enough to avoid an audible click, short enough that the tone still
/// tracks a drag in real time.
pub const RAMP_SECONDS: f64 = 0.05;

/// Control messages delivered from the engine to the render callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    /// Start a new voice at the given frequency, fading out any current one.
    Play(f64),
    /// Fade out and release the current voice.
    Stop,
    /// Glide the active voice to a new frequency.
    SetFrequency(f64),
    /// Set the master volume, clamped to [0, 1], applied without a ramp.
    SetVolume(f64),
}

/// A linear per-sample ramp toward a target value.
#[derive(Debug, Clone, Copy)]
struct Ramp {
    current: f64,
    target: f64,
    step: f64,
}

impl Ramp {
    fn fixed(value: f64) -> Self {
        Self {
            current: value,
            target: value,
            step: 0.0,
        }
    }

    fn retarget(&mut self, target: f64, samples: usize) {
        self.target = target;
        self.step = (target - self.current) / samples.max(1) as f64;
    }

    fn advance(&mut self) -> f64 {
        if self.current != self.target {
            self.current += self.step;
            let overshot = (self.step > 0.0 && self.current >= self.target)
                || (self.step < 0.0 && self.current <= self.target);
            if overshot {
                self.current = self.target;
            }
        }
        self.current
    }
}

/// One sine oscillator with its own gain envelope.
#[derive(Debug, Clone)]
struct Voice {
    phase: f64,
    frequency: Ramp,
    gain: Ramp,
}

impl Voice {
    /// Creates a silent voice; the caller ramps the gain up for the attack.
    fn new(hz: f64) -> Self {
        Self {
            phase: 0.0,
            frequency: Ramp::fixed(hz),
            gain: Ramp::fixed(0.0),
        }
    }

    fn sample(&mut self, sample_rate: f64) -> f64 {
        let hz = self.frequency.advance();
        let gain = self.gain.advance();
        let value = self.phase.sin() * gain;
        self.phase += TAU * hz / sample_rate;
        if self.phase > TAU {
            self.phase -= TAU;
        }
        value
    }

    fn faded_out(&self) -> bool {
        self.gain.target == 0.0 && self.gain.current == 0.0
    }
}

/// The render-side tone pipeline.
///
/// Owned by the output callback in production; tests construct one and call
/// [`TonePipeline::handle_command`] / [`TonePipeline::render`] directly.
pub struct TonePipeline {
    sample_rate: f64,
    volume: f64,
    active: Option<Voice>,
    releasing: Vec<Voice>,
    playing: Arc<AtomicBool>,
    tap: Arc<Mutex<Vec<f32>>>,
}

impl TonePipeline {
    /// Creates a pipeline rendering at the given sample rate.
    ///
    /// # Arguments
    /// * `sample_rate` - Output sample rate in Hz
    /// * `playing` - Shared flag mirroring audibility to the control side
    /// * `tap` - Shared buffer of recent mono samples for visualization
    pub fn new(sample_rate: f64, playing: Arc<AtomicBool>, tap: Arc<Mutex<Vec<f32>>>) -> Self {
        Self {
            sample_rate,
            volume: 0.5, // Default volume at 50%
            active: None,
            releasing: Vec::new(),
            playing,
            tap,
        }
    }

    fn ramp_samples(&self) -> usize {
        (self.sample_rate * RAMP_SECONDS) as usize
    }

    /// Applies a single control command.
    pub fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Play(hz) => {
                // Stop-before-start: the old voice fades on its own ramp
                // while the new one attacks, so no two voices are ever
                // active at once and neither transition clicks.
                if let Some(mut voice) = self.active.take() {
                    voice.gain.retarget(0.0, self.ramp_samples());
                    self.releasing.push(voice);
                }
                let mut voice = Voice::new(hz);
                voice.gain.retarget(1.0, self.ramp_samples());
                self.active = Some(voice);
                self.playing.store(true, Ordering::Relaxed);
            }
            EngineCommand::Stop => {
                if let Some(mut voice) = self.active.take() {
                    voice.gain.retarget(0.0, self.ramp_samples());
                    self.releasing.push(voice);
                }
            }
            EngineCommand::SetFrequency(hz) => {
                // Only an active voice glides; when idle the engine keeps
                // the value control-side for the next Play.
                let ramp = self.ramp_samples();
                if let Some(voice) = self.active.as_mut() {
                    voice.frequency.retarget(hz, ramp);
                }
            }
            EngineCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
            }
        }
    }

    /// Renders an interleaved buffer of `channels`-wide frames.
    ///
    /// Fading voices that reach silence are released here, strictly after
    /// their ramp has completed; once the last one is gone the shared
    /// playing flag goes false.
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let had_voices = self.active.is_some() || !self.releasing.is_empty();
        let mut tap_block = Vec::with_capacity(data.len() / channels);

        for frame in data.chunks_mut(channels) {
            let mut mixed = 0.0;
            if let Some(voice) = self.active.as_mut() {
                mixed += voice.sample(self.sample_rate);
            }
            for voice in self.releasing.iter_mut() {
                mixed += voice.sample(self.sample_rate);
            }
            let out = (mixed * self.volume) as f32;
            for slot in frame.iter_mut() {
                *slot = out;
            }
            tap_block.push(out);
        }

        self.releasing.retain(|voice| !voice.faded_out());
        if had_voices && self.active.is_none() && self.releasing.is_empty() {
            self.playing.store(false, Ordering::Relaxed);
        }

        if let Ok(mut tap) = self.tap.lock() {
            tap.extend_from_slice(&tap_block);
            let len = tap.len();
            if len > FFT_SIZE {
                tap.drain(..len - FFT_SIZE);
            }
        }
    }

    /// Frequency of the active voice's ramp, if one is sounding.
    pub fn active_frequency(&self) -> Option<f64> {
        self.active.as_ref().map(|v| v.frequency.current)
    }

    /// Number of voices still fading out.
    pub fn fading_voices(&self) -> usize {
        self.releasing.len()
    }

    /// Current master volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 44_100.0;

    fn pipeline() -> (TonePipeline, Arc<AtomicBool>) {
        let playing = Arc::new(AtomicBool::new(false));
        let tap = Arc::new(Mutex::new(Vec::new()));
        let mut p = TonePipeline::new(SAMPLE_RATE, playing.clone(), tap);
        p.handle_command(EngineCommand::SetVolume(1.0));
        (p, playing)
    }

    fn render_seconds(p: &mut TonePipeline, seconds: f64) {
        let samples = (SAMPLE_RATE * seconds) as usize;
        let mut buffer = vec![0.0f32; samples];
        p.render(&mut buffer, 1);
    }

    #[test]
    fn test_single_voice_after_double_play() {
        let (mut p, _) = pipeline();
        p.handle_command(EngineCommand::Play(432.0));
        p.handle_command(EngineCommand::Play(528.0));

        // Exactly one active voice, at the second call's frequency; the
        // first is fading and gone once its ramp has run out.
        assert_eq!(p.active_frequency(), Some(528.0));
        assert_eq!(p.fading_voices(), 1);

        render_seconds(&mut p, RAMP_SECONDS * 2.0);
        assert_eq!(p.fading_voices(), 0);
        assert_eq!(p.active_frequency(), Some(528.0));
    }

    #[test]
    fn test_volume_clamped_to_unit_range() {
        let (mut p, _) = pipeline();
        p.handle_command(EngineCommand::SetVolume(5.0));
        assert_eq!(p.volume(), 1.0);
        p.handle_command(EngineCommand::SetVolume(-1.0));
        assert_eq!(p.volume(), 0.0);
        p.handle_command(EngineCommand::SetVolume(0.25));
        assert_eq!(p.volume(), 0.25);
    }

    #[test]
    fn test_attack_starts_from_silence() {
        let (mut p, _) = pipeline();
        p.handle_command(EngineCommand::Play(432.0));

        let mut buffer = vec![0.0f32; 8];
        p.render(&mut buffer, 1);
        // The gain ramp starts at zero, so the first samples are far below
        // full scale even at a phase where the sine is non-zero.
        assert!(buffer.iter().all(|s| s.abs() < 0.01));
    }

    #[test]
    fn test_stop_releases_after_fade() {
        let (mut p, playing) = pipeline();
        p.handle_command(EngineCommand::Play(432.0));
        render_seconds(&mut p, 0.1);
        assert!(playing.load(Ordering::Relaxed));

        p.handle_command(EngineCommand::Stop);
        // Still audible: the release ramp has not finished yet.
        assert!(playing.load(Ordering::Relaxed));
        assert_eq!(p.fading_voices(), 1);

        render_seconds(&mut p, RAMP_SECONDS * 2.0);
        assert_eq!(p.fading_voices(), 0);
        assert!(!playing.load(Ordering::Relaxed));
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let (mut p, playing) = pipeline();
        p.handle_command(EngineCommand::Stop);
        render_seconds(&mut p, 0.05);
        assert!(!playing.load(Ordering::Relaxed));
        assert_eq!(p.fading_voices(), 0);
    }

    #[test]
    fn test_frequency_glides_to_target() {
        let (mut p, _) = pipeline();
        p.handle_command(EngineCommand::Play(432.0));
        render_seconds(&mut p, RAMP_SECONDS * 2.0);

        p.handle_command(EngineCommand::SetFrequency(528.0));
        render_seconds(&mut p, RAMP_SECONDS / 2.0);
        let mid = p.active_frequency().unwrap();
        assert!(mid > 432.0 && mid < 528.0);

        render_seconds(&mut p, RAMP_SECONDS);
        assert_eq!(p.active_frequency(), Some(528.0));
    }

    #[test]
    fn test_set_frequency_when_idle_leaves_pipeline_silent() {
        let (mut p, playing) = pipeline();
        p.handle_command(EngineCommand::SetFrequency(639.0));
        assert_eq!(p.active_frequency(), None);
        assert!(!playing.load(Ordering::Relaxed));
    }
}
