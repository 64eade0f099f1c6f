//! # Spectrum Analysis Module
//!
//! Turns the tone pipeline's output tap into a magnitude spectrum for the
//! playback visualization. The tap is whatever the last render produced, so
//! short buffers are zero-padded rather than rejected.

use rustfft::{FftPlanner, num_complex::Complex};

/// Number of samples per spectrum frame.
///
/// Matches the tap capacity kept by the pipeline; at 44.1 kHz this spans
/// ~46 ms of output, plenty of resolution for a single pure tone.
pub const FFT_SIZE: usize = 2048;

/// Removes the DC offset from a signal by making its average value zero.
fn remove_dc_offset(signal: &mut [f32]) {
    let len = signal.len();
    if len == 0 {
        return;
    }
    let avg = signal.iter().sum::<f32>() / len as f32;
    if avg.abs() > 1e-6 {
        for sample in signal.iter_mut() {
            *sample -= avg;
        }
    }
}

/// Applies a Hann window to reduce spectral leakage.
fn apply_hann_window(buffer: &mut [f32]) {
    let n = buffer.len();
    if n == 0 {
        return;
    }
    let n_minus_1 = (n - 1) as f32;
    for (i, sample) in buffer.iter_mut().enumerate() {
        let multiplier = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / n_minus_1).cos());
        *sample *= multiplier;
    }
}

/// Computes the magnitude spectrum of a tap frame.
///
/// The input is conditioned (DC removal, Hann window), zero-padded to
/// [`FFT_SIZE`] when shorter, transformed, and reduced to the magnitudes of
/// the first half of the bins (up to Nyquist).
///
/// # Arguments
/// * `samples` - Recent mono output samples, at most `FFT_SIZE` of them
///
/// # Returns
/// * `Vec<f32>` - Magnitude per frequency bin, `FFT_SIZE / 2` entries
pub fn tone_spectrum(samples: &[f32]) -> Vec<f32> {
    let mut signal = samples.to_vec();
    signal.truncate(FFT_SIZE);
    remove_dc_offset(&mut signal);
    apply_hann_window(&mut signal);
    signal.resize(FFT_SIZE, 0.0);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(FFT_SIZE);

    let mut buffer: Vec<Complex<f32>> = signal
        .into_iter()
        .map(|sample| Complex { re: sample, im: 0.0 })
        .collect();
    fft.process(&mut buffer);

    buffer.iter().take(FFT_SIZE / 2).map(|c| c.norm()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_peak_tracks_tone_frequency() {
        let sample_rate = 44_100.0f32;
        let hz = 432.0f32;
        let signal: Vec<f32> = (0..FFT_SIZE)
            .map(|i| (std::f32::consts::TAU * hz * i as f32 / sample_rate).sin())
            .collect();

        let spectrum = tone_spectrum(&signal);
        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        let bin_hz = sample_rate / FFT_SIZE as f32;
        let peak_hz = peak_bin as f32 * bin_hz;
        assert!((peak_hz - hz).abs() < bin_hz * 1.5);
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        let spectrum = tone_spectrum(&[0.5, -0.5, 0.25]);
        assert_eq!(spectrum.len(), FFT_SIZE / 2);
        assert!(spectrum.iter().all(|m| m.is_finite()));
    }

    #[test]
    fn test_empty_input_yields_silent_spectrum() {
        let spectrum = tone_spectrum(&[]);
        assert_eq!(spectrum.len(), FFT_SIZE / 2);
        assert!(spectrum.iter().all(|&m| m == 0.0));
    }
}
