//! Time-domain waveforms and their preprocessing
//!
//! Preprocessing zero-pads to a power-of-two length and then applies a Hann
//! window over the padded length. Both steps return new buffers; the input
//! waveform is never modified.

use serde::Serialize;

/// A time-ordered sequence of amplitude samples plus its sampling rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl Waveform {
    /// Create a waveform from scaled samples
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Samples in time order
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration covered by the samples, in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Time of each sample in seconds (`index / sample_rate`)
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sample_rate)
            .collect()
    }

    /// Padded and windowed copy, ready for spectral analysis
    pub fn preprocessed(&self) -> Self {
        Self {
            samples: preprocess(&self.samples),
            sample_rate: self.sample_rate,
        }
    }
}

/// Zero-pad `samples` to the smallest power-of-two length
///
/// Inputs whose length is already a power of two (including 1) come back
/// unchanged. An empty input yields an empty output.
pub fn pad_to_power_of_two(samples: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mut padded = vec![0.0; samples.len().next_power_of_two()];
    padded[..samples.len()].copy_from_slice(samples);
    padded
}

/// Multiply `samples` by a symmetric Hann window of the same length
pub fn apply_window(mut samples: Vec<f64>) -> Vec<f64> {
    let window = hann_window(samples.len());
    for (sample, coefficient) in samples.iter_mut().zip(window) {
        *sample *= coefficient;
    }
    samples
}

/// Pad first, then window over the padded length
pub fn preprocess(samples: &[f64]) -> Vec<f64> {
    apply_window(pad_to_power_of_two(samples))
}

/// Symmetric Hann coefficients, `0.5 - 0.5 * cos(2*pi*i / (n - 1))`
fn hann_window(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        // A single-point window is flat
        1 => vec![1.0],
        _ => apodize::hanning_iter(len).collect(),
    }
}
