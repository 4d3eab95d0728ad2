//! Encoded measurement fixtures
//!
//! Fixtures hold raw 16-bit values and render them into the JSON envelopes a
//! T8 server returns, using the same zlib + base64 encoding.

use std::f64::consts::PI;

use serde_json::json;
use t8_analysis::codec;

/// Fixture for `/waves` responses
#[derive(Debug, Clone)]
pub struct WaveformFixture {
    pub samples: Vec<i16>,
    pub factor: f64,
    pub sample_rate: f64,
}

impl WaveformFixture {
    /// Create a fixture from raw samples
    pub fn new(samples: Vec<i16>, factor: f64, sample_rate: f64) -> Self {
        Self {
            samples,
            factor,
            sample_rate,
        }
    }

    /// A pure tone of `frequency` Hz sampled `len` times at `sample_rate`
    pub fn sine(frequency: f64, sample_rate: f64, len: usize, amplitude: i16) -> Self {
        let samples = (0..len)
            .map(|n| {
                let t = n as f64 / sample_rate;
                (f64::from(amplitude) * (2.0 * PI * frequency * t).sin()).round() as i16
            })
            .collect();
        Self::new(samples, 1.0, sample_rate)
    }

    /// Samples as the client should see them after scaling
    pub fn expected_samples(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|&s| f64::from(s) * self.factor)
            .collect()
    }

    /// Render the server's JSON envelope
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "data": encode(&self.samples),
            "factor": self.factor,
            "sample_rate": self.sample_rate
        })
    }
}

impl Default for WaveformFixture {
    fn default() -> Self {
        Self::new(vec![1, -1, 32767, -32768], 1.0, 2560.0)
    }
}

/// Fixture for `/spectra` responses
#[derive(Debug, Clone)]
pub struct SpectrumFixture {
    pub magnitudes: Vec<i16>,
    pub factor: f64,
    pub fmin: f64,
    pub fmax: f64,
}

impl SpectrumFixture {
    /// Create a fixture from raw magnitudes
    pub fn new(magnitudes: Vec<i16>, factor: f64, fmin: f64, fmax: f64) -> Self {
        Self {
            magnitudes,
            factor,
            fmin,
            fmax,
        }
    }

    /// A flat spectrum of `len` bins with a single peak at `frequency`
    ///
    /// The peak lands on the bin closest to `frequency`.
    pub fn with_peak(len: usize, fmin: f64, fmax: f64, frequency: f64) -> Self {
        let step = (fmax - fmin) / (len.saturating_sub(1).max(1)) as f64;
        let peak_index = ((frequency - fmin) / step).round().max(0.0) as usize;

        let magnitudes = (0..len)
            .map(|i| if i == peak_index { 1000 } else { 1 })
            .collect();
        Self::new(magnitudes, 0.001, fmin, fmax)
    }

    /// Render the server's JSON envelope
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "data": encode(&self.magnitudes),
            "factor": self.factor,
            "min_freq": self.fmin,
            "max_freq": self.fmax
        })
    }
}

impl Default for SpectrumFixture {
    fn default() -> Self {
        Self::with_peak(801, 0.0, 1000.0, 160.0)
    }
}

fn encode(values: &[i16]) -> String {
    codec::encode(values).expect("encoding into memory cannot fail")
}
