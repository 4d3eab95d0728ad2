//! Frequency spectra, either server-provided or derived from a waveform
//!
//! A server spectrum arrives as a magnitude array plus the frequency bounds
//! it covers; its frequencies are synthesized linearly. A derived spectrum
//! comes from a complex FFT of the waveform samples, where each bin maps to
//! `i * sample_rate / N` Hz and the result is filtered to a band.

use std::f64::consts::SQRT_2;

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::waveform::Waveform;

/// A frequency-ordered sequence of (frequency, magnitude) pairs
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Build a spectrum whose frequencies are spread linearly over `[fmin, fmax]`
    ///
    /// `frequencies[i] = fmin + i * (fmax - fmin) / (n - 1)`
    ///
    /// # Errors
    /// Returns `AnalysisError::InvalidRange` when fewer than two magnitudes
    /// are given.
    pub fn from_range(magnitudes: Vec<f64>, fmin: f64, fmax: f64) -> AnalysisResult<Self> {
        let n = magnitudes.len();
        if n < 2 {
            return Err(AnalysisError::InvalidRange { len: n });
        }

        let step = (fmax - fmin) / (n - 1) as f64;
        let frequencies = (0..n).map(|i| fmin + i as f64 * step).collect();

        Ok(Self {
            frequencies,
            magnitudes,
        })
    }

    /// Derive the band-limited spectrum of `waveform` with a fresh analyzer
    ///
    /// See [`SpectrumAnalyzer::analyze`].
    pub fn from_waveform(waveform: &Waveform, fmin: f64, fmax: f64) -> AnalysisResult<Self> {
        SpectrumAnalyzer::new().analyze(waveform, fmin, fmax)
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Iterate over `(frequency, magnitude)` pairs in frequency order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }

    /// The `(frequency, magnitude)` pair with the largest magnitude
    ///
    /// Ties resolve to the lowest frequency. Returns `None` for an empty
    /// spectrum.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |best, (frequency, magnitude)| match best {
            Some((_, best_magnitude)) if magnitude <= best_magnitude => best,
            _ => Some((frequency, magnitude)),
        })
    }
}

/// FFT-based spectrum analyzer
///
/// Holds an FFT planner so repeated analyses of equal-length waveforms reuse
/// the same plan. Results do not depend on previous calls.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Compute the spectrum of `waveform` restricted to `[fmin, fmax]`
    ///
    /// The full complex DFT of the `N` samples is taken as-is (callers that
    /// want padding and windowing use [`Waveform::preprocessed`] first).
    /// Every coefficient is scaled by `sqrt(2)` for the one-sided amplitude
    /// convention, then `magnitude[i] = |c[i]| / N` at
    /// `frequency[i] = i * sample_rate / N`. Both bounds are inclusive; an
    /// empty or inverted band yields an empty spectrum.
    ///
    /// # Errors
    /// - `AnalysisError::EmptyWaveform` if the waveform has no samples
    /// - `AnalysisError::InvalidSampleRate` if the sample rate is not a
    ///   positive finite number
    pub fn analyze(
        &mut self,
        waveform: &Waveform,
        fmin: f64,
        fmax: f64,
    ) -> AnalysisResult<Spectrum> {
        let n = waveform.len();
        if n == 0 {
            return Err(AnalysisError::EmptyWaveform);
        }

        let sample_rate = waveform.sample_rate();
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }

        let mut buffer: Vec<Complex<f64>> = waveform
            .samples()
            .iter()
            .map(|&sample| Complex::new(sample, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let len = n as f64;
        let mut spectrum = Spectrum::default();

        for (i, coefficient) in buffer.into_iter().enumerate() {
            let frequency = i as f64 * sample_rate / len;
            if frequency >= fmin && frequency <= fmax {
                spectrum.frequencies.push(frequency);
                spectrum.magnitudes.push((coefficient * SQRT_2).norm() / len);
            }
        }

        Ok(spectrum)
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use assert_matches::assert_matches;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    /// Pure sine sampled for exactly `num_samples` points
    fn generate_sine(
        frequency: f64,
        amplitude: f64,
        sample_rate: f64,
        num_samples: usize,
    ) -> Waveform {
        let samples = (0..num_samples)
            .map(|i| amplitude * (2.0 * PI * frequency * i as f64 / sample_rate).sin())
            .collect();
        Waveform::new(samples, sample_rate)
    }

    #[test]
    fn test_from_range_three_points() {
        let spectrum = Spectrum::from_range(vec![1.0, 2.0, 3.0], 0.0, 10.0).unwrap();
        assert_eq!(spectrum.frequencies(), &[0.0, 5.0, 10.0]);
        assert_eq!(spectrum.magnitudes(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_range_offset_bounds() {
        let spectrum = Spectrum::from_range(vec![0.0; 5], 2.0, 1002.0).unwrap();
        assert_eq!(
            spectrum.frequencies(),
            &[2.0, 252.0, 502.0, 752.0, 1002.0]
        );
    }

    #[test]
    fn test_from_range_needs_two_points() {
        assert_matches!(
            Spectrum::from_range(vec![1.0], 0.0, 10.0),
            Err(AnalysisError::InvalidRange { len: 1 })
        );
        assert_matches!(
            Spectrum::from_range(Vec::new(), 0.0, 10.0),
            Err(AnalysisError::InvalidRange { len: 0 })
        );
    }

    #[test]
    fn test_from_waveform_empty_is_error() {
        let waveform = Waveform::new(Vec::new(), 1000.0);
        assert_matches!(
            Spectrum::from_waveform(&waveform, 0.0, 500.0),
            Err(AnalysisError::EmptyWaveform)
        );
    }

    #[test]
    fn test_from_waveform_rejects_bad_sample_rate() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let waveform = Waveform::new(vec![1.0, 2.0], rate);
            assert_matches!(
                Spectrum::from_waveform(&waveform, 0.0, 500.0),
                Err(AnalysisError::InvalidSampleRate(_))
            );
        }
    }

    #[test]
    fn test_from_waveform_bin_mapping() {
        let waveform = Waveform::new(vec![0.0; 8], 800.0);
        let spectrum = Spectrum::from_waveform(&waveform, 0.0, f64::MAX).unwrap();
        assert_eq!(
            spectrum.frequencies(),
            &[0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0]
        );
        assert!(spectrum.magnitudes().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_from_waveform_dc_magnitude() {
        // DC bin of a constant signal: |sqrt(2) * N * c| / N
        let waveform = Waveform::new(vec![3.0; 4], 4.0);
        let spectrum = Spectrum::from_waveform(&waveform, 0.0, 0.0).unwrap();
        assert_eq!(spectrum.frequencies(), &[0.0]);
        assert!((spectrum.magnitudes()[0] - 3.0 * SQRT_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_from_waveform_sine_peak() {
        // 100 Hz lands exactly on bin 100 of a 1024-point, 1024 Hz waveform
        let waveform = generate_sine(100.0, 2.0, 1024.0, 1024);
        let spectrum = Spectrum::from_waveform(&waveform, 10.0, 400.0).unwrap();

        let (frequency, magnitude) = spectrum.peak().unwrap();
        assert!((frequency - 100.0).abs() < TOLERANCE);
        // Two-sided bin holds A/2; sqrt(2) scaling gives A / sqrt(2)
        assert!((magnitude - 2.0 / SQRT_2).abs() < 1e-6, "got {magnitude}");
    }

    #[test]
    fn test_from_waveform_bounds_inclusive() {
        let waveform = Waveform::new(vec![1.0, 0.0, -1.0, 0.0], 4.0);
        let spectrum = Spectrum::from_waveform(&waveform, 1.0, 2.0).unwrap();
        assert_eq!(spectrum.frequencies(), &[1.0, 2.0]);
    }

    #[test]
    fn test_from_waveform_empty_band() {
        let waveform = generate_sine(50.0, 1.0, 512.0, 512);

        let outside = Spectrum::from_waveform(&waveform, 10_000.0, 20_000.0).unwrap();
        assert!(outside.is_empty());

        let inverted = Spectrum::from_waveform(&waveform, 200.0, 100.0).unwrap();
        assert!(inverted.is_empty());
        assert_eq!(inverted.frequencies().len(), inverted.magnitudes().len());
    }

    #[test]
    fn test_from_waveform_non_power_of_two_length() {
        let waveform = generate_sine(10.0, 1.0, 100.0, 100);
        let spectrum = Spectrum::from_waveform(&waveform, 0.0, 50.0).unwrap();
        assert_eq!(spectrum.len(), 51);
        let (frequency, _) = spectrum.peak().unwrap();
        assert!((frequency - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_analyzer_reuse_is_bit_identical() {
        let waveform = generate_sine(37.0, 0.5, 1000.0, 777);
        let mut analyzer = SpectrumAnalyzer::new();

        let first = analyzer.analyze(&waveform, 5.0, 300.0).unwrap();
        let second = analyzer.analyze(&waveform, 5.0, 300.0).unwrap();
        let fresh = Spectrum::from_waveform(&waveform, 5.0, 300.0).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_peak_ties_pick_lowest_frequency() {
        let spectrum = Spectrum::from_range(vec![1.0, 4.0, 4.0, 2.0], 0.0, 3.0).unwrap();
        assert_eq!(spectrum.peak(), Some((1.0, 4.0)));
        assert_eq!(Spectrum::default().peak(), None);
    }
}
