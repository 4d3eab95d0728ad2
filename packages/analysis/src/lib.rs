//! Decode-and-analyze pipeline for T8 vibration measurements
//!
//! This crate turns the compact wire encoding used by T8 monitors into
//! floating-point samples and derives spectra from them:
//! - [`codec`]: base64 + zlib + little-endian `i16` decoding and scaling
//! - [`waveform`]: zero-padding and Hann windowing
//! - [`spectrum`]: linear-range spectra and FFT-derived, band-filtered spectra
//!
//! # Example
//!
//! ```rust
//! use t8_analysis::{codec, Spectrum, Waveform};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let samples = codec::decode_scaled("eJxjZPj//389QwMAEP4D/g==", 0.001)?;
//! let waveform = Waveform::new(samples, 2560.0).preprocessed();
//!
//! let spectrum = Spectrum::from_waveform(&waveform, 0.0, 1000.0)?;
//! for (frequency, magnitude) in spectrum.iter() {
//!     println!("{frequency:.1} Hz: {magnitude:.4}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every operation is a pure, synchronous transform. Nothing here logs or
//! retries; callers decide how to report failures.

pub mod codec;
mod error;
pub mod spectrum;
pub mod waveform;

pub use error::{AnalysisError, AnalysisResult, DecodeError, DecodeResult};
pub use spectrum::{Spectrum, SpectrumAnalyzer};
pub use waveform::Waveform;
