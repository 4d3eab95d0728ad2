//! Shared test utilities for the T8 client workspace
//!
//! This crate provides a mock T8 server and encoded measurement fixtures so
//! the API client and CLI can be tested without network access.
//!
//! # Mock Services
//!
//! - [`MockT8Server`] - Mock T8 server for `/waves` and `/spectra`
//!
//! # Fixtures
//!
//! - [`WaveformFixture`] - Raw samples rendered as a `/waves` envelope
//! - [`SpectrumFixture`] - Raw magnitudes rendered as a `/spectra` envelope

mod fixtures;
mod server;

pub use fixtures::{SpectrumFixture, WaveformFixture};
pub use server::MockT8Server;
