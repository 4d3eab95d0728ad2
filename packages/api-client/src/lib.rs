//! T8 vibration monitor API client
//!
//! Async client for the waveform and spectrum endpoints of a T8 server.
//! Responses are decoded with `t8-analysis`, so callers receive scaled
//! samples and a frequency-annotated spectrum rather than raw payloads.
//!
//! # Example
//!
//! ```rust,ignore
//! use t8_api_client::{MeasurementQuery, T8Client};
//! use t8_shared_config::ServerConfig;
//!
//! let client = T8Client::new(&ServerConfig::from_env()?)?;
//! let query = MeasurementQuery::new("LP_Turbine", "MAD31CY005", "AM1", "2019-04-11T18:25:54");
//! let waveform = client.get_waveform(&query).await?;
//! println!("{} samples at {} Hz", waveform.len(), waveform.sample_rate());
//! ```

mod client;
mod error;
mod models;
mod time;

pub use client::T8Client;
pub use error::{T8Error, T8Result};
pub use models::{MeasurementQuery, ServerSpectrum};
pub use time::{iso_to_timestamp, DATETIME_FORMAT};
