//! T8 API request and response models

use serde::{Deserialize, Serialize};
use t8_analysis::{codec, Spectrum, Waveform};

use crate::error::{T8Error, T8Result};

/// Identifies one measurement on a T8 server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementQuery {
    /// Machine tag
    pub machine: String,
    /// Measurement point tag
    pub point: String,
    /// Processing mode tag
    pub pmode: String,
    /// Acquisition time, `YYYY-MM-DDTHH:MM:SS` in UTC
    pub datetime: String,
}

impl MeasurementQuery {
    pub fn new(
        machine: impl Into<String>,
        point: impl Into<String>,
        pmode: impl Into<String>,
        datetime: impl Into<String>,
    ) -> Self {
        Self {
            machine: machine.into(),
            point: point.into(),
            pmode: pmode.into(),
            datetime: datetime.into(),
        }
    }
}

/// A server-computed spectrum together with the band it covers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerSpectrum {
    pub spectrum: Spectrum,
    /// Lowest frequency in Hz
    pub fmin: f64,
    /// Highest frequency in Hz
    pub fmax: f64,
}

// Wire envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct WaveformResponse {
    #[serde(rename = "data")]
    pub raw_waveform: String,
    pub factor: f64,
    pub sample_rate: f64,
}

impl WaveformResponse {
    pub(crate) fn into_waveform(self) -> T8Result<Waveform> {
        let samples = codec::decode_scaled(&self.raw_waveform, self.factor)
            .map_err(|e| T8Error::decode("waveform", e))?;
        Ok(Waveform::new(samples, self.sample_rate))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpectrumResponse {
    #[serde(rename = "data")]
    pub raw_spectrum: String,
    pub factor: f64,
    #[serde(rename = "min_freq")]
    pub fmin: f64,
    #[serde(rename = "max_freq")]
    pub fmax: f64,
}

impl SpectrumResponse {
    pub(crate) fn into_server_spectrum(self) -> T8Result<ServerSpectrum> {
        let magnitudes = codec::decode_scaled(&self.raw_spectrum, self.factor)
            .map_err(|e| T8Error::decode("spectrum", e))?;
        let spectrum = Spectrum::from_range(magnitudes, self.fmin, self.fmax)?;

        Ok(ServerSpectrum {
            spectrum,
            fmin: self.fmin,
            fmax: self.fmax,
        })
    }
}
