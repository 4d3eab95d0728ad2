//! Fetch, analyze and compare one measurement

use serde::Serialize;
use t8_analysis::{Spectrum, SpectrumAnalyzer, Waveform};
use t8_api_client::{MeasurementQuery, ServerSpectrum, T8Client};
use tracing::{debug, info};

use crate::error::CliResult;

/// The strongest bin of a spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    pub frequency: f64,
    pub magnitude: f64,
}

impl Peak {
    /// Locate the peak of `spectrum`, if it has any bins
    pub fn of(spectrum: &Spectrum) -> Option<Self> {
        spectrum
            .peak()
            .map(|(frequency, magnitude)| Self { frequency, magnitude })
    }
}

/// Peak agreement between the server spectrum and the local FFT
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub server_peak: Option<Peak>,
    pub fft_peak: Option<Peak>,
    /// `fft_peak.frequency - server_peak.frequency`, when both exist
    pub peak_frequency_delta: Option<f64>,
}

impl Comparison {
    pub fn between(server: &Spectrum, fft: &Spectrum) -> Self {
        let server_peak = Peak::of(server);
        let fft_peak = Peak::of(fft);
        let peak_frequency_delta = match (server_peak, fft_peak) {
            (Some(s), Some(f)) => Some(f.frequency - s.frequency),
            _ => None,
        };

        Self {
            server_peak,
            fft_peak,
            peak_frequency_delta,
        }
    }
}

/// Everything computed for one measurement, ready to be written
#[derive(Debug, Clone)]
pub struct Report {
    /// Scaled waveform as fetched, before preprocessing
    pub waveform: Waveform,
    pub server: ServerSpectrum,
    pub fft: Spectrum,
    pub comparison: Comparison,
}

/// Fetch the waveform and the server spectrum of a measurement
pub async fn fetch(
    client: &T8Client,
    query: &MeasurementQuery,
) -> CliResult<(Waveform, ServerSpectrum)> {
    let (waveform, server) =
        tokio::try_join!(client.get_waveform(query), client.get_spectrum(query))?;
    Ok((waveform, server))
}

/// Compute the FFT spectrum over the server's band and compare peaks
pub fn analyze(waveform: Waveform, server: ServerSpectrum, preprocess: bool) -> CliResult<Report> {
    let input = if preprocess {
        waveform.preprocessed()
    } else {
        waveform.clone()
    };

    debug!(
        samples = input.len(),
        preprocess,
        fmin = server.fmin,
        fmax = server.fmax,
        "Computing FFT spectrum"
    );

    let fft = SpectrumAnalyzer::new().analyze(&input, server.fmin, server.fmax)?;
    let comparison = Comparison::between(&server.spectrum, &fft);

    Ok(Report {
        waveform,
        server,
        fft,
        comparison,
    })
}

/// Fetch and analyze one measurement
pub async fn run(
    client: &T8Client,
    query: &MeasurementQuery,
    preprocess: bool,
) -> CliResult<Report> {
    let (waveform, server) = fetch(client, query).await?;
    let report = analyze(waveform, server, preprocess)?;

    info!(
        machine = %query.machine,
        point = %query.point,
        server_peak_hz = report.comparison.server_peak.map(|p| p.frequency),
        fft_peak_hz = report.comparison.fft_peak.map(|p| p.frequency),
        "Measurement analyzed"
    );

    Ok(report)
}
