//! JSON artifacts for an analyzed measurement
//!
//! All artifacts are serialized before the first file is touched. Every
//! artifact is then staged in a `.tmp` sibling and checked against its
//! target; renames start only once all four are staged, so a failed run
//! leaves the previous artifacts in place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::pipeline::Report;

pub const WAVEFORM_FILE: &str = "waveform.json";
pub const SPECTRUM_FILE: &str = "spectrum.json";
pub const FFT_SPECTRUM_FILE: &str = "fft_spectrum.json";
pub const COMPARISON_FILE: &str = "comparison.json";

#[derive(Serialize)]
struct WaveformArtifact<'a> {
    sample_rate: f64,
    time: Vec<f64>,
    samples: &'a [f64],
}

/// Write every artifact of `report` into `dir`, creating it if needed
///
/// Returns the paths written, in a fixed order.
pub fn write_report(dir: &Path, report: &Report) -> CliResult<Vec<PathBuf>> {
    let waveform = WaveformArtifact {
        sample_rate: report.waveform.sample_rate(),
        time: report.waveform.time_axis(),
        samples: report.waveform.samples(),
    };

    let artifacts = [
        (WAVEFORM_FILE, to_json("waveform", &waveform)?),
        (SPECTRUM_FILE, to_json("spectrum", &report.server.spectrum)?),
        (FFT_SPECTRUM_FILE, to_json("FFT spectrum", &report.fft)?),
        (COMPARISON_FILE, to_json("comparison", &report.comparison)?),
    ];

    fs::create_dir_all(dir).map_err(|e| CliError::output(dir, e))?;

    let targets: Vec<PathBuf> = artifacts.iter().map(|(name, _)| dir.join(name)).collect();
    let staged = stage(&targets, &artifacts)?;

    if let Err(e) = check_targets(&targets) {
        discard(&staged);
        return Err(e);
    }

    for (i, (tmp, path)) in staged.iter().zip(&targets).enumerate() {
        if let Err(e) = fs::rename(tmp, path) {
            discard(&staged[i..]);
            return Err(CliError::output(path, e));
        }
        debug!(path = %path.display(), "Wrote artifact");
    }

    Ok(targets)
}

fn to_json<T: Serialize>(artifact: &'static str, value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|source| CliError::Serialization { artifact, source })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write every artifact to its `.tmp` sibling; on failure none remain
fn stage(targets: &[PathBuf], artifacts: &[(&str, String)]) -> CliResult<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(targets.len());
    for (path, (_, contents)) in targets.iter().zip(artifacts) {
        let tmp = tmp_path(path);
        if let Err(e) = fs::write(&tmp, contents) {
            staged.push(tmp.clone());
            discard(&staged);
            return Err(CliError::output(&tmp, e));
        }
        staged.push(tmp);
    }
    Ok(staged)
}

/// Reject targets a rename cannot replace, before any rename happens
fn check_targets(targets: &[PathBuf]) -> CliResult<()> {
    for path in targets {
        if let Ok(metadata) = fs::symlink_metadata(path) {
            if metadata.is_dir() {
                return Err(CliError::output(
                    path,
                    std::io::Error::other("target is a directory"),
                ));
            }
        }
    }
    Ok(())
}

fn discard(staged: &[PathBuf]) {
    for tmp in staged {
        let _ = fs::remove_file(tmp);
    }
}
