//! T8 client library
//!
//! Drives one measurement through fetch, analysis and output. The binary in
//! `main.rs` only parses flags, sets up logging and maps the outcome to an
//! exit code.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;

use t8_api_client::T8Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{Args, Config};
pub use error::{CliError, CliResult};
pub use pipeline::{Comparison, Peak, Report};

/// Filter used when no directives are configured or they fail to parse
pub const DEFAULT_LOG_FILTER: &str = "t8_client=info,t8_api_client=info";

/// Build the log filter from `RUST_LOG`/`LOG_LEVEL` style directives
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Fetch, analyze and write the artifacts for `config.query`
///
/// Nothing is written unless every fetch and computation succeeds.
pub async fn run(config: &Config) -> CliResult<Vec<PathBuf>> {
    let client = T8Client::new(&config.server)?;

    info!(
        host = %config.server.host,
        machine = %config.query.machine,
        point = %config.query.point,
        pmode = %config.query.pmode,
        datetime = %config.query.datetime,
        "Fetching measurement"
    );

    let report = pipeline::run(&client, &config.query, config.preprocess).await?;
    let written = output::write_report(&config.output_dir, &report)?;

    info!(
        output_dir = %config.output_dir.display(),
        files = written.len(),
        "Artifacts written"
    );

    Ok(written)
}
