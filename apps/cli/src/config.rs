//! Command-line arguments and run configuration
//!
//! Flags take precedence over the environment; anything not given on the
//! command line falls back to [`CommonConfig::from_env`].

use std::path::PathBuf;

use clap::Parser;
use t8_api_client::MeasurementQuery;
use t8_shared_config::{CommonConfig, ServerConfig};

use crate::error::CliResult;

/// Fetch a T8 measurement and compare its FFT spectrum with the server's
#[derive(Parser, Debug, Clone)]
#[command(name = "t8-client", version)]
#[command(about = "Fetch a T8 measurement and compare its FFT spectrum with the server's")]
pub struct Args {
    /// T8 server base URL
    #[arg(long, env = "T8_HOST")]
    pub host: Option<String>,

    /// Machine tag
    #[arg(long)]
    pub machine: String,

    /// Measurement point tag
    #[arg(long)]
    pub point: String,

    /// Processing mode tag
    #[arg(long)]
    pub pmode: String,

    /// Acquisition time, YYYY-MM-DDTHH:MM:SS (UTC)
    #[arg(long)]
    pub datetime: String,

    /// Directory receiving the JSON artifacts
    #[arg(long, env = "T8_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Analyze raw samples without zero-padding or windowing
    #[arg(long)]
    pub no_preprocess: bool,
}

/// Everything one run needs
#[derive(Debug, Clone)]
pub struct Config {
    /// Server connection settings
    pub server: ServerConfig,

    /// Measurement to fetch
    pub query: MeasurementQuery,

    /// Directory receiving the JSON artifacts
    pub output_dir: PathBuf,

    /// Pad and window the waveform before the FFT
    pub preprocess: bool,
}

impl Config {
    /// Merge parsed flags with environment configuration
    pub fn from_args(args: Args) -> CliResult<Self> {
        let common = CommonConfig::from_env()?;
        Ok(Self::merge(args, common))
    }

    fn merge(args: Args, common: CommonConfig) -> Self {
        let mut server = common.server;
        if let Some(host) = args.host {
            server.host = host;
        }

        Self {
            server,
            query: MeasurementQuery::new(args.machine, args.point, args.pmode, args.datetime),
            output_dir: args.output_dir.unwrap_or(common.output_dir),
            preprocess: !args.no_preprocess,
        }
    }
}
