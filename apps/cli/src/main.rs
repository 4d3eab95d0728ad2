use std::process::ExitCode;

use clap::Parser;
use t8_client::{Args, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before the filter reads RUST_LOG / LOG_LEVEL
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(t8_client::log_filter(
            t8_shared_config::log_directives().as_deref(),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let result = match Config::from_args(args) {
        Ok(config) => t8_client::run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            e.log();
            ExitCode::FAILURE
        }
    }
}
