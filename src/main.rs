use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod infrastructure;
mod modules;
mod state;
mod workers;

#[cfg(test)]
mod test_support;

use config::settings::AppConfig;
use modules::conversion::error::ConversionError;
use workers::transcoder::JobOutcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match app::create_state(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Failed to connect services: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("🎥 Starting transcode worker...");

    let result = workers::transcoder::run(&state).await;
    ExitCode::from(exit_status(&result))
}

/// 0 once the outcome was delivered (ERROR included), 1 when reporting failed.
fn exit_status(result: &Result<JobOutcome, ConversionError>) -> u8 {
    match result {
        Ok(JobOutcome::Completed(result)) => {
            info!("✅ Stored {} ({}s)", result.target_key, result.duration_seconds);
            0
        }
        Ok(JobOutcome::Failed(e)) => {
            info!("Job failed and was reported: {}", e);
            0
        }
        Err(e) => {
            error!("❌ Status reporting failed: {}", e);
            1
        }
    }
}
