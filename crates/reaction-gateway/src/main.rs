//! Reaction bot entry point
//!
//! Run with:
//! ```bash
//! BOT_TOKEN=... cargo run -p reaction-gateway
//! ```
//!
//! Configuration is loaded from environment variables and an optional
//! `.env` file.

use reaction_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration decides the log format, so it is loaded first
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_app(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, code = e.error_code(), "Reaction bot failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), reaction_common::AppError> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        verbose = config.app.verbose,
        row_length = config.post.layout.row_length(),
        "Configuration loaded"
    );

    reaction_gateway::run(config).await
}
