//! # Geo Horizon Server - Main Entry Point
//!
//! HTTP server exposing a per-game geospatial point index. This entry point
//! handles CLI parsing, configuration loading, and application lifecycle
//! management.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with default configuration
//! geo-horizon
//!
//! # Specify custom configuration
//! geo-horizon --config production.toml
//!
//! # Override specific settings
//! geo-horizon --bind 0.0.0.0:8080 --log-level debug
//!
//! # JSON logging for production
//! geo-horizon --json-logs
//! ```
//!
//! ## Configuration
//!
//! The server loads configuration from a TOML file (default: `config.toml`).
//! If the file doesn't exist, a default configuration will be created.
//!
//! ## Signal Handling
//!
//! The server handles graceful shutdown on:
//! - SIGINT (Ctrl+C)
//! - SIGTERM (Unix systems)

use tracing::error;

mod app;
mod cli;
mod config;
mod logging;
mod signals;

pub use app::Application;
pub use cli::CliArgs;
pub use config::{AppConfig, LoggingSettings, MonitoringSettings, ServerSettings};

/// Main entry point for the Geo Horizon server.
///
/// # Exit Codes
///
/// * **0**: Successful execution and shutdown
/// * **1**: Error during startup, configuration, or runtime
///
/// Called from `main` under `#[tokio::main]`.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Load configuration to get logging settings
    let mut logging_settings = AppConfig::load_from_file(&args.config_path)
        .await
        .unwrap_or_default()
        .logging;
    if let Some(level) = &args.log_level {
        logging_settings.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&logging_settings, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("❌ Application error: {:?}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("❌ Failed to start application: {e:?}");
            std::process::exit(1);
        }
    }

    Ok(())
}
