//! Main application logic and lifecycle management.
//!
//! This module contains the core `Application` struct that orchestrates
//! server startup, monitoring, and shutdown.

use crate::{
    cli::CliArgs,
    config::AppConfig,
    logging::display_banner,
    signals::{setup_signal_handlers, wait_for_signal},
};
use game_server::{GameServer, ShutdownState};
use point_index::GeoIndex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Upper bound on the time in-flight requests get to drain after a signal.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Main application struct.
///
/// The `Application` struct manages the complete lifecycle of the server,
/// including configuration loading, server initialization, statistics
/// reporting, and graceful shutdown handling.
pub struct Application {
    /// Loaded application configuration
    config: AppConfig,
    /// Game server instance
    server: GameServer,
}

impl Application {
    /// Creates a new application instance.
    ///
    /// # Process
    ///
    /// 1. Load configuration from file (creating default if missing)
    /// 2. Apply command-line overrides
    /// 3. Validate merged configuration
    /// 4. Display startup banner
    /// 5. Initialize game server with configuration
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        info!("🔧 Loading configuration from: {}", args.config_path.display());
        let mut config = AppConfig::load_from_file(&args.config_path).await?;

        apply_overrides(&mut config, &args);

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        }
        info!("✅ Configuration loaded and validated successfully");

        display_banner();

        let server = GameServer::new(config.to_server_config()?);

        Ok(Self { config, server })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the server until a termination signal arrives, then shuts down
    /// gracefully.
    ///
    /// A second signal during shutdown exits the process immediately.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        info!("🌟 Starting Geo Horizon Server Application");
        self.log_configuration_summary();

        let index = self.server.index();
        let shutdown_state = ShutdownState::new();

        let mut server_handle = {
            let server = self.server;
            let shutdown_state = shutdown_state.clone();
            tokio::spawn(async move { server.start_with_shutdown_state(shutdown_state).await })
        };

        let monitoring_handle = spawn_monitoring(Arc::clone(&index), self.config.monitoring.stats_interval_secs);

        info!("✅ Geo Horizon Server is now running!");
        info!("🛑 Press Ctrl+C to gracefully shutdown");

        tokio::select! {
            signal = setup_signal_handlers(&shutdown_state) => signal?,
            finished = &mut server_handle => {
                if let Some(handle) = monitoring_handle {
                    handle.abort();
                }
                return match finished {
                    Ok(Ok(())) => Err("Server stopped unexpectedly".into()),
                    Ok(Err(e)) => Err(e.into()),
                    Err(e) => Err(format!("Server task failed: {e}").into()),
                };
            }
        }

        // merciless shutdown
        tokio::spawn(async {
            if let Err(e) = wait_for_signal().await {
                error!("Failed to set up merciless shutdown signal handler: {e}");
                return;
            }

            warn!("Shutdown handler received again! I'll make this quick.");
            std::process::exit(1);
        });

        if let Some(handle) = monitoring_handle {
            handle.abort();
        }

        info!("⏳ Waiting for in-flight requests to complete...");
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut server_handle).await {
            Ok(Ok(Ok(()))) => info!("✅ Server task completed gracefully"),
            Ok(Ok(Err(e))) => error!("❌ Server error during shutdown: {e}"),
            Ok(Err(e)) => error!("❌ Server task failed: {e}"),
            Err(_) => {
                warn!("⏰ Server task did not complete within {:?}, aborting", SHUTDOWN_TIMEOUT);
                server_handle.abort();
            }
        }

        log_final_statistics(&index);
        info!("✅ Geo Horizon Server shutdown complete");

        Ok(())
    }

    /// Logs the configuration summary at startup.
    fn log_configuration_summary(&self) {
        info!("📋 Configuration Summary:");
        info!("  🌐 Bind address: {}", self.config.server.bind_address);
        info!("  📦 Max body size: {} bytes", self.config.server.max_body_bytes);
        info!("  🏷️ Max name length: {}", self.config.server.max_name_length);
        info!(
            "  🌲 Linear scan threshold: {} points",
            self.config.index.linear_scan_threshold
        );
        match self.config.monitoring.stats_interval_secs {
            0 => info!("  📊 Statistics reporting disabled"),
            secs => info!("  📊 Statistics every {}s", secs),
        }
    }
}

fn apply_overrides(config: &mut AppConfig, args: &CliArgs) {
    if let Some(bind_address) = &args.bind_address {
        config.server.bind_address = bind_address.clone();
    }

    if let Some(log_level) = &args.log_level {
        config.logging.level = log_level.clone();
    }

    if args.json_logs {
        config.logging.json_format = true;
    }
}

/// Starts the periodic statistics task, or returns `None` when disabled.
fn spawn_monitoring(index: Arc<GeoIndex>, interval_secs: u64) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick completes immediately.
        interval.tick().await;
        let mut last_queries = 0u64;

        loop {
            interval.tick().await;

            match index.stats() {
                Ok(stats) => {
                    let queries_this_period = stats.total_queries - last_queries;
                    last_queries = stats.total_queries;
                    info!(
                        "📊 Index Health - {} games | {} points | {} queries in the last {}s",
                        stats.games, stats.points, queries_this_period, interval_secs
                    );
                }
                Err(e) => warn!("⚠️ Failed to collect index statistics: {e}"),
            }
        }
    }))
}

/// Logs final statistics during shutdown.
fn log_final_statistics(index: &GeoIndex) {
    info!("📊 Final Statistics:");
    match index.stats() {
        Ok(stats) => {
            info!("  - Games: {}", stats.games);
            info!("  - Points: {}", stats.points);
            info!("  - Insertions: {}", stats.total_insertions);
            info!("  - Removals: {}", stats.total_removals);
            info!("  - Queries: {}", stats.total_queries);
        }
        Err(e) => warn!("  - Unavailable: {e}"),
    }
}
