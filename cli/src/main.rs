//! Hotel Desk: CLI Server
//!
//! Headless guest-request service suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/hotel-desk/config.toml)
//! hotel-desk
//!
//! # Custom config path
//! hotel-desk --config /etc/hotel-desk/config.toml
//!
//! # Override the API port
//! hotel-desk --api-port 8080
//!
//! # Validate config without starting
//! hotel-desk --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use hotel_desk::config::AppConfig;
use hotel_desk::server::{init_tracing, ServerHandle, ServerOptions};

/// Hotel Desk: guest request tracking for hotel staff.
#[derive(Parser, Debug)]
#[command(
    name = "hotel-desk",
    version,
    about = "Multi-tenant hotel guest-request service",
    long_about = "Hotel Desk: REST API for filing, assigning and tracking \
                  guest requests across hotels.\n\n\
                  Default config: ~/.config/hotel-desk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HOTEL_DESK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Seed a demo hotel into an empty database.
    #[arg(long, conflicts_with = "no_seed")]
    seed_demo: bool,

    /// Never seed demo data, even if the config asks for it.
    #[arg(long)]
    no_seed: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(hotel_desk::default_config_path);

    let mut config = if config_path.exists() || !cli.write_config {
        match AppConfig::load(&config_path) {
            Ok(cfg) => {
                // Init tracing first so subsequent logs are formatted properly
                init_tracing(&with_level(cfg.clone(), cli.log_level.as_deref()));
                info!("Configuration loaded from {}", config_path.display());
                cfg
            }
            Err(e) => {
                let cfg = AppConfig::default();
                init_tracing(&with_level(cfg.clone(), cli.log_level.as_deref()));
                error!("Failed to load config from {}: {}", config_path.display(), e);
                error!("Using default configuration.");
                cfg
            }
        }
    } else {
        let cfg = AppConfig::default();
        init_tracing(&with_level(cfg.clone(), cli.log_level.as_deref()));
        cfg
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
        config.logging.level = level.clone();
    }
    if cli.seed_demo {
        config.demo.seed = true;
    }
    if cli.no_seed {
        config.demo.seed = false;
    }

    if cli.write_config {
        config.save(&config_path)?;
        println!("Configuration written to {}", config_path.display());
        return Ok(());
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Page limit  : {} (max {})",
            config.pagination.default_limit, config.pagination.max_limit
        );
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let mut options = ServerOptions::from(config);
    options.auto_migrate = !cli.no_migrate;
    let handle = ServerHandle::start(options).await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

/// The config with the CLI log level applied, for tracing setup.
fn with_level(mut cfg: AppConfig, level: Option<&str>) -> AppConfig {
    if let Some(level) = level {
        cfg.logging.level = level.to_string();
    }
    cfg
}
