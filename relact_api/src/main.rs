//! # relact
//!
//! Actuator cycle daemon: loads configuration, opens the relay board,
//! serves the HTTP control API and tears everything down on SIGINT/SIGTERM.
//!
//! # Usage
//!
//! ```bash
//! # Simulated relays on the default port
//! relact --simulate
//!
//! # Raspberry Pi build with a custom config
//! relact --config /etc/relact/relact.toml --driver rppal
//! ```

use clap::Parser;
use relact_common::consts::DEFAULT_CONFIG_PATH;
use relact_common::prelude::*;
use relact_control::ActuatorController;
use relact_control::clock::SystemClock;
use relact_control::config::CycleConfig;
use relact_hal::{DriverRegistry, RelayBoard};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// relact - linear actuator relay cycle controller
#[derive(Parser, Debug)]
#[command(name = "relact")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Linear actuator relay cycle controller with HTTP control API")]
#[command(long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Listen address (overrides [api].bind)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Use the simulation driver regardless of configuration
    #[arg(short, long)]
    simulate: bool,

    /// Line driver to use (overrides [relay].driver)
    #[arg(short, long)]
    driver: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match RelactConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not up yet.
            eprintln!("Failed to load {}: {}", args.config.display(), e);
            std::process::exit(1);
        }
    };
    setup_tracing(&args, config.shared.log_level);

    if let Err(e) = run(&args, config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, mut config: RelactConfig) -> Result<(), Box<dyn std::error::Error>> {
    if args.simulate {
        config.relay.driver = "simulation".to_string();
    } else if let Some(driver) = &args.driver {
        config.relay.driver = driver.clone();
    }
    let bind: SocketAddr = match args.bind {
        Some(addr) => addr,
        None => config.api.bind.parse()?,
    };

    info!(
        "{} v{} starting ({})",
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );

    let registry = DriverRegistry::builtin();
    let driver = registry.create_driver(&config.relay.driver)?;
    let board = RelayBoard::open(driver, &config.relay)?;
    let cycle = CycleConfig::from_settings(&config.cycle)?;
    let controller = Arc::new(ActuatorController::new(
        board,
        cycle,
        Arc::new(SystemClock::new()),
    ));

    let runtime = tokio::runtime::Runtime::new()?;
    let served = runtime.block_on(serve(Arc::clone(&controller), bind));

    info!("Shutting down");
    if let Err(e) = controller.shutdown() {
        warn!("Shutdown incomplete: {}", e);
    }
    served
}

async fn serve(
    controller: Arc<ActuatorController>,
    bind: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("HTTP API listening on http://{}", bind);

    axum::serve(listener, relact_api::router(controller))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured
    };

    let filter = EnvFilter::from_default_env().add_directive(
        level
            .as_directive()
            .parse()
            .unwrap_or_else(|_| tracing::Level::INFO.into()),
    );

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}
