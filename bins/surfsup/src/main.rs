//! SurfsUp server binary
//!
//! Serves Hawaii climate observations from a read-only SQLite file, and
//! provides commands to validate and initialize the configuration.

use anyhow::{Context, Result};
use cli::{Cli, Commands};
use climate::{climate_routes, ClimateApiState, ClimateStore, SqliteClimateStore};
use config::{
    generate_default_config, load_config, load_config_or_default, save_config, validate_config,
    SurfsUpConfig, ValidationReport,
};
use observability::{init_logging, init_metrics, LogFormat};
use server::{HttpServer, ServerConfig, ServerExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command() {
        Commands::Serve {
            config,
            port,
            database,
        } => serve_command(config, port, database).await,
        Commands::Validate { config } => {
            init_logging("surfsup", LogFormat::Pretty)?;
            validate_command(config)
        }
        Commands::Init { output } => {
            init_logging("surfsup", LogFormat::Pretty)?;
            init_command(output)
        }
    }
}

async fn serve_command(
    config_path: PathBuf,
    port_override: Option<u16>,
    database_override: Option<String>,
) -> Result<()> {
    let mut config = load_config_or_default(&config_path)?;

    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(url) = database_override {
        config.database.url = url;
    }

    // An unknown format is reported by the validator below
    let format = LogFormat::parse(&config.logging.format).unwrap_or_default();
    init_logging(&config.service.name, format)?;
    debug!(path = ?config_path, "Configuration resolved");

    let report = validate_config(&config);
    log_warnings(&report);
    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start server due to configuration errors");
    }

    if config.metrics.enabled {
        init_metrics(config.metrics.port)?;
    }

    run_server(config).await
}

async fn run_server(config: SurfsUpConfig) -> Result<()> {
    let store = SqliteClimateStore::connect(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;

    match store.most_recent_date().await? {
        Some(date) => info!(most_recent = %date, "Climate data loaded"),
        None => warn!("Measurement table is empty; date-windowed routes will return no data"),
    }

    let state = Arc::new(ClimateApiState::new(Arc::new(store.clone()), config.api.clone()));
    let server = HttpServer::new(
        ServerConfig::from(&config.server),
        &config.service.name,
        climate_routes(state),
    );

    info!(
        service = %config.service.name,
        host = %config.server.host,
        port = config.server.port,
        precipitation = %config.api.precipitation,
        strict_dates = config.api.strict_dates,
        "Starting climate API"
    );

    let result = server.run_with_shutdown_signal().await;
    store.close().await;
    result?;

    info!("Climate API stopped");
    Ok(())
}

fn log_warnings(report: &ValidationReport) {
    if !report.warnings.is_empty() {
        warn!("Configuration warnings:");
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message);
        }
    }
}

fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Database: {}", config.database.url);
    println!("Precipitation layout: {}", config.api.precipitation);
    println!("Strict dates: {}", config.api.strict_dates);

    Ok(())
}

fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    if output_path.exists() {
        anyhow::bail!("Refusing to overwrite existing file: {:?}", output_path);
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&generate_default_config(), output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Point database.url at your hawaii.sqlite (or set SURFSUP_DATABASE_URL)");
    println!(
        "  2. Run 'surfsup validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'surfsup serve --config {:?}' to start the API",
        output_path
    );

    Ok(())
}
