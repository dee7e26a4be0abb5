//! Pizzeria - mediator-driven order pipeline
//!
//! CLI entry point for running orders through the simulated pizzeria.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use pizzeria::cli::{Cli, Command, OutputFormat, get_log_path};
use pizzeria::config::Config;
use pizzeria::domain::OrderPayload;
use pizzeria::events::PipelineEvent;
use pizzeria::pipeline::{Pizzeria, demo_orders, watch_until_complete};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    info!(
        "Pizzeria loaded config: dispatch-delay-ms={}, stage-delay-ms={}",
        config.simulation.dispatch_delay_ms, config.simulation.stage_delay_ms
    );

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Demo { format }) => cmd_run(&config, &demo_orders(), format).await,
        Some(Command::Order { orders, format }) => cmd_run(&config, &orders, format).await,
        Some(Command::Config) => cmd_config(&config),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Run orders through a fresh pipeline, narrating every step
async fn cmd_run(config: &Config, orders: &[OrderPayload], format: OutputFormat) -> Result<()> {
    debug!(count = orders.len(), %format, "cmd_run: called");
    let pizzeria = Pizzeria::start(config).await.context("Failed to start the pipeline")?;
    let mut events = pizzeria.subscribe();

    pizzeria.place_orders(orders).await.context("Failed to place orders")?;

    let timeout = run_timeout(config, orders.len());
    watch_until_complete(&mut events, orders.len(), timeout, |event| print_event(event, format))
        .await
        .context("Orders did not complete")?;

    let metrics = pizzeria.coordinator().metrics().await?;
    info!(?metrics, "cmd_run: all orders delivered");
    if format == OutputFormat::Text {
        println!();
        println!(
            "{} orders delivered ({} events dispatched, peak queue depth {})",
            metrics.orders_completed, metrics.events_dispatched, metrics.peak_queue_depth
        );
    }

    pizzeria.shutdown().await?;
    Ok(())
}

/// Upper bound for a run: every event of every order dispatched serially
fn run_timeout(config: &Config, orders: usize) -> Duration {
    let per_event = config
        .simulation
        .dispatch_delay()
        .saturating_add(config.simulation.stage_delay());
    let orders = u32::try_from(orders.max(1)).unwrap_or(u32::MAX);
    per_event
        .saturating_mul(5)
        .saturating_mul(orders)
        .saturating_add(Duration::from_secs(5))
}

fn print_event(event: &PipelineEvent, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", event),
        OutputFormat::Json => match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!(error = %e, "Failed to serialize event"),
        },
    }
}

/// Print the effective configuration as YAML
fn cmd_config(config: &Config) -> Result<()> {
    debug!("cmd_config: called");
    print!("{}", serde_yaml::to_string(config).context("Failed to serialize config")?);
    Ok(())
}
