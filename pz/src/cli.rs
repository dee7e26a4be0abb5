//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::OrderPayload;

/// Pizzeria - mediator-driven order pipeline
#[derive(Parser)]
#[command(
    name = "pz",
    about = "Simulate a pizzeria order pipeline coordinated by a mediator",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/pizzeria/logs/pizzeria.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,

    /// Override the coordinator's per-dispatch delay
    #[arg(long, global = true, value_name = "MS")]
    pub dispatch_delay_ms: Option<u64>,

    /// Override each stage's work delay
    #[arg(long, global = true, value_name = "MS")]
    pub stage_delay_ms: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ms) = self.dispatch_delay_ms {
            config.simulation.dispatch_delay_ms = ms;
        }
        if let Some(ms) = self.stage_delay_ms {
            config.simulation.stage_delay_ms = ms;
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the three sample orders (the last one urgent)
    Demo {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the given orders through the pipeline
    Order {
        /// Orders as ITEM:TABLE or ITEM:TABLE:urgent
        #[arg(value_name = "ITEM:TABLE[:urgent]", required = true)]
        orders: Vec<OrderPayload>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config,
}

/// Output format for pipeline narration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Path of the log file written by the binary
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pizzeria")
        .join("logs")
        .join("pizzeria.log")
}
