//! numerics CLI - Command Line Front End for numerics-rust
//!
//! Runs the library's solvers, minimisers and regressions on built-in
//! problems and user data.
//!
//! # Commands
//!
//! - `numerics roots --problem <name>` - Solve a nonlinear system with vector Newton
//! - `numerics minimise --problem <name>` - Minimise with BFGS or golden-section search
//! - `numerics regress --data <file>` - Fit ridge or lasso coefficients to CSV data
//! - `numerics check` - Print the effective configuration and run self-tests
//!
//! # Configuration
//!
//! Settings come from `numerics.toml` (or `--config`), then `NUMERICS_*`
//! environment variables, then command-line flags. `RUST_LOG` takes
//! precedence over the configured log level.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{CliArgs, CliConfig};

/// numerics-rust command line
#[derive(Parser)]
#[command(name = "numerics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "numerics.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Iteration cap for every solver
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Convergence tolerance for every solver
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a built-in nonlinear system
    Roots {
        /// System to solve (quadratic-pair, circle-line)
        #[arg(short, long, default_value = "quadratic-pair")]
        problem: String,

        /// Starting point, comma separated (e.g. 1,2)
        #[arg(short, long, allow_hyphen_values = true)]
        start: Option<String>,
    },

    /// Minimise a built-in objective
    Minimise {
        /// Objective (rosenbrock, quadratic, golden)
        #[arg(short, long, default_value = "rosenbrock")]
        problem: String,

        /// Starting point, or `lower,upper` bracket for golden
        #[arg(short, long, allow_hyphen_values = true)]
        start: Option<String>,

        /// Use central-difference gradients
        #[arg(short, long)]
        numerical: bool,
    },

    /// Fit a penalised linear regression to CSV data
    Regress {
        /// CSV file with a header row; the last column is the response
        #[arg(short, long)]
        data: String,

        /// Estimator (ridge, lasso)
        #[arg(short, long, default_value = "ridge")]
        method: String,

        /// Penalty strength
        #[arg(short, long, default_value = "0.001")]
        lambda: f64,

        /// Prepend a constant intercept column
        #[arg(short, long)]
        intercept: bool,
    },

    /// Check configuration and run numerical self-tests
    Check,
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config_file: Some(PathBuf::from(&cli.config)),
        log_level: if cli.verbose {
            Some("debug".to_string())
        } else {
            cli.log_level.clone()
        },
        output_format: cli.format.clone(),
        max_iterations: cli.max_iterations,
        tolerance: cli.tolerance,
    };
    let config = config::build_config(&args).context("failed to load configuration")?;

    init_tracing(&config);
    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "effective configuration");

    let result = match cli.command {
        Commands::Roots { problem, start } => {
            commands::roots::run(&problem, start.as_deref(), &config)
        }
        Commands::Minimise {
            problem,
            start,
            numerical,
        } => commands::minimise::run(&problem, start.as_deref(), numerical, &config),
        Commands::Regress {
            data,
            method,
            lambda,
            intercept,
        } => commands::regress::run(&data, &method, lambda, intercept, &config),
        Commands::Check => commands::check::run(&config),
    };
    result?;

    Ok(())
}
