//! Lattice Sweep CLI - binomial convergence study of an American put
//!
//! # Commands
//!
//! - `lattice-sweep sweep` - sweep step counts with and without oscillation
//!   resolution and write one data file per sweep (the default)
//! - `lattice-sweep price` - value once per scheme and print the Greeks
//!
//! Exits with status 0 on success and 1 on any error or panic.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pricer_pricing::lattice::TreeType;
use service_cli::{commands, AppConfig};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CONFIG: &str = "lattice-sweep.toml";

/// Binomial lattice convergence sweep
#[derive(Parser)]
#[command(name = "lattice-sweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: lattice-sweep.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep step counts with and without oscillation resolution
    Sweep(SweepArgs),

    /// Value the option once per oscillation scheme
    Price {
        /// Number of time steps
        #[arg(short, long, default_value = "100")]
        steps: usize,

        /// Tree type (additive-eqp, jarrow-rudd, crr, trigeorgis, tian, leisen-reimer)
        #[arg(short, long)]
        tree: Option<TreeType>,
    },
}

#[derive(Args, Default)]
struct SweepArgs {
    /// First step count (inclusive)
    #[arg(long)]
    min_steps: Option<usize>,

    /// Last step count (exclusive)
    #[arg(long)]
    max_steps: Option<usize>,

    /// Tree type
    #[arg(short, long)]
    tree: Option<TreeType>,

    /// Directory for the data files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write a CSV comparing both sweeps
    #[arg(short, long)]
    summary: Option<PathBuf>,

    /// Suppress the console table
    #[arg(short, long)]
    quiet: bool,
}

impl SweepArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(min_steps) = self.min_steps {
            config.sweep.min_steps = min_steps;
        }
        if let Some(max_steps) = self.max_steps {
            config.sweep.max_steps = max_steps;
        }
        if let Some(tree) = self.tree {
            config.sweep.tree = tree;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(summary) = &self.summary {
            config.output.summary = Some(summary.clone());
        }
        if self.quiet {
            config.output.table = false;
        }
    }
}

fn main() -> ExitCode {
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
        Err(_) => {
            eprintln!("unknown error");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG)),
    }
    .context("loading configuration")?
    .with_env_override();
    if cli.verbose {
        config.log_level = "debug".to_string();
    }

    let command = cli.command.unwrap_or(Commands::Sweep(SweepArgs::default()));
    if let Commands::Sweep(args) = &command {
        args.apply(&mut config);
    }
    config.validate()?;

    init_tracing(&config.log_level)?;
    debug!(?config, "configuration loaded");

    match command {
        Commands::Sweep(_) => {
            let outcome = commands::sweep::run(&config)?;
            info!(
                oscillating = outcome.oscillating.len(),
                plain = outcome.plain.len(),
                "sweeps complete"
            );
        }
        Commands::Price { steps, tree } => {
            let tree = tree.unwrap_or(config.sweep.tree);
            commands::price::run(&config, steps, tree, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}
