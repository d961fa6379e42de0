//! Sweep command implementation
//!
//! Runs the oscillation-resolving sweep, then the plain sweep, over the same
//! step range, writing one data file per sweep.

use std::io;
use std::path::Path;
use std::sync::Arc;

use pricer_models::instruments::VanillaOption;
use pricer_models::models::BlackScholesProcess;
use tracing::info;

use crate::config::AppConfig;
use crate::output::{write_comparison_file, ConsoleTable, DataFile};
use crate::sweep::{run_sweep, SweepReport, SweepVariant};
use crate::Result;

/// Reports of both sweeps.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// Oscillation-resolving sweep
    pub oscillating: SweepReport,
    /// Plain sweep
    pub plain: SweepReport,
}

/// Run the sweep command
pub fn run(config: &AppConfig) -> Result<SweepOutcome> {
    let scenario = config.scenario.build()?;
    let mut option = scenario.american_option()?;
    let output = &config.output;

    std::fs::create_dir_all(&output.dir)?;

    let oscillating = sweep_to_file(
        config,
        &mut option,
        scenario.process(),
        SweepVariant::oscillating(config.sweep.smoothing),
        &output.oscillating_path(),
    )?;
    let plain = sweep_to_file(
        config,
        &mut option,
        scenario.process(),
        SweepVariant::plain(),
        &output.plain_path(),
    )?;

    if let Some(path) = output.summary_path() {
        let rows = write_comparison_file(&path, &oscillating, &plain)?;
        info!(path = %path.display(), rows, "comparison written");
    }

    Ok(SweepOutcome { oscillating, plain })
}

fn sweep_to_file(
    config: &AppConfig,
    option: &mut VanillaOption,
    process: &Arc<BlackScholesProcess>,
    variant: SweepVariant,
    path: &Path,
) -> Result<SweepReport> {
    info!(path = %path.display(), "writing sweep");
    let sweep = &config.sweep;
    let steps = sweep.min_steps..sweep.max_steps;
    let mut file = DataFile::create(path)?;

    if config.output.table {
        let mut table = ConsoleTable::new(io::stdout().lock());
        run_sweep(option, process, steps, sweep.tree, variant, &mut [&mut file, &mut table])
    } else {
        run_sweep(option, process, steps, sweep.tree, variant, &mut [&mut file])
    }
}
