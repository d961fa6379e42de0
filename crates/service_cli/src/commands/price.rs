//! Price command implementation
//!
//! Values the scenario's option once per oscillation scheme at a fixed step
//! count and prints value and Greeks next to the European Black-Scholes
//! reference.

use std::io::Write;
use std::sync::Arc;

use pricer_models::instruments::OptionResults;
use pricer_pricing::analytical::AnalyticEuropeanEngine;
use pricer_pricing::lattice::{BinomialVanillaEngine, OscillationScheme, TreeType};
use tracing::info;

use crate::config::AppConfig;
use crate::scenario::MarketScenario;
use crate::Result;

/// One row of the price table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    /// Row label
    pub label: String,
    /// Value and Greeks
    pub results: OptionResults,
}

/// Run the price command, printing the table to `out`
pub fn run<W: Write>(
    config: &AppConfig,
    steps: usize,
    tree: TreeType,
    out: &mut W,
) -> Result<Vec<PriceRow>> {
    info!(steps, %tree, "pricing");
    let scenario = config.scenario.build()?;
    let rows = price_rows(&scenario, steps, tree)?;

    writeln!(
        out,
        "{:<34} {:>14} {:>12} {:>12} {:>12}",
        "Engine", "NPV", "Delta", "Gamma", "Theta"
    )?;
    for row in &rows {
        let r = &row.results;
        writeln!(
            out,
            "{:<34} {:>14.8} {:>12.6} {:>12.6} {:>12.6}",
            row.label,
            r.value,
            r.delta.unwrap_or(f64::NAN),
            r.gamma.unwrap_or(f64::NAN),
            r.theta.unwrap_or(f64::NAN),
        )?;
    }
    out.flush()?;

    Ok(rows)
}

fn price_rows(scenario: &MarketScenario, steps: usize, tree: TreeType) -> Result<Vec<PriceRow>> {
    let process = scenario.process();
    let mut american = scenario.american_option()?;
    let mut rows = Vec::new();

    for scheme in [
        OscillationScheme::None,
        OscillationScheme::BlackScholesSmoothing,
        OscillationScheme::RichardsonSmoothing,
    ] {
        let engine = BinomialVanillaEngine::new(process.clone(), tree, steps, scheme)?;
        american.set_pricing_engine(Arc::new(engine));
        rows.push(PriceRow {
            label: format!("American {} ({})", tree, scheme),
            results: american.calculate()?,
        });
    }

    let mut european = scenario.european_option();
    let engine = BinomialVanillaEngine::new(process.clone(), tree, steps, OscillationScheme::None)?;
    european.set_pricing_engine(Arc::new(engine));
    rows.push(PriceRow {
        label: format!("European {}", tree),
        results: european.calculate()?,
    });

    european.set_pricing_engine(Arc::new(AnalyticEuropeanEngine::new(process.clone())));
    rows.push(PriceRow {
        label: "European Black-Scholes".to_string(),
        results: european.calculate()?,
    });

    Ok(rows)
}
