//! Step-count sweep of the binomial engine.
//!
//! [`run_sweep`] values one option for every step count of a range, each
//! time attaching a fresh [`BinomialVanillaEngine`], and streams every point
//! to a set of [`SweepSink`]s as it is produced. The oscillating and plain
//! variants are the same sweep run with different [`SweepVariant`]s.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pricer_models::instruments::VanillaOption;
use pricer_models::models::BlackScholesProcess;
use pricer_pricing::lattice::{BinomialVanillaEngine, OscillationScheme, TreeType};
use tracing::{debug, info};

use crate::Result;

/// One valuation of the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Option value
    pub npv: f64,
    /// Wall-clock time of the valuation, at microsecond resolution
    pub elapsed: Duration,
}

impl SweepPoint {
    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_micros() as f64 / 1e6
    }
}

/// Which engine variant a sweep runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepVariant {
    /// Title printed above the console table
    pub title: &'static str,
    /// Oscillation handling of every engine in the sweep
    pub scheme: OscillationScheme,
}

impl SweepVariant {
    /// Engines resolving the odd/even oscillation with `scheme`.
    pub fn oscillating(scheme: OscillationScheme) -> Self {
        Self {
            title: "Binomial Tree with oscillations resolution scheme",
            scheme,
        }
    }

    /// Plain engines.
    pub fn plain() -> Self {
        Self {
            title: "Binomial Tree without oscillations resolution scheme",
            scheme: OscillationScheme::None,
        }
    }
}

/// Receives sweep points as they are produced.
pub trait SweepSink {
    /// Called once before the first point.
    fn begin(&mut self, _variant: &SweepVariant) -> Result<()> {
        Ok(())
    }

    /// Called once per step count, in ascending order.
    fn record(&mut self, steps: usize, point: &SweepPoint) -> Result<()>;

    /// Called once after the last point.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Results of one sweep, ordered by step count.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    variant: SweepVariant,
    tree: TreeType,
    points: BTreeMap<usize, SweepPoint>,
}

impl SweepReport {
    /// Variant the sweep ran.
    pub fn variant(&self) -> &SweepVariant {
        &self.variant
    }

    /// Tree type of every engine.
    pub fn tree(&self) -> TreeType {
        self.tree
    }

    /// Points keyed by step count.
    pub fn points(&self) -> &BTreeMap<usize, SweepPoint> {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no step count was valued.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value at `steps`, if swept.
    pub fn npv(&self, steps: usize) -> Option<f64> {
        self.points.get(&steps).map(|p| p.npv)
    }

    /// Point with the largest step count.
    pub fn last(&self) -> Option<(usize, &SweepPoint)> {
        self.points.iter().next_back().map(|(steps, point)| (*steps, point))
    }

    /// Sum of valuation times.
    pub fn total_elapsed(&self) -> Duration {
        self.points.values().map(|p| p.elapsed).sum()
    }

    /// Largest `|NPV(n) − NPV(n−1)|` over consecutive step counts.
    pub fn max_oscillation(&self) -> f64 {
        self.points
            .values()
            .zip(self.points.values().skip(1))
            .map(|(a, b)| (b.npv - a.npv).abs())
            .fold(0.0, f64::max)
    }
}

/// Value `option` for every step count in `steps`.
///
/// The engine attached to `option` is replaced at every step; after the
/// sweep the option holds the engine of the last step count.
///
/// # Errors
/// The first engine or valuation failure, or any sink failure. Points
/// already handed to the sinks stay written.
pub fn run_sweep(
    option: &mut VanillaOption,
    process: &Arc<BlackScholesProcess>,
    steps: Range<usize>,
    tree: TreeType,
    variant: SweepVariant,
    sinks: &mut [&mut dyn SweepSink],
) -> Result<SweepReport> {
    info!(
        scheme = %variant.scheme,
        %tree,
        from = steps.start,
        to = steps.end,
        "starting sweep"
    );

    for sink in sinks.iter_mut() {
        sink.begin(&variant)?;
    }

    let mut points = BTreeMap::new();
    for n in steps {
        let engine = BinomialVanillaEngine::new(process.clone(), tree, n, variant.scheme)?;
        option.set_pricing_engine(Arc::new(engine));

        let start = Instant::now();
        let npv = option.npv()?;
        let elapsed = Duration::from_micros(start.elapsed().as_micros() as u64);

        let point = SweepPoint { npv, elapsed };
        debug!(steps = n, npv, micros = elapsed.as_micros() as u64, "sweep point");
        for sink in sinks.iter_mut() {
            sink.record(n, &point)?;
        }
        points.insert(n, point);
    }

    for sink in sinks.iter_mut() {
        sink.finish()?;
    }

    let report = SweepReport {
        variant,
        tree,
        points,
    };
    if let Some((last_steps, last)) = report.last() {
        info!(
            scheme = %variant.scheme,
            points = report.len(),
            last_steps,
            last_npv = last.npv,
            total_secs = report.total_elapsed().as_secs_f64(),
            max_oscillation = report.max_oscillation(),
            "sweep finished"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioConfig;
    use crate::CliError;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Recorder {
        titles: Vec<&'static str>,
        steps: Vec<usize>,
        finished: bool,
    }

    impl SweepSink for Recorder {
        fn begin(&mut self, variant: &SweepVariant) -> Result<()> {
            self.titles.push(variant.title);
            Ok(())
        }

        fn record(&mut self, steps: usize, _point: &SweepPoint) -> Result<()> {
            self.steps.push(steps);
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    struct FailAt(usize);

    impl SweepSink for FailAt {
        fn record(&mut self, steps: usize, _point: &SweepPoint) -> Result<()> {
            if steps == self.0 {
                Err(CliError::invalid_argument("disk full"))
            } else {
                Ok(())
            }
        }
    }

    fn sweep(
        variant: SweepVariant,
        steps: Range<usize>,
        sinks: &mut [&mut dyn SweepSink],
    ) -> Result<SweepReport> {
        let scenario = ScenarioConfig::default().build().unwrap();
        let mut option = scenario.american_option().unwrap();
        run_sweep(
            &mut option,
            scenario.process(),
            steps,
            TreeType::AdditiveEqp,
            variant,
            sinks,
        )
    }

    #[test]
    fn test_sweep_covers_range_in_order() {
        let mut recorder = Recorder::default();
        let report = sweep(SweepVariant::plain(), 3..10, &mut [&mut recorder]).unwrap();

        assert_eq!(report.len(), 7);
        assert_eq!(recorder.steps, (3..10).collect::<Vec<_>>());
        assert_eq!(report.points().keys().copied().collect::<Vec<_>>(), recorder.steps);
        assert_eq!(recorder.titles, vec![SweepVariant::plain().title]);
        assert!(recorder.finished);
        assert_eq!(report.last().map(|(n, _)| n), Some(9));
    }

    #[test]
    fn test_sweep_reference_values() {
        let plain = sweep(SweepVariant::plain(), 3..4, &mut []).unwrap();
        assert_relative_eq!(plain.npv(3).unwrap(), 4.261668864793317, epsilon = 1e-9);

        let smoothed = sweep(
            SweepVariant::oscillating(OscillationScheme::BlackScholesSmoothing),
            3..4,
            &mut [],
        )
        .unwrap();
        assert_relative_eq!(smoothed.npv(3).unwrap(), 4.204374500433069, epsilon = 1e-9);
        assert_eq!(smoothed.variant().scheme, OscillationScheme::BlackScholesSmoothing);
    }

    #[test]
    fn test_smoothed_sweep_oscillates_less() {
        let plain = sweep(SweepVariant::plain(), 20..61, &mut []).unwrap();
        let smoothed = sweep(
            SweepVariant::oscillating(OscillationScheme::BlackScholesSmoothing),
            20..61,
            &mut [],
        )
        .unwrap();
        assert!(plain.max_oscillation() > 10.0 * smoothed.max_oscillation());
    }

    #[test]
    fn test_engine_error_stops_sweep() {
        let mut recorder = Recorder::default();
        let result = sweep(
            SweepVariant::oscillating(OscillationScheme::RichardsonSmoothing),
            3..10,
            &mut [&mut recorder],
        );
        assert!(matches!(result, Err(CliError::Lattice(_))));
        assert!(recorder.steps.is_empty());
        assert!(!recorder.finished);
    }

    #[test]
    fn test_sink_error_stops_sweep() {
        let mut recorder = Recorder::default();
        let mut failing = FailAt(5);
        let result = sweep(SweepVariant::plain(), 3..10, &mut [&mut recorder, &mut failing]);
        assert!(result.is_err());
        assert_eq!(recorder.steps, vec![3, 4, 5]);
    }

    #[test]
    fn test_report_statistics() {
        let report = sweep(SweepVariant::plain(), 3..6, &mut []).unwrap();
        let values: Vec<f64> = report.points().values().map(|p| p.npv).collect();
        let expected = (values[1] - values[0]).abs().max((values[2] - values[1]).abs());
        assert_eq!(report.max_oscillation(), expected);
        assert!(report.total_elapsed() >= report.points()[&3].elapsed);
        assert!(report.points().values().all(|p| p.elapsed_secs() >= 0.0));
        assert!(!report.is_empty());
        assert_eq!(report.tree(), TreeType::AdditiveEqp);
    }
}
