//! Sweep output: data files, console table and comparison CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::sweep::{SweepPoint, SweepReport, SweepSink, SweepVariant};
use crate::{CliError, Result};

const SEPARATOR: &str = "----------------------------------";

/// Plain-text data file with one `"<steps> <npv>"` line per point.
#[derive(Debug)]
pub struct DataFile<W: Write> {
    path: PathBuf,
    writer: W,
}

impl DataFile<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| CliError::output(&path, e))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }
}

impl<W: Write> DataFile<W> {
    /// Data file over an arbitrary writer, reported as `path` on failure.
    pub fn from_writer(path: impl Into<PathBuf>, writer: W) -> Self {
        Self {
            path: path.into(),
            writer,
        }
    }

    /// Path used in error messages.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SweepSink for DataFile<W> {
    fn record(&mut self, steps: usize, point: &SweepPoint) -> Result<()> {
        writeln!(self.writer, "{} {}", steps, point.npv)
            .map_err(|e| CliError::output(&self.path, e))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| CliError::output(&self.path, e))
    }
}

/// Console table of a sweep.
///
/// ```text
/// Binomial Tree with oscillations resolution scheme
/// ----------------------------------
/// | Time Step  | Value | Elapsed Time
/// |3           |4.204374500433069|0.000012 s
/// ----------------------------------
/// ```
#[derive(Debug)]
pub struct ConsoleTable<W: Write> {
    out: W,
}

impl<W: Write> ConsoleTable<W> {
    /// Table printed to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SweepSink for ConsoleTable<W> {
    fn begin(&mut self, variant: &SweepVariant) -> Result<()> {
        writeln!(self.out, "{}", variant.title)?;
        writeln!(self.out, "{}", SEPARATOR)?;
        writeln!(self.out, "| Time Step  | Value | Elapsed Time ")?;
        Ok(())
    }

    fn record(&mut self, steps: usize, point: &SweepPoint) -> Result<()> {
        writeln!(
            self.out,
            "|{}           |{}|{} s",
            steps,
            point.npv,
            point.elapsed_secs()
        )?;
        writeln!(self.out, "{}", SEPARATOR)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ComparisonRow {
    steps: usize,
    oscillating_npv: f64,
    plain_npv: f64,
    difference: f64,
}

/// Write the step-by-step comparison of two sweeps as CSV.
///
/// Only step counts present in both reports are written. Returns the
/// number of rows.
pub fn write_comparison<W: Write>(
    writer: W,
    oscillating: &SweepReport,
    plain: &SweepReport,
) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for (&steps, point) in oscillating.points() {
        let Some(plain_npv) = plain.npv(steps) else {
            continue;
        };
        csv.serialize(ComparisonRow {
            steps,
            oscillating_npv: point.npv,
            plain_npv,
            difference: point.npv - plain_npv,
        })?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}

/// [`write_comparison`] into a new file at `path`.
pub fn write_comparison_file(
    path: &Path,
    oscillating: &SweepReport,
    plain: &SweepReport,
) -> Result<usize> {
    let file = File::create(path).map_err(|e| CliError::output(path, e))?;
    write_comparison(BufWriter::new(file), oscillating, plain)
}
