use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::solver::SolveResult;

/// Label of the terminal row holding the objective value.
pub const OBJECTIVE_LABEL: &str = "Objective";

const CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: f64,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        ReportRow {
            label: label.into(),
            value,
        }
    }
}

/// One row per variable in `names` order, then the objective row.
///
/// A result without an objective value gets `NaN` in the terminal row.
pub fn build_rows(result: &SolveResult, names: &[String]) -> Vec<ReportRow> {
    names
        .iter()
        .map(|name| ReportRow::new(name.as_str(), result.value(name).unwrap_or(0.0)))
        .chain([ReportRow::new(
            OBJECTIVE_LABEL,
            result.objective.unwrap_or(f64::NAN),
        )])
        .collect()
}

/// Objective value of a report, if it carries one.
pub fn objective_of(rows: &[ReportRow]) -> Option<f64> {
    rows.iter()
        .rev()
        .find(|row| row.label == OBJECTIVE_LABEL)
        .map(|row| row.value)
        .filter(|value| !value.is_nan())
}

/// The report file at a fixed path, overwritten on every persist.
#[derive(Debug, Clone)]
pub struct ReportFile {
    path: PathBuf,
}

impl ReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReportFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn persist(&self, rows: &[ReportRow]) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let mut writer = BufWriter::new(file);
        serde_yaml::to_writer(&mut writer, rows)?;
        writer.flush().map_err(|e| Error::io(&self.path, e))?;

        info!("wrote {} report rows to {}", rows.len(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<ReportRow>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NoReport(self.path.clone()));
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }
}

/// Print the rows as a table, objective last.
pub fn render_table(rows: &[ReportRow], out: &mut impl Write) -> io::Result<()> {
    let width = label_width(rows);
    for row in rows {
        writeln!(out, "{:width$}  {:>12.4}", row.label, row.value)?;
    }
    Ok(())
}

/// Horizontal bar chart of the variable rows, scaled to the largest magnitude.
pub fn render_chart(rows: &[ReportRow], out: &mut impl Write) -> io::Result<()> {
    let bars: Vec<&ReportRow> = rows
        .iter()
        .filter(|row| row.label != OBJECTIVE_LABEL)
        .collect();
    let width = label_width(rows);
    let largest = bars
        .iter()
        .map(|row| row.value.abs())
        .fold(0.0_f64, f64::max);

    for row in bars {
        let length = if largest > 0.0 {
            (row.value.abs() / largest * CHART_WIDTH as f64).round() as usize
        } else {
            0
        };
        let mark = if row.value < 0.0 { "-" } else { "#" };
        writeln!(
            out,
            "{:width$} | {:bar$} {:.2}",
            row.label,
            mark.repeat(length),
            row.value,
            bar = CHART_WIDTH
        )?;
    }
    Ok(())
}

fn label_width(rows: &[ReportRow]) -> usize {
    rows.iter().map(|row| row.label.len()).max().unwrap_or(0)
}
