//! Per-iteration search statistics (spec §6.3).

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the ILS driver's progress record: the state of the current,
/// candidate, and best solutions after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStat {
    pub iteration: u64,
    pub current_cost: i64,
    pub current_feasible: bool,
    pub candidate_cost: i64,
    pub candidate_feasible: bool,
    pub best_cost: i64,
    pub best_feasible: bool,
    pub runtime_seconds: f64,
}

/// Errors from reading or writing a CSV statistics file.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes `stats` as CSV, one row per iteration, using `delimiter`
/// (typically `b','`).
pub fn write_csv<W: Write>(writer: W, stats: &[IterationStat], delimiter: u8) -> Result<(), StatsError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    for row in stats {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads a CSV statistics file written by [`write_csv`].
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Vec<IterationStat>, StatsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        out.push(record?);
    }
    Ok(out)
}
