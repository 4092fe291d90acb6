// src/io/demand.rs

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::model::series::sanitize;

/// Reads one demand column from a CSV file with a header row.
///
/// # Arguments
/// * `file_path` - The CSV file, one row per day in chronological order.
/// * `column` - Header of the demand column. The first column is used when `None`.
pub fn load_demand_csv<P: AsRef<Path>>(file_path: P, column: Option<&str>) -> Result<Vec<f64>> {
    let mut rdr = csv::Reader::from_path(file_path.as_ref())?;
    read_demand(&mut rdr, column)
}

/// Same as [`load_demand_csv`] for any reader (in-memory data, stdin).
pub fn read_demand<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    column: Option<&str>,
) -> Result<Vec<f64>> {
    let index = match column {
        None => 0,
        Some(name) => rdr
            .headers()?
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| SimulationError::InvalidDemand {
                index: 0,
                reason: format!("column '{name}' not found in header"),
            })?,
    };

    let mut series = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let cell = record.get(index).unwrap_or("").trim();
        // Blank cells are gaps in the export, not zero demand.
        if cell.is_empty() {
            continue;
        }
        let value: f64 = cell.parse().map_err(|_| SimulationError::InvalidDemand {
            index: row,
            reason: format!("'{cell}' is not a number"),
        })?;
        series.push(value);
    }

    debug!(observations = series.len(), "demand series loaded");
    sanitize(&series)
}

/// Splits a series into training and test parts without shuffling.
///
/// The test part is the last `ceil(test_ratio * n)` observations, the
/// training part is everything before it.
pub fn chronological_split(series: &[f64], test_ratio: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    if !test_ratio.is_finite() || test_ratio <= 0.0 || test_ratio >= 1.0 {
        return Err(SimulationError::InvalidSplit(format!(
            "test ratio must be strictly between 0 and 1, got {test_ratio}"
        )));
    }

    let n = series.len();
    let n_test = (test_ratio * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);

    if n_test == 0 || n_train < 2 {
        return Err(SimulationError::InvalidSplit(format!(
            "{n} observations at test ratio {test_ratio} leave {n_train} for training and {n_test} for testing"
        )));
    }

    let (training, test) = series.split_at(n_train);
    Ok((training.to_vec(), test.to_vec()))
}

/// Generates a daily demand series from a Normal distribution.
///
/// Seeded, so the same arguments always give the same series. Values are
/// rounded to whole units and clamped at zero.
///
/// # Arguments
/// * `days` - Length of the series.
/// * `mean` - Average daily demand.
/// * `std_dev` - Daily volatility.
/// * `seed` - RNG seed.
pub fn generate_normal_demand(days: usize, mean: f64, std_dev: f64, seed: u64) -> Result<Vec<f64>> {
    let normal =
        Normal::new(mean, std_dev).map_err(|e| SimulationError::Distribution(e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok((0..days)
        .map(|_| {
            let units = normal.sample(&mut rng).round();
            if units > 0.0 {
                units
            } else {
                0.0
            }
        })
        .collect())
}
