// src/model/series.rs

use tracing::warn;

use crate::error::{Result, SimulationError};

/// Checks a demand series before it reaches the engine.
///
/// NaN and infinite observations are rejected. Negative observations are
/// clipped to zero: demand cannot be negative, but a stray correction or
/// return in the source data should not abort the run.
pub fn sanitize(series: &[f64]) -> Result<Vec<f64>> {
    let mut clipped = 0usize;
    let mut cleaned = Vec::with_capacity(series.len());

    for (index, &value) in series.iter().enumerate() {
        if !value.is_finite() {
            return Err(SimulationError::InvalidDemand {
                index,
                reason: format!("{value} is not a finite number"),
            });
        }
        if value < 0.0 {
            clipped += 1;
        }
        // also folds -0.0 into +0.0
        cleaned.push(if value > 0.0 { value } else { 0.0 });
    }

    if clipped > 0 {
        warn!(clipped, "negative demand observations clipped to zero");
    }
    Ok(cleaned)
}
