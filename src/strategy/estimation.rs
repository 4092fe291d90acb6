// src/strategy/estimation.rs

//! Demand distribution estimation and the safety-stock calculation that
//! sets the order-up-to level.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{Result, SimulationError};
use crate::simulation::config::PolicyParameters;

/// Parameters derived from the training series. Computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedParameters {
    pub mean: f64,
    pub std_dev: f64,
    pub safety_factor: f64,
    pub safety_stock: f64,
    pub order_up_to_level: f64,
}

impl DerivedParameters {
    /// The stock targets must describe stock that can exist: finite and
    /// non-negative. Checked on entry when parameters are supplied directly.
    pub fn validate(&self) -> Result<()> {
        let targets = [
            ("order-up-to level", self.order_up_to_level),
            ("safety stock", self.safety_stock),
        ];
        for (name, value) in targets {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidPolicy(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Mean and sample standard deviation (ddof = 1) of a demand series.
pub fn estimate(training: &[f64]) -> Result<(f64, f64)> {
    let n = training.len();
    if n < 2 {
        return Err(SimulationError::InsufficientData { len: n });
    }

    let mean = training.iter().sum::<f64>() / n as f64;
    let variance = training
        .iter()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    let std_dev = variance.sqrt();

    // finite inputs can still overflow the sums
    if !mean.is_finite() || !std_dev.is_finite() {
        return Err(SimulationError::Distribution(format!(
            "training statistics overflow (mean {mean}, std dev {std_dev})"
        )));
    }

    Ok((mean, std_dev))
}

/// Standard normal quantile (z-score) of the target cycle service level.
///
/// The quantile is infinite at 0 and 1, so both bounds are rejected.
pub fn safety_factor(target_service_level: f64) -> Result<f64> {
    let p = target_service_level;
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return Err(SimulationError::InvalidServiceLevel { value: p });
    }

    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| SimulationError::Distribution(e.to_string()))?;
    Ok(standard.inverse_cdf(p))
}

/// Safety stock and order-up-to level for the risk horizon L + R.
///
/// # Formula
/// SafetyStock = max(0, z * StdDev * sqrt(L + R))
/// OrderUpTo   = Mean * (L + R) + SafetyStock
///
/// Demand is assumed i.i.d. per day, so variance scales with the horizon.
/// A target below 0.5 yields a negative z; the buffer is floored at zero
/// rather than shaved off the cycle stock.
pub fn derive(training: &[f64], policy: &PolicyParameters) -> Result<DerivedParameters> {
    let (mean, std_dev) = estimate(training)?;
    let z = safety_factor(policy.target_service_level)?;

    let horizon = policy.risk_horizon_days() as f64;
    let buffer = z * std_dev * horizon.sqrt();
    let safety_stock = if buffer > 0.0 { buffer } else { 0.0 };
    let order_up_to_level = mean * horizon + safety_stock;

    if !order_up_to_level.is_finite() {
        return Err(SimulationError::Distribution(format!(
            "order-up-to level overflows over a {horizon}-day horizon"
        )));
    }

    Ok(DerivedParameters {
        mean,
        std_dev,
        safety_factor: z,
        safety_stock,
        order_up_to_level,
    })
}
