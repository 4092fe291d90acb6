// src/simulation/config.rs

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Replenishment policy and cost inputs for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// Days between placing an order and receiving it. 0 means same-day receipt.
    pub lead_time_days: usize,
    /// Days between two reviews. Must be at least 1.
    pub review_cycle_days: usize,
    /// Target cycle service level, strictly inside (0, 1).
    pub target_service_level: f64,
    /// Fixed cost per placed order (transport).
    pub ordering_cost: f64,
    pub holding_cost_per_unit_per_day: f64,
    pub shortage_cost_per_unit: f64,
}

impl Default for PolicyParameters {
    fn default() -> Self {
        Self {
            lead_time_days: 3,
            review_cycle_days: 7,
            target_service_level: 0.95,
            ordering_cost: 140_000.0,
            holding_cost_per_unit_per_day: 3.0,
            shortage_cost_per_unit: 1_000.0,
        }
    }
}

impl PolicyParameters {
    /// Risk horizon L + R: the stock ordered today has to last until the
    /// order placed at the next review arrives.
    pub fn risk_horizon_days(&self) -> usize {
        self.lead_time_days + self.review_cycle_days
    }

    /// Entry checks for the simulator. The service level is checked
    /// separately when the safety factor is computed.
    pub fn validate(&self) -> Result<()> {
        if self.review_cycle_days < 1 {
            return Err(SimulationError::InvalidPolicy(
                "review cycle must be at least 1 day".to_string(),
            ));
        }

        let costs = [
            ("ordering cost", self.ordering_cost),
            ("holding cost", self.holding_cost_per_unit_per_day),
            ("shortage cost", self.shortage_cost_per_unit),
        ];
        for (name, value) in costs {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidPolicy(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}
