// src/strategy/periodic.rs

use crate::simulation::config::PolicyParameters;
use crate::strategy::estimation::DerivedParameters;

/// Periodic review, order-up-to policy ("order up to S every R days").
///
/// Between reviews nothing is ordered, whatever the stock looks like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicReviewPolicy {
    review_cycle_days: usize,
    lead_time_days: usize,
    order_up_to_level: f64,
}

impl PeriodicReviewPolicy {
    pub fn new(review_cycle_days: usize, lead_time_days: usize, order_up_to_level: f64) -> Self {
        Self {
            review_cycle_days,
            lead_time_days,
            order_up_to_level,
        }
    }

    pub fn from_parameters(policy: &PolicyParameters, derived: &DerivedParameters) -> Self {
        Self::new(
            policy.review_cycle_days,
            policy.lead_time_days,
            derived.order_up_to_level,
        )
    }

    pub fn lead_time_days(&self) -> usize {
        self.lead_time_days
    }

    pub fn order_up_to_level(&self) -> f64 {
        self.order_up_to_level
    }

    pub fn is_review_day(&self, day: usize) -> bool {
        self.review_cycle_days > 0 && day % self.review_cycle_days == 0
    }

    /// Quantity that lifts `inventory_position` back to the order-up-to level.
    ///
    /// If the position is already at or above the target we order 0; there
    /// are no negative orders (returns).
    pub fn order_quantity(&self, inventory_position: f64) -> f64 {
        (self.order_up_to_level - inventory_position).max(0.0)
    }
}
