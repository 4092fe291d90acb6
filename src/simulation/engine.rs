// src/simulation/engine.rs

use tracing::{debug, info};

use crate::error::{Result, SimulationError};
use crate::model::series::sanitize;
use crate::model::record::{PeriodRecord, SimulationSummary};
use crate::model::state::{Fulfilment, InventoryState};
use crate::simulation::config::PolicyParameters;
use crate::strategy::estimation::{self, DerivedParameters};
use crate::strategy::periodic::PeriodicReviewPolicy;

/// Everything a run hands back to the caller. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub derived: DerivedParameters,
    /// Day 0 (initial state) followed by one record per test day.
    pub records: Vec<PeriodRecord>,
    pub summary: SimulationSummary,
}

/// Estimates the demand distribution from `training`, then replays `test`
/// under the periodic review policy.
pub fn simulate(
    training: &[f64],
    test: &[f64],
    policy: &PolicyParameters,
) -> Result<SimulationOutcome> {
    policy.validate()?;
    if test.is_empty() {
        return Err(SimulationError::EmptySeries);
    }
    let training = sanitize(training)?;
    let derived = estimation::derive(&training, policy)?;
    simulate_with(derived, test, policy)
}

/// Replays `test` with already derived parameters (e.g. a fixed mean and
/// standard deviation shared by several runs).
///
/// On each review day the order is sized against the inventory position
/// carried in from the previous day, before that day's demand is served.
pub fn simulate_with(
    derived: DerivedParameters,
    test: &[f64],
    policy: &PolicyParameters,
) -> Result<SimulationOutcome> {
    policy.validate()?;
    derived.validate()?;
    if test.is_empty() {
        return Err(SimulationError::EmptySeries);
    }
    let demand = sanitize(test)?;

    let review_policy = PeriodicReviewPolicy::from_parameters(policy, &derived);
    let records = PeriodicReviewSimulation::new(review_policy, &demand).run();
    let summary = summarize(&records, policy, derived.safety_stock);

    info!(
        days = demand.len(),
        order_up_to = derived.order_up_to_level,
        safety_stock = derived.safety_stock,
        fill_rate = summary.item_fill_rate,
        cycle_service_level = summary.cycle_service_level,
        "simulation complete"
    );

    Ok(SimulationOutcome {
        derived,
        records,
        summary,
    })
}

/// Day-by-day state machine for one run. Inputs are validated by the
/// caller, so nothing in here can fail.
struct PeriodicReviewSimulation<'a> {
    policy: PeriodicReviewPolicy,
    demand: &'a [f64],
    state: InventoryState,
    current_day: usize,
    history: Vec<PeriodRecord>,
}

impl<'a> PeriodicReviewSimulation<'a> {
    fn new(policy: PeriodicReviewPolicy, demand: &'a [f64]) -> Self {
        let start = policy.order_up_to_level();
        let mut history = Vec::with_capacity(demand.len() + 1);
        history.push(PeriodRecord::initial(start));

        Self {
            policy,
            demand,
            state: InventoryState::new(start),
            current_day: 1,
            history,
        }
    }

    fn run(mut self) -> Vec<PeriodRecord> {
        while self.current_day <= self.demand.len() {
            self.step();
        }
        self.history
    }

    fn step(&mut self) {
        let day = self.current_day;
        let demand = self.demand[day - 1];

        // Review first, against the position carried in from yesterday.
        // With zero lead time the order is then received below, before
        // any demand is served.
        let mut order_qty = 0.0;
        if self.policy.is_review_day(day) {
            let position = self.state.position();
            let qty = self.policy.order_quantity(position);
            if qty > 0.0 {
                self.state
                    .place_order(day, self.policy.lead_time_days(), qty);
                order_qty = qty;
            }
            debug!(day, position, order_qty, "review");
        }

        let received = self.state.receive(day);
        let Fulfilment { sales, lost } = self.state.fulfil(demand);

        self.history.push(PeriodRecord {
            day,
            demand,
            sales,
            inventory_level: self.state.level,
            inventory_position: self.state.position(),
            order_qty,
            received,
            lost_order: lost,
        });
        self.current_day += 1;
    }
}

/// KPIs and costs over days 1..=N. Day 0 carries no demand event and is
/// left out of every total and denominator.
pub fn summarize(
    records: &[PeriodRecord],
    policy: &PolicyParameters,
    safety_stock: f64,
) -> SimulationSummary {
    let days = records.iter().filter(|r| r.day > 0);

    let mut n = 0usize;
    let mut level_sum = 0.0;
    let mut demand_sum = 0.0;
    let mut lost_sum = 0.0;
    let mut orders = 0usize;
    let mut days_without_stockout = 0usize;

    for record in days {
        n += 1;
        level_sum += record.inventory_level;
        demand_sum += record.demand;
        lost_sum += record.lost_order;
        if record.order_qty > 0.0 {
            orders += 1;
        }
        if record.lost_order == 0.0 {
            days_without_stockout += 1;
        }
    }

    let (average_inventory_level, cycle_service_level) = if n == 0 {
        (0.0, 1.0)
    } else {
        (
            level_sum / n as f64,
            days_without_stockout as f64 / n as f64,
        )
    };

    // No demand at all counts as perfect fulfilment.
    let item_fill_rate = if demand_sum > 0.0 {
        (1.0 - lost_sum / demand_sum).clamp(0.0, 1.0)
    } else {
        1.0
    };

    SimulationSummary {
        safety_stock,
        average_inventory_level,
        ordering_cost_total: policy.ordering_cost * orders as f64,
        inventory_cost_total: policy.holding_cost_per_unit_per_day * level_sum,
        shortage_cost_total: policy.shortage_cost_per_unit * lost_sum,
        item_fill_rate,
        cycle_service_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily_policy(lead_time_days: usize) -> PolicyParameters {
        PolicyParameters {
            lead_time_days,
            review_cycle_days: 1,
            target_service_level: 0.95,
            ordering_cost: 100.0,
            holding_cost_per_unit_per_day: 1.0,
            shortage_cost_per_unit: 10.0,
        }
    }

    fn fixed(order_up_to_level: f64) -> DerivedParameters {
        DerivedParameters {
            mean: 0.0,
            std_dev: 0.0,
            safety_factor: 0.0,
            safety_stock: 0.0,
            order_up_to_level,
        }
    }

    #[test]
    fn test_day_zero_is_initial_state() {
        let out = simulate_with(fixed(30.0), &[5.0, 5.0], &daily_policy(2)).unwrap();
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[0], PeriodRecord::initial(30.0));
    }

    #[test]
    fn test_zero_lead_time_receives_before_sales() {
        let out = simulate_with(fixed(10.0), &[10.0, 10.0, 10.0], &daily_policy(0)).unwrap();

        // day 1 starts full, so no order
        assert_eq!(out.records[1].order_qty, 0.0);
        assert_eq!(out.records[1].inventory_level, 0.0);

        // day 2 orders 10 and sells it the same day
        let day2 = out.records[2];
        assert_eq!(day2.order_qty, 10.0);
        assert_eq!(day2.received, 10.0);
        assert_eq!(day2.sales, 10.0);
        assert_eq!(day2.lost_order, 0.0);
    }

    #[test]
    fn test_lead_time_delays_receipt() {
        // S = 20, demand 10 per day, orders arrive two days later
        let out = simulate_with(fixed(20.0), &[10.0; 6], &daily_policy(2)).unwrap();
        let r = &out.records;

        // day 1: nothing to order yet, sell 10
        assert_eq!(r[1].order_qty, 0.0);
        assert_eq!(r[1].inventory_level, 10.0);
        // day 2: position 10, order 10 due day 4
        assert_eq!(r[2].order_qty, 10.0);
        assert_eq!(r[2].received, 0.0);
        assert_eq!(r[2].inventory_level, 0.0);
        assert_eq!(r[2].inventory_position, 10.0);
        // day 3: position 10 again, order 10 due day 5, stock out
        assert_eq!(r[3].order_qty, 10.0);
        assert_eq!(r[3].lost_order, 10.0);
        assert_eq!(r[3].inventory_position, 20.0);
        // day 4: first receipt
        assert_eq!(r[4].received, 10.0);
        assert_eq!(r[4].sales, 10.0);
    }

    #[test]
    fn test_multiple_orders_in_transit() {
        // lead time longer than the review cycle
        let policy = PolicyParameters {
            lead_time_days: 5,
            review_cycle_days: 2,
            ..daily_policy(0)
        };
        let out = simulate_with(fixed(50.0), &[5.0; 12], &policy).unwrap();
        let r = &out.records;

        assert_eq!(r[1].order_qty, 0.0);
        assert_eq!(r[2].order_qty, 5.0);
        assert_eq!(r[3].order_qty, 0.0);
        assert_eq!(r[4].order_qty, 10.0);
        assert_eq!(r[6].order_qty, 10.0);
        // orders from days 2, 4 and 6 are all in transit at the end of day 6
        assert_eq!(r[6].inventory_level, 20.0);
        assert_eq!(r[6].inventory_position, 45.0);
        assert_eq!(r[7].received, 5.0);
        assert_eq!(r[8].received, 0.0);
        assert_eq!(r[9].received, 10.0);
    }

    #[test]
    fn test_no_order_when_position_at_target() {
        let out = simulate_with(fixed(10.0), &[0.0, 0.0, 0.0], &daily_policy(1)).unwrap();
        assert!(out.records.iter().all(|r| r.order_qty == 0.0));
        assert_eq!(out.summary.ordering_cost_total, 0.0);
    }

    #[test]
    fn test_summary_costs() {
        let out = simulate_with(fixed(10.0), &[4.0, 20.0], &daily_policy(3)).unwrap();
        // day 1: sell 4, level 6; day 2: order 4, sell 6, lose 14, level 0
        let s = out.summary;
        assert_eq!(s.ordering_cost_total, 100.0);
        assert_eq!(s.inventory_cost_total, 6.0);
        assert_eq!(s.shortage_cost_total, 140.0);
        assert!((s.average_inventory_level - 3.0).abs() < 1e-12);
        assert!((s.item_fill_rate - (1.0 - 14.0 / 24.0)).abs() < 1e-12);
        assert_eq!(s.cycle_service_level, 0.5);
        assert_eq!(s.total_logistics_cost(), 246.0);
    }

    #[test]
    fn test_zero_total_demand_gives_full_fill_rate() {
        let out = simulate_with(fixed(0.0), &[0.0, 0.0], &daily_policy(0)).unwrap();
        assert_eq!(out.summary.item_fill_rate, 1.0);
        assert_eq!(out.summary.cycle_service_level, 1.0);
    }

    #[test]
    fn test_negative_demand_is_clipped() {
        let out = simulate_with(fixed(5.0), &[-3.0, 2.0], &daily_policy(0)).unwrap();
        assert_eq!(out.records[1].demand, 0.0);
        assert_eq!(out.records[1].inventory_level, 5.0);
    }

    #[test]
    fn test_rejects_impossible_stock_targets() {
        for bad in [-5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                simulate_with(fixed(bad), &[3.0], &daily_policy(0)),
                Err(SimulationError::InvalidPolicy(_))
            ));
        }
    }

    #[test]
    fn test_rejects_overflowing_training_series() {
        assert!(matches!(
            simulate(&[1e308, 1e308], &[1.0], &daily_policy(0)),
            Err(SimulationError::Distribution(_))
        ));
    }

    #[test]
    fn test_days_without_receipt_record_positive_zero() {
        let policy = PolicyParameters {
            lead_time_days: 3,
            review_cycle_days: 7,
            ..daily_policy(0)
        };
        let out = simulate(&[10.0, 12.0, 8.0], &[5.0; 12], &policy).unwrap();

        // order placed on day 7 arrives on day 10; every other day receives nothing
        for r in &out.records[1..] {
            if r.day != 10 {
                assert_eq!(r.received, 0.0);
                assert!(r.received.is_sign_positive(), "-0.0 received on day {}", r.day);
            }
        }
        assert!(out.records[10].received > 0.0);
    }

    #[test]
    fn test_entry_validation() {
        assert!(matches!(
            simulate(&[1.0, 2.0], &[], &daily_policy(0)),
            Err(SimulationError::EmptySeries)
        ));
        assert!(matches!(
            simulate(&[1.0], &[1.0], &daily_policy(0)),
            Err(SimulationError::InsufficientData { len: 1 })
        ));

        let zero_cycle = PolicyParameters {
            review_cycle_days: 0,
            ..daily_policy(0)
        };
        assert!(matches!(
            simulate(&[1.0, 2.0], &[1.0], &zero_cycle),
            Err(SimulationError::InvalidPolicy(_))
        ));

        let certain = PolicyParameters {
            target_service_level: 1.0,
            ..daily_policy(0)
        };
        assert!(matches!(
            simulate(&[1.0, 2.0], &[1.0], &certain),
            Err(SimulationError::InvalidServiceLevel { .. })
        ));

        assert!(matches!(
            simulate(&[1.0, 2.0], &[1.0, f64::NAN], &daily_policy(0)),
            Err(SimulationError::InvalidDemand { index: 1, .. })
        ));
    }
}
