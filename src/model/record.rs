// src/model/record.rs

use serde::Serialize;

/// One row of the simulation table. Day 0 is the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodRecord {
    pub day: usize,
    pub demand: f64,
    pub sales: f64,
    pub inventory_level: f64,
    pub inventory_position: f64,
    pub order_qty: f64,
    pub received: f64,
    pub lost_order: f64,
}

impl PeriodRecord {
    /// Starting condition: stocked up to `order_up_to_level`, no flows.
    pub fn initial(order_up_to_level: f64) -> Self {
        Self {
            day: 0,
            demand: 0.0,
            sales: 0.0,
            inventory_level: order_up_to_level,
            inventory_position: order_up_to_level,
            order_qty: 0.0,
            received: 0.0,
            lost_order: 0.0,
        }
    }
}

/// Realized KPIs and costs of a run, over days 1..=N.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub safety_stock: f64,
    pub average_inventory_level: f64,
    pub ordering_cost_total: f64,
    pub inventory_cost_total: f64,
    pub shortage_cost_total: f64,
    /// Share of demanded units that were served.
    pub item_fill_rate: f64,
    /// Share of days without any lost sale.
    pub cycle_service_level: f64,
}

impl SimulationSummary {
    /// Transport + holding + shortage.
    pub fn total_logistics_cost(&self) -> f64 {
        self.ordering_cost_total + self.inventory_cost_total + self.shortage_cost_total
    }
}
