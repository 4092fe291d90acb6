// src/model/state.rs

use crate::model::pipeline::{PendingReceipt, ReceiptPipeline};

/// Running stock state of the single simulated item.
///
/// Owned by one simulation run and threaded through the daily transition,
/// so separate runs never share anything.
#[derive(Debug, Clone)]
pub struct InventoryState {
    /// On-hand stock. Never negative: unmet demand is lost, not backlogged.
    pub level: f64,
    /// Goods ordered but not yet arrived.
    pub pipeline: ReceiptPipeline,
}

/// Outcome of serving one day's demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fulfilment {
    pub sales: f64,
    pub lost: f64,
}

impl InventoryState {
    pub fn new(initial_level: f64) -> Self {
        Self {
            level: initial_level,
            pipeline: ReceiptPipeline::new(),
        }
    }

    /// On-hand plus everything still in transit.
    pub fn position(&self) -> f64 {
        self.level + self.pipeline.outstanding()
    }

    /// Books every delivery due on `day` into on-hand stock.
    /// Returns the quantity received.
    pub fn receive(&mut self, day: usize) -> f64 {
        let received = self.pipeline.take_due(day);
        self.level += received;
        received
    }

    /// Ships what is on hand. The shortfall is recorded as lost.
    pub fn fulfil(&mut self, demand: f64) -> Fulfilment {
        let sales = demand.min(self.level);
        let lost = demand - sales;
        self.level = (self.level - sales).max(0.0);
        Fulfilment { sales, lost }
    }

    /// Puts an order of `quantity` into the pipeline, due `lead_time` days
    /// after `day`. The position reflects it immediately.
    pub fn place_order(&mut self, day: usize, lead_time: usize, quantity: f64) {
        self.pipeline.schedule(PendingReceipt {
            due_day: day + lead_time,
            quantity,
        });
    }
}
