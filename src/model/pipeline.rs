// src/model/pipeline.rs

use std::collections::BTreeMap;

/// An order in transit: `quantity` is owed on `due_day`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingReceipt {
    pub due_day: usize,
    pub quantity: f64,
}

/// Deliveries in transit, keyed by the day they arrive.
///
/// Several orders may be outstanding at once when the lead time is longer
/// than the review cycle. Orders due on the same day are merged.
#[derive(Debug, Clone, Default)]
pub struct ReceiptPipeline {
    due: BTreeMap<usize, f64>,
    outstanding: f64,
}

impl ReceiptPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// An order enters the pipeline.
    pub fn schedule(&mut self, receipt: PendingReceipt) {
        *self.due.entry(receipt.due_day).or_insert(0.0) += receipt.quantity;
        self.outstanding += receipt.quantity;
    }

    /// Removes and returns everything due on or before `day`.
    ///
    /// Entries are only ever scheduled for today or later, so in practice
    /// this is exactly the quantity due today.
    pub fn take_due(&mut self, day: usize) -> f64 {
        let later = self.due.split_off(&(day + 1));
        // fold from +0.0: an empty `sum()` yields -0.0, which leaks into exports
        let arrived = std::mem::replace(&mut self.due, later)
            .into_values()
            .fold(0.0, |acc, q| acc + q);
        self.outstanding -= arrived;
        if self.due.is_empty() {
            // keep float drift from leaking into the inventory position
            self.outstanding = 0.0;
        }
        arrived
    }

    /// Total quantity ordered but not yet received.
    pub fn outstanding(&self) -> f64 {
        self.outstanding
    }

    pub fn len(&self) -> usize {
        self.due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }
}
