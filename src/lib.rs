//! Periodic-review ("order up to S every R days") inventory simulation.
//!
//! The estimator turns a training demand series into a safety stock and an
//! order-up-to level; the simulator then replays a held-out test series day
//! by day under lost sales and reports service levels and logistics cost.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{Result, SimulationError};
pub use model::record::{PeriodRecord, SimulationSummary};
pub use simulation::config::PolicyParameters;
pub use simulation::engine::{simulate, simulate_with, SimulationOutcome};
pub use strategy::estimation::{derive, estimate, safety_factor, DerivedParameters};
