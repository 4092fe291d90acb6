pub mod pipeline;
pub mod record;
pub mod series;
pub mod state;
