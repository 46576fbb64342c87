//! Shared types for the pizza lunch order service
//!
//! Holds the order model, the aggregation engine that turns a day's orders
//! into slice totals and pizza counts, and logging setup. Nothing in this
//! crate performs I/O; persistence and HTTP live in the webserver.

pub mod config;
pub mod errors;
pub mod logging;
pub mod tally;
pub mod types;

pub use config::{DEFAULT_BUFFER_FRACTION, SLICES_PER_PIZZA, TallyConfig};
pub use errors::*;
pub use tally::{
    OrderTotals, SliceCounts, TallyEngine, TallySummary, compute_pizzas_needed, compute_totals,
    pizzas_for_slices,
};
pub use types::*;
