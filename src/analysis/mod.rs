//! Analysis modules.
//!
//! Descriptive statistics and the dashboard's aggregations.

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
