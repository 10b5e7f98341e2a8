//! Metrics aggregation
//!
//! Pure read-side projections over a session's agent records.

pub mod aggregate;

pub use aggregate::*;
