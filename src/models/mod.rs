//! Data model
//!
//! Core types shared across the store, aggregator, comparison engine
//! and exporters.

pub mod agent;
pub mod message;
pub mod session;
