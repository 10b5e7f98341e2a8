//! Session rollup calculation
//!
//! Pure functions that fold a set of agent records into session totals.
//! Recomputed on every record upsert and at finalization; the result
//! depends only on the record set, so repeated calls are idempotent.

use serde::{Deserialize, Serialize};

use crate::models::agent::AgentRecord;
use crate::models::session::SessionMode;

/// Field-wise sums over a record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollupTotals {
    pub total_tokens: u64,
    pub total_cost: f64,
    /// Sum of per-agent times (additive accounting, not wall clock)
    pub total_processing_time_ms: u64,
}

/// Fold agent records into session totals
pub fn aggregate(records: &[AgentRecord]) -> RollupTotals {
    RollupTotals {
        total_tokens: records.iter().map(|r| r.tokens.total).sum(),
        total_cost: records.iter().map(|r| r.cost).sum(),
        total_processing_time_ms: records.iter().map(|r| r.processing_time_ms).sum(),
    }
}

/// Throughput in tokens per second
///
/// Defined as 0.0 when no time has been attributed yet, so dashboards
/// stay stable before completion instead of seeing NaN or infinity.
pub fn tokens_per_second(total_tokens: u64, total_time_ms: u64) -> f64 {
    if total_time_ms == 0 {
        0.0
    } else {
        total_tokens as f64 / (total_time_ms as f64 / 1000.0)
    }
}

/// Workflow step count for a session
///
/// Fabric sessions count contributing records; traditional sessions are a
/// single-step workflow by definition.
pub fn workflow_steps(mode: SessionMode, records: &[AgentRecord]) -> u32 {
    match mode {
        SessionMode::Traditional => 1,
        _ => records.len() as u32,
    }
}
