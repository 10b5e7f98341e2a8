//! Session data types
//!
//! The top-level session object and its derived metrics rollup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::agent::{AgentRecord, AgentRole};
use super::message::AgentMessage;

/// Execution mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Multi-agent collaboration
    Fabric,
    /// Single-model baseline
    Traditional,
    /// Coordinated creation of both slots with the same input
    Comparison,
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::Fabric => write!(f, "fabric"),
            SessionMode::Traditional => write!(f, "traditional"),
            SessionMode::Comparison => write!(f, "comparison"),
        }
    }
}

/// Session lifecycle status
///
/// `idle -> running -> {completed, error}`; terminal once reached. A slot
/// leaves a terminal state only by being replaced with a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Completed,
    Error,
}

impl SessionStatus {
    /// Whether this status admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Error)
    }
}

/// Aggregated metrics rollup for a session
///
/// `total_processing_time_ms` is the sum of per-agent times, not the
/// session wall clock: agents may run concurrently in a real backend, but
/// the rollup uses additive accounting so time composes the same way cost
/// and tokens do. The wall clock is tracked separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub session_id: String,
    pub mode: SessionMode,
    pub total_processing_time_ms: u64,
    /// `end_time - start_time`, set at finalization
    pub wall_clock_ms: Option<u64>,
    pub total_tokens: u64,
    pub total_cost: f64,
    /// Contributing record count for fabric; fixed 1 for traditional
    pub workflow_steps: u32,
    /// One record per role; last write per role wins
    pub agents: Vec<AgentRecord>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl SessionMetrics {
    /// Create an empty rollup for a freshly started session
    pub fn new(session_id: String, mode: SessionMode, start_time: DateTime<Utc>) -> Self {
        let workflow_steps = match mode {
            SessionMode::Traditional => 1,
            _ => 0,
        };

        Self {
            session_id,
            mode,
            total_processing_time_ms: 0,
            wall_clock_ms: None,
            total_tokens: 0,
            total_cost: 0.0,
            workflow_steps,
            agents: Vec::new(),
            start_time,
            end_time: None,
        }
    }

    /// Look up the record for a role, if one has been reported
    pub fn agent(&self, role: AgentRole) -> Option<&AgentRecord> {
        self.agents.iter().find(|r| r.agent_id == role)
    }

    /// Throughput over the additive processing time; 0.0 before any time
    /// has been attributed, never NaN or infinite
    pub fn tokens_per_second(&self) -> f64 {
        crate::metrics::tokens_per_second(self.total_tokens, self.total_processing_time_ms)
    }
}

/// Top-level session object occupying one store slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    pub mode: SessionMode,
    pub status: SessionStatus,
    pub input: String,
    pub output: String,
    /// Insertion-ordered; append-only while running
    pub messages: Vec<AgentMessage>,
    pub metrics: SessionMetrics,
    /// Present only when `status == Error`
    pub error: Option<String>,
}

impl SessionState {
    /// Whether the session still accepts writes
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }
}
