//! Execution record store
//!
//! Holds at most one session per slot (`fabric`, `traditional`) and
//! exposes the only mutation surface external producers use. All
//! mutations are synchronous and atomic with respect to each other; a
//! caller that drives the store from multiple execution contexts must
//! serialize its calls (e.g. behind a `Mutex<SessionStore>`).
//!
//! Writes referencing a session id that no longer occupies a slot are
//! dropped silently: a delayed callback from a superseded session must
//! not corrupt the live one. Mutations return `true` when applied.

use chrono::Utc;
use uuid::Uuid;

use crate::comparison::ComparisonReport;
use crate::metrics;
use crate::models::agent::AgentRecord;
use crate::models::message::AgentMessage;
use crate::models::session::{SessionMetrics, SessionMode, SessionState, SessionStatus};

/// Two-slot session store
///
/// Creating a session of a given mode replaces any previous occupant of
/// that slot; the replacement is destructive, so callers export prior
/// results first if they need them.
#[derive(Debug, Default)]
pub struct SessionStore {
    fabric: Option<SessionState>,
    traditional: Option<SessionState>,
    comparison_mode: bool,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn start_session(mode: SessionMode, input: &str) -> SessionState {
        // Uuid keeps ids unique even for sessions created within the
        // same millisecond
        let session_id = format!("{}-{}", mode, Uuid::new_v4());
        tracing::info!("Session {} created ({})", session_id, mode);

        SessionState {
            session_id: session_id.clone(),
            mode,
            status: SessionStatus::Running,
            input: input.to_string(),
            output: String::new(),
            messages: Vec::new(),
            metrics: SessionMetrics::new(session_id, mode, Utc::now()),
            error: None,
        }
    }

    /// Start a multi-agent session in the fabric slot
    pub fn create_fabric_session(&mut self, input: &str) -> String {
        let session = Self::start_session(SessionMode::Fabric, input);
        let session_id = session.session_id.clone();
        self.fabric = Some(session);
        session_id
    }

    /// Start a single-model session in the traditional slot
    pub fn create_traditional_session(&mut self, input: &str) -> String {
        let session = Self::start_session(SessionMode::Traditional, input);
        let session_id = session.session_id.clone();
        self.traditional = Some(session);
        session_id
    }

    /// Start both slots with the same input for side-by-side comparison
    pub fn create_comparison_session(&mut self, input: &str) -> (String, String) {
        self.comparison_mode = true;
        let fabric_id = self.create_fabric_session(input);
        let traditional_id = self.create_traditional_session(input);
        (fabric_id, traditional_id)
    }

    /// Start a session by mode.
    ///
    /// For [`SessionMode::Comparison`] both slots are created and the
    /// fabric session id is returned; the traditional id is available
    /// through [`SessionStore::traditional_session`]. Callers that need
    /// both ids up front use [`SessionStore::create_comparison_session`].
    pub fn create_session(&mut self, mode: SessionMode, input: &str) -> String {
        match mode {
            SessionMode::Fabric => self.create_fabric_session(input),
            SessionMode::Traditional => self.create_traditional_session(input),
            SessionMode::Comparison => self.create_comparison_session(input).0,
        }
    }

    fn session_mut(&mut self, session_id: &str) -> Option<&mut SessionState> {
        if let Some(session) = self.fabric.as_mut() {
            if session.session_id == session_id {
                return Some(session);
            }
        }
        if let Some(session) = self.traditional.as_mut() {
            if session.session_id == session_id {
                return Some(session);
            }
        }
        None
    }

    /// Append a message to a running session's timeline.
    ///
    /// Messages are stored in call order; timestamps are not consulted.
    /// Returns `false` (no-op) for a stale session id or a session no
    /// longer running.
    pub fn append_message(&mut self, session_id: &str, message: AgentMessage) -> bool {
        let Some(session) = self.session_mut(session_id) else {
            tracing::debug!("Dropping message for stale session {}", session_id);
            return false;
        };
        if !session.is_running() {
            return false;
        }

        session.messages.push(message);
        true
    }

    /// Insert or replace the execution record for a role and recompute
    /// the session's rollup totals synchronously.
    ///
    /// A record whose token total disagrees with `prompt + completion` is
    /// clamped at ingestion. Returns `false` (no-op) for a stale session
    /// id or a session no longer running.
    pub fn upsert_agent_record(&mut self, session_id: &str, mut record: AgentRecord) -> bool {
        let Some(session) = self.session_mut(session_id) else {
            tracing::debug!("Dropping record for stale session {}", session_id);
            return false;
        };
        if !session.is_running() {
            return false;
        }

        if !record.tokens.is_consistent() {
            tracing::warn!(
                "Clamping inconsistent token total for {} in {}: {} != {} + {}",
                record.agent_id,
                session_id,
                record.tokens.total,
                record.tokens.prompt,
                record.tokens.completion
            );
            record.tokens = record.tokens.clamped();
        }

        let agents = &mut session.metrics.agents;
        match agents.iter_mut().find(|r| r.agent_id == record.agent_id) {
            Some(existing) => *existing = record,
            None => agents.push(record),
        }

        let totals = metrics::aggregate(&session.metrics.agents);
        session.metrics.total_tokens = totals.total_tokens;
        session.metrics.total_cost = totals.total_cost;
        session.metrics.total_processing_time_ms = totals.total_processing_time_ms;
        session.metrics.workflow_steps =
            metrics::workflow_steps(session.mode, &session.metrics.agents);
        true
    }

    /// Transition a running session to `completed`.
    ///
    /// Sets the output, end time and wall clock, and fixes the rollup's
    /// processing time to the additive total over its records. Repeat
    /// calls are no-ops, so elapsed time is never double-counted.
    pub fn finalize(&mut self, session_id: &str, output: &str) -> bool {
        let Some(session) = self.session_mut(session_id) else {
            return false;
        };
        if !session.is_running() {
            return false;
        }

        let now = Utc::now();
        session.status = SessionStatus::Completed;
        session.output = output.to_string();
        session.metrics.end_time = Some(now);
        session.metrics.wall_clock_ms =
            Some((now - session.metrics.start_time).num_milliseconds().max(0) as u64);

        let totals = metrics::aggregate(&session.metrics.agents);
        session.metrics.total_processing_time_ms = totals.total_processing_time_ms;

        tracing::info!("Session {} completed", session_id);
        true
    }

    /// Transition a running session to `error`; terminal.
    pub fn set_error(&mut self, session_id: &str, message: &str) -> bool {
        let Some(session) = self.session_mut(session_id) else {
            return false;
        };
        if !session.is_running() {
            return false;
        }

        session.status = SessionStatus::Error;
        session.error = Some(message.to_string());
        tracing::info!("Session {} failed: {}", session_id, message);
        true
    }

    /// Clear both slots unconditionally.
    ///
    /// In-flight producers for the abandoned sessions are not notified;
    /// their subsequent writes are dropped by the stale-id check.
    pub fn reset(&mut self) {
        self.fabric = None;
        self.traditional = None;
        self.comparison_mode = false;
    }

    /// Current occupant of the fabric slot, including partial state
    pub fn fabric_session(&self) -> Option<&SessionState> {
        self.fabric.as_ref()
    }

    /// Current occupant of the traditional slot, including partial state
    pub fn traditional_session(&self) -> Option<&SessionState> {
        self.traditional.as_ref()
    }

    /// Look up a session by id across both slots
    pub fn session(&self, session_id: &str) -> Option<&SessionState> {
        [self.fabric.as_ref(), self.traditional.as_ref()]
            .into_iter()
            .flatten()
            .find(|s| s.session_id == session_id)
    }

    /// Whether the store was last driven in comparison mode
    pub fn comparison_mode(&self) -> bool {
        self.comparison_mode
    }

    /// Comparison of the two slots' rollups.
    ///
    /// `None` until both sessions exist and are completed; partial
    /// numbers are never reported.
    pub fn comparison(&self) -> Option<ComparisonReport> {
        match (self.fabric.as_ref(), self.traditional.as_ref()) {
            (Some(fabric), Some(traditional)) => {
                ComparisonReport::from_sessions(fabric, traditional)
            }
            _ => None,
        }
    }
}
