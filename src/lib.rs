//! NeuroFabric Session Metrics Engine
//!
//! This library provides the in-memory backing store for the NeuroFabric
//! dashboard. It handles:
//! - Per-agent execution records and per-session rollups
//! - Pure metrics aggregation (tokens, cost, processing time, throughput)
//! - Session lifecycle management (running -> completed | error)
//! - Percentage comparison between a multi-agent ("fabric") run and a
//!   single-model ("traditional") baseline
//! - JSON and Markdown export of completed sessions
//!
//! The store performs no I/O and holds no timers. An external producer
//! (an orchestration backend or a scripted simulator, see [`scenario`])
//! drives it through `create_*` / `append_message` / `upsert_agent_record`
//! and exactly one terminal call per session.

pub mod comparison;
pub mod export;
pub mod metrics;
pub mod models;
pub mod scenario;
pub mod store;

pub use comparison::{ComparisonReport, MetricDelta, Verdict};
pub use models::agent::{AgentRecord, AgentRecordBuilder, AgentRole, AgentStatus, TokenUsage};
pub use models::message::{AgentMessage, MessageType, Participant};
pub use models::session::{SessionMetrics, SessionMode, SessionState, SessionStatus};
pub use store::SessionStore;
