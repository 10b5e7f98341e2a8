//! Agent data types
//!
//! The closed set of agent roles and the per-agent execution record
//! collected within a session.

use serde::{Deserialize, Serialize};

/// Role identifiers for the fixed agent set
///
/// The set is closed: producers must send one of these identifiers.
/// Unknown identifiers are rejected at the parsing boundary rather than
/// silently cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Coordinator,
    Analyst,
    SpecialistMath,
    SpecialistText,
    SuperCritic,
    Traditional,
}

impl AgentRole {
    /// All declared roles
    pub const ALL: [AgentRole; 6] = [
        AgentRole::Coordinator,
        AgentRole::Analyst,
        AgentRole::SpecialistMath,
        AgentRole::SpecialistText,
        AgentRole::SuperCritic,
        AgentRole::Traditional,
    ];

    /// Wire identifier used by producers and the presentation layer
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Coordinator => "coordinator",
            AgentRole::Analyst => "analyst",
            AgentRole::SpecialistMath => "specialist_math",
            AgentRole::SpecialistText => "specialist_text",
            AgentRole::SuperCritic => "super_critic",
            AgentRole::Traditional => "traditional",
        }
    }

    /// Display label for dashboards
    pub fn label(&self) -> &'static str {
        match self {
            AgentRole::Coordinator => "Coordinator",
            AgentRole::Analyst => "Analyst",
            AgentRole::SpecialistMath => "Math Specialist",
            AgentRole::SpecialistText => "Text Specialist",
            AgentRole::SuperCritic => "Super-Critic",
            AgentRole::Traditional => "Traditional AI",
        }
    }

    /// Accent color (hex) used by the network diagram
    pub fn color(&self) -> &'static str {
        match self {
            AgentRole::Coordinator => "#8b5cf6",
            AgentRole::Analyst => "#3b82f6",
            AgentRole::SpecialistMath => "#10b981",
            AgentRole::SpecialistText => "#f59e0b",
            AgentRole::SuperCritic => "#ef4444",
            AgentRole::Traditional => "#6366f1",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

/// Role identifier outside the declared set
#[derive(Debug, thiserror::Error)]
#[error("unknown agent role: {0}")]
pub struct RoleParseError(pub String);

/// Agent execution status
///
/// Lifecycle: `idle -> thinking -> {done, error}`. Terminal states do not
/// transition further within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Thinking,
    Done,
    Error,
}

impl AgentStatus {
    /// Whether this status is terminal for the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentStatus::Done | AgentStatus::Error)
    }
}

/// Token usage breakdown for one agent
///
/// Invariant: `total == prompt + completion`. Records arriving with an
/// inconsistent total are clamped at ingestion (see the store).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

impl TokenUsage {
    /// Create token usage with a derived total
    pub fn new(prompt: u64, completion: u64) -> Self {
        Self {
            prompt,
            completion,
            total: prompt + completion,
        }
    }

    /// Check the `total == prompt + completion` invariant
    pub fn is_consistent(&self) -> bool {
        self.total == self.prompt + self.completion
    }

    /// Return a copy with the total re-derived from its parts
    pub fn clamped(&self) -> Self {
        Self::new(self.prompt, self.completion)
    }
}

/// Execution statistics for one agent within one session
///
/// At most one record per role is kept in a session rollup; repeated
/// upserts for the same role replace the previous record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub agent_id: AgentRole,
    pub llm_calls: u32,
    pub tokens: TokenUsage,
    /// Estimated cost, currency-agnostic (priced by the producer)
    pub cost: f64,
    pub messages_sent: u32,
    pub processing_time_ms: u64,
    pub status: AgentStatus,
}

/// Builder for agent execution records
pub struct AgentRecordBuilder {
    agent_id: AgentRole,
    llm_calls: u32,
    tokens: TokenUsage,
    cost: f64,
    messages_sent: u32,
    processing_time_ms: u64,
    status: AgentStatus,
}

impl AgentRecordBuilder {
    /// Create a builder for the given role, starting idle with zero usage
    pub fn new(agent_id: AgentRole) -> Self {
        Self {
            agent_id,
            llm_calls: 0,
            tokens: TokenUsage::default(),
            cost: 0.0,
            messages_sent: 0,
            processing_time_ms: 0,
            status: AgentStatus::Idle,
        }
    }

    /// Set token usage from prompt/completion counts
    pub fn tokens(mut self, prompt: u64, completion: u64) -> Self {
        self.tokens = TokenUsage::new(prompt, completion);
        self
    }

    /// Set the LLM call count
    pub fn llm_calls(mut self, calls: u32) -> Self {
        self.llm_calls = calls;
        self
    }

    /// Set the attributed cost
    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Set the count of messages this agent originated
    pub fn messages_sent(mut self, count: u32) -> Self {
        self.messages_sent = count;
        self
    }

    /// Set the attributed wall-clock duration
    pub fn processing_time_ms(mut self, ms: u64) -> Self {
        self.processing_time_ms = ms;
        self
    }

    /// Set the execution status
    pub fn status(mut self, status: AgentStatus) -> Self {
        self.status = status;
        self
    }

    /// Build the record
    pub fn build(self) -> AgentRecord {
        AgentRecord {
            agent_id: self.agent_id,
            llm_calls: self.llm_calls,
            tokens: self.tokens,
            cost: self.cost,
            messages_sent: self.messages_sent,
            processing_time_ms: self.processing_time_ms,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in AgentRole::ALL {
            let parsed = AgentRole::from_str(role.as_str()).unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = AgentRole::from_str("summarizer").unwrap_err();
        assert!(err.to_string().contains("summarizer"));
    }

    #[test]
    fn test_role_serde_uses_snake_case() {
        let json = serde_json::to_string(&AgentRole::SpecialistMath).unwrap();
        assert_eq!(json, "\"specialist_math\"");

        let role: AgentRole = serde_json::from_str("\"super_critic\"").unwrap();
        assert_eq!(role, AgentRole::SuperCritic);
    }

    #[test]
    fn test_role_labels_and_colors() {
        assert_eq!(AgentRole::SpecialistMath.label(), "Math Specialist");
        assert_eq!(AgentRole::Coordinator.color(), "#8b5cf6");
    }

    #[test]
    fn test_token_usage_derives_total() {
        let tokens = TokenUsage::new(250, 179);
        assert_eq!(tokens.total, 429);
        assert!(tokens.is_consistent());
    }

    #[test]
    fn test_token_usage_clamp() {
        let tokens = TokenUsage {
            prompt: 100,
            completion: 50,
            total: 999,
        };
        assert!(!tokens.is_consistent());

        let clamped = tokens.clamped();
        assert_eq!(clamped.total, 150);
        assert!(clamped.is_consistent());
    }

    #[test]
    fn test_agent_status_terminal() {
        assert!(!AgentStatus::Idle.is_terminal());
        assert!(!AgentStatus::Thinking.is_terminal());
        assert!(AgentStatus::Done.is_terminal());
        assert!(AgentStatus::Error.is_terminal());
    }

    #[test]
    fn test_record_builder() {
        let record = AgentRecordBuilder::new(AgentRole::Coordinator)
            .tokens(250, 179)
            .cost(0.000152)
            .llm_calls(1)
            .messages_sent(7)
            .processing_time_ms(1200)
            .status(AgentStatus::Done)
            .build();

        assert_eq!(record.agent_id, AgentRole::Coordinator);
        assert_eq!(record.tokens.total, 429);
        assert_eq!(record.messages_sent, 7);
        assert_eq!(record.status, AgentStatus::Done);
    }
}
