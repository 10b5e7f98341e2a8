//! Inter-agent message types
//!
//! Messages exchanged between agents (or the `user`/`system` sentinels)
//! within a session, plus the parent-reference threading used for
//! timeline rendering.

use serde::{Deserialize, Serialize};

use super::agent::{AgentRole, RoleParseError};

/// Sender or recipient of a message
///
/// Serialized as the flat wire identifier (`"coordinator"`, `"user"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Agent(AgentRole),
    User,
    System,
}

impl Participant {
    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Participant::Agent(role) => role.as_str(),
            Participant::User => "user",
            Participant::System => "system",
        }
    }

    /// Default instance identifier when a producer omits one
    pub fn default_instance_id(&self) -> String {
        format!("{}-1", self.as_str())
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Participant {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Participant::User),
            "system" => Ok(Participant::System),
            other => other.parse::<AgentRole>().map(Participant::Agent),
        }
    }
}

impl Serialize for Participant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Participant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Message classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Request,
    Response,
    Info,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Request => write!(f, "request"),
            MessageType::Response => write!(f, "response"),
            MessageType::Info => write!(f, "info"),
        }
    }
}

/// One inter-agent communication event
///
/// `timestamp` is descriptive only; the stored sequence preserves call
/// order regardless of timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Unique within a session
    pub id: String,
    pub from: Participant,
    pub to: Participant,
    /// Disambiguates multiple instances of the same role, e.g. "analyst-2"
    pub from_instance_id: Option<String>,
    pub to_instance_id: Option<String>,
    pub content: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Back-reference for threading; the parent graph forms a forest
    pub parent_message_id: Option<String>,
}

impl AgentMessage {
    /// Instance identifier of the sender, defaulted when absent
    pub fn from_instance(&self) -> String {
        self.from_instance_id
            .clone()
            .unwrap_or_else(|| self.from.default_instance_id())
    }

    /// Instance identifier of the recipient, defaulted when absent
    pub fn to_instance(&self) -> String {
        self.to_instance_id
            .clone()
            .unwrap_or_else(|| self.to.default_instance_id())
    }
}

/// A message positioned in the rendered thread tree
#[derive(Debug, Clone, Serialize)]
pub struct ThreadedMessage {
    pub message: AgentMessage,
    /// Nesting level; 0 for root messages
    pub depth: u32,
}

/// Arrange messages into display order for threaded rendering.
///
/// Children follow their parent depth-first; siblings keep insertion
/// order. A message whose `parent_message_id` does not resolve within the
/// same set (orphaned reference, or a self-reference) degrades to
/// root-level display instead of erroring.
pub fn thread_order(messages: &[AgentMessage]) -> Vec<ThreadedMessage> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); messages.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (idx, message) in messages.iter().enumerate() {
        let parent_idx = message.parent_message_id.as_ref().and_then(|parent_id| {
            messages
                .iter()
                .position(|m| &m.id == parent_id && m.id != message.id)
        });

        match parent_idx {
            Some(parent) if parent != idx => children[parent].push(idx),
            _ => roots.push(idx),
        }
    }

    let mut ordered = Vec::with_capacity(messages.len());
    // Reverse so the stack pops siblings in insertion order
    let mut stack: Vec<(usize, u32)> = roots.into_iter().rev().map(|i| (i, 0)).collect();
    let mut visited = vec![false; messages.len()];

    while let Some((idx, depth)) = stack.pop() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        ordered.push(ThreadedMessage {
            message: messages[idx].clone(),
            depth,
        });
        for &child in children[idx].iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, parent: Option<&str>) -> AgentMessage {
        AgentMessage {
            id: id.to_string(),
            from: Participant::Agent(AgentRole::Coordinator),
            to: Participant::Agent(AgentRole::Analyst),
            from_instance_id: None,
            to_instance_id: None,
            content: format!("content {}", id),
            timestamp: 0,
            message_type: MessageType::Request,
            parent_message_id: parent.map(String::from),
        }
    }

    #[test]
    fn test_participant_round_trip() {
        assert_eq!("user".parse::<Participant>().unwrap(), Participant::User);
        assert_eq!(
            "specialist_text".parse::<Participant>().unwrap(),
            Participant::Agent(AgentRole::SpecialistText)
        );
        assert!("nobody".parse::<Participant>().is_err());
    }

    #[test]
    fn test_participant_serializes_as_string() {
        let json = serde_json::to_string(&Participant::Agent(AgentRole::SuperCritic)).unwrap();
        assert_eq!(json, "\"super_critic\"");

        let back: Participant = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(back, Participant::System);
    }

    #[test]
    fn test_default_instance_id() {
        let msg = message("m1", None);
        assert_eq!(msg.from_instance(), "coordinator-1");
        assert_eq!(msg.to_instance(), "analyst-1");
    }

    #[test]
    fn test_explicit_instance_id_kept() {
        let mut msg = message("m1", None);
        msg.from_instance_id = Some("coordinator-2".to_string());
        assert_eq!(msg.from_instance(), "coordinator-2");
    }

    #[test]
    fn test_message_type_field_named_type() {
        let msg = message("m1", None);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "request");
    }

    #[test]
    fn test_thread_order_nests_children() {
        let messages = vec![
            message("m1", None),
            message("m2", Some("m1")),
            message("m3", Some("m2")),
            message("m4", None),
        ];

        let ordered = thread_order(&messages);
        let ids: Vec<&str> = ordered.iter().map(|t| t.message.id.as_str()).collect();
        let depths: Vec<u32> = ordered.iter().map(|t| t.depth).collect();

        assert_eq!(ids, vec!["m1", "m2", "m3", "m4"]);
        assert_eq!(depths, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_thread_order_orphan_degrades_to_root() {
        let messages = vec![message("m1", None), message("m2", Some("missing"))];

        let ordered = thread_order(&messages);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[1].message.id, "m2");
        assert_eq!(ordered[1].depth, 0);
    }

    #[test]
    fn test_thread_order_self_reference_degrades_to_root() {
        let messages = vec![message("m1", Some("m1"))];

        let ordered = thread_order(&messages);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].depth, 0);
    }

    #[test]
    fn test_thread_order_siblings_keep_insertion_order() {
        let messages = vec![
            message("root", None),
            message("b", Some("root")),
            message("a", Some("root")),
        ];

        let ordered = thread_order(&messages);
        let ids: Vec<&str> = ordered.iter().map(|t| t.message.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "b", "a"]);
    }
}
