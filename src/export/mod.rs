//! Export module for JSON and Markdown export functionality
//!
//! Field-for-field serialization of a completed session's
//! `{input, messages, metrics, output}`; no additional computation.

pub mod json_export;
pub mod markdown_export;

use std::path::PathBuf;

use serde::Serialize;

use crate::models::message::AgentMessage;
use crate::models::session::{SessionMetrics, SessionMode, SessionState, SessionStatus};

const EXPORT_VERSION: &str = "1.0.0";

/// Export failure
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid export format: {0}. Use 'json' or 'markdown'")]
    InvalidFormat(String),
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(ExportError::InvalidFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Snapshot of a completed session ready for export
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport {
    pub export_date: String,
    pub export_version: &'static str,
    pub session_id: String,
    pub mode: SessionMode,
    pub input: String,
    pub output: String,
    pub messages: Vec<AgentMessage>,
    pub metrics: SessionMetrics,
}

impl SessionExport {
    /// Snapshot a session for export; `None` unless completed
    pub fn from_session(session: &SessionState) -> Option<Self> {
        if session.status != SessionStatus::Completed {
            return None;
        }

        Some(Self {
            export_date: chrono::Utc::now().to_rfc3339(),
            export_version: EXPORT_VERSION,
            session_id: session.session_id.clone(),
            mode: session.mode,
            input: session.input.clone(),
            output: session.output.clone(),
            messages: session.messages.clone(),
            metrics: session.metrics.clone(),
        })
    }
}

/// Get the default export directory (Downloads folder or temp dir)
pub fn get_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Generate a timestamped filename for exports
pub fn generate_export_filename(prefix: &str, extension: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", prefix, timestamp, extension)
}

pub use json_export::*;
pub use markdown_export::*;
