//! Markdown export functionality
//!
//! Renders a completed session snapshot as a human-readable report:
//! task, message timeline, metrics summary, per-agent table and output.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use super::{ExportError, SessionExport};
use crate::models::session::SessionMode;

/// Render a session export as a Markdown document
pub fn render_session_markdown(export: &SessionExport) -> String {
    let mut doc = String::new();

    let title = match export.mode {
        SessionMode::Fabric => "NeuroFabric Session Report",
        SessionMode::Traditional => "Traditional Session Report",
        SessionMode::Comparison => "Comparison Session Report",
    };

    let _ = writeln!(doc, "# {}", title);
    let _ = writeln!(doc);
    let _ = writeln!(doc, "- **Session:** `{}`", export.session_id);
    let _ = writeln!(doc, "- **Mode:** {}", export.mode);
    let _ = writeln!(doc, "- **Exported:** {}", export.export_date);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Task");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "{}", export.input);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Message Timeline");
    let _ = writeln!(doc);
    if export.messages.is_empty() {
        let _ = writeln!(doc, "_No messages recorded._");
    } else {
        let _ = writeln!(doc, "| # | From | To | Type | Content |");
        let _ = writeln!(doc, "|---|------|----|------|---------|");
        for (i, message) in export.messages.iter().enumerate() {
            let _ = writeln!(
                doc,
                "| {} | {} | {} | {} | {} |",
                i + 1,
                message.from,
                message.to,
                message.message_type,
                preview(&message.content)
            );
        }
    }
    let _ = writeln!(doc);

    let metrics = &export.metrics;
    let _ = writeln!(doc, "## Metrics");
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "- **Processing time:** {:.2}s",
        metrics.total_processing_time_ms as f64 / 1000.0
    );
    if let Some(wall_clock) = metrics.wall_clock_ms {
        let _ = writeln!(doc, "- **Wall clock:** {:.2}s", wall_clock as f64 / 1000.0);
    }
    let _ = writeln!(doc, "- **Total cost:** ${:.4}", metrics.total_cost);
    let _ = writeln!(doc, "- **Total tokens:** {}", metrics.total_tokens);
    let _ = writeln!(
        doc,
        "- **Throughput:** {:.1} tok/s",
        metrics.tokens_per_second()
    );
    let _ = writeln!(doc, "- **Workflow steps:** {}", metrics.workflow_steps);
    let _ = writeln!(doc);

    if !metrics.agents.is_empty() {
        let _ = writeln!(doc, "### Agents");
        let _ = writeln!(doc);
        let _ = writeln!(
            doc,
            "| Agent | LLM Calls | Tokens | Cost | Time | Status |"
        );
        let _ = writeln!(doc, "|-------|-----------|--------|------|------|--------|");
        for record in &metrics.agents {
            let _ = writeln!(
                doc,
                "| {} | {} | {} | ${:.4} | {:.2}s | {:?} |",
                record.agent_id.label(),
                record.llm_calls,
                record.tokens.total,
                record.cost,
                record.processing_time_ms as f64 / 1000.0,
                record.status
            );
        }
        let _ = writeln!(doc);
    }

    let _ = writeln!(doc, "## Output");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "{}", export.output);

    doc
}

/// Write a session export to a Markdown file
pub fn write_session_markdown(export: &SessionExport, path: &Path) -> Result<(), ExportError> {
    let markdown = render_session_markdown(export);

    let mut file = std::fs::File::create(path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Truncate message content for table cells and keep it on one line
fn preview(content: &str) -> String {
    let flat = content.replace(['\n', '|'], " ");
    let trimmed = flat.trim();
    if trimmed.chars().count() > 80 {
        let short: String = trimmed.chars().take(80).collect();
        format!("{}...", short)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::{AgentRecordBuilder, AgentRole, AgentStatus};
    use crate::models::message::{AgentMessage, MessageType, Participant};
    use crate::store::SessionStore;
    use std::fs;

    fn completed_export() -> SessionExport {
        let mut store = SessionStore::new();
        let id = store.create_fabric_session("Summarize the quarterly trend");

        store.append_message(
            &id,
            AgentMessage {
                id: "msg-1".to_string(),
                from: Participant::Agent(AgentRole::Coordinator),
                to: Participant::Agent(AgentRole::Analyst),
                from_instance_id: None,
                to_instance_id: None,
                content: "Break down the revenue figures".to_string(),
                timestamp: 1_700_000_000_000,
                message_type: MessageType::Request,
                parent_message_id: None,
            },
        );
        store.upsert_agent_record(
            &id,
            AgentRecordBuilder::new(AgentRole::Coordinator)
                .tokens(250, 179)
                .cost(0.000152)
                .processing_time_ms(1200)
                .llm_calls(1)
                .messages_sent(1)
                .status(AgentStatus::Done)
                .build(),
        );
        store.finalize(&id, "Revenue ended at $1,288,680.");

        SessionExport::from_session(store.session(&id).unwrap()).unwrap()
    }

    #[test]
    fn test_markdown_sections_present() {
        let export = completed_export();
        let doc = render_session_markdown(&export);

        assert!(doc.starts_with("# NeuroFabric Session Report"));
        assert!(doc.contains("## Task"));
        assert!(doc.contains("Summarize the quarterly trend"));
        assert!(doc.contains("## Message Timeline"));
        assert!(doc.contains("| 1 | coordinator | analyst | request |"));
        assert!(doc.contains("## Metrics"));
        assert!(doc.contains("- **Total tokens:** 429"));
        assert!(doc.contains("### Agents"));
        assert!(doc.contains("| Coordinator |"));
        assert!(doc.contains("## Output"));
        assert!(doc.contains("Revenue ended at $1,288,680."));
    }

    #[test]
    fn test_markdown_empty_timeline_placeholder() {
        let mut store = SessionStore::new();
        let id = store.create_traditional_session("task");
        store.finalize(&id, "answer");

        let export = SessionExport::from_session(store.session(&id).unwrap()).unwrap();
        let doc = render_session_markdown(&export);

        assert!(doc.starts_with("# Traditional Session Report"));
        assert!(doc.contains("_No messages recorded._"));
    }

    #[test]
    fn test_preview_flattens_and_truncates() {
        let long = "line one\nline two | with pipe ".repeat(10);
        let p = preview(&long);

        assert!(!p.contains('\n'));
        assert!(!p.contains('|'));
        assert!(p.ends_with("..."));
        assert!(p.chars().count() <= 83);
    }

    #[test]
    fn test_write_session_markdown() {
        let path = std::env::temp_dir().join("test_neurofabric_session.md");

        let export = completed_export();
        write_session_markdown(&export, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Metrics"));

        fs::remove_file(&path).ok();
    }
}
