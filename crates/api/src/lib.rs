//! Shared wire types for the agentdeck backend API.
//!
//! This crate is the single source of truth for every request/response body
//! the client exchanges with the backend. Field names and aliases follow the
//! backend exactly; compatibility aliases cover older spellings the server
//! still emits (`result` for the final response text, `processing` for the
//! running state).

use serde::{Deserialize, Serialize};

// Re-export the domain types that appear on the wire.
pub use agentdeck_core::{LogEntry, LogLevel, TaskState};

// ─── /send ───────────────────────────────────────────────────────────────────

/// POST `/send` — submit a new chat message, starting a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub task_id: String,
    /// Initial lifecycle state, usually `running`.
    #[serde(default)]
    pub status: Option<TaskState>,
}

// ─── /logs/{task_id} ─────────────────────────────────────────────────────────

/// GET `/logs/{task_id}?last_index=N` — log entries at and after offset N.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    /// Cursor for the next poll: index of the first entry not yet returned.
    pub next_index: usize,
}

// ─── /status/{task_id} ───────────────────────────────────────────────────────

/// GET `/status/{task_id}` — task lifecycle snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: TaskState,
    /// Final response text, present once the task completes.
    #[serde(default, alias = "result")]
    pub response: Option<String>,
    /// Pending question text while `status == awaiting_human`.
    #[serde(default)]
    pub question: Option<String>,
    /// Human-readable note some endpoints attach; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ─── /human_response ─────────────────────────────────────────────────────────

/// POST `/human_response` — answer the pending question of a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanResponseRequest {
    pub task_id: String,
    pub response: String,
}

/// Generic `{"status": "..."}` acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub status: String,
}

// ─── /todo and /files ────────────────────────────────────────────────────────

/// GET `/todo` — the agent's plan/checklist document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_response_decodes_backend_shape() {
        let body = r#"{
            "logs": [
                {"timestamp": 1711370000.25, "level": "INFO", "message": "Executing step 1/20"},
                {"level": "ERROR", "message": "boom"}
            ],
            "next_index": 2
        }"#;

        let resp: LogsResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(resp.logs.len(), 2);
        assert_eq!(resp.next_index, 2);
        assert_eq!(resp.logs[0].level, LogLevel::Info);
        assert_eq!(resp.logs[1].level, LogLevel::Error);
    }

    #[test]
    fn status_response_accepts_result_alias() {
        let resp: StatusResponse =
            serde_json::from_str(r#"{"status":"completed","result":"done"}"#).expect("parse");
        assert_eq!(resp.status, TaskState::Completed);
        assert_eq!(resp.response.as_deref(), Some("done"));
    }

    #[test]
    fn awaiting_status_carries_question() {
        let resp: StatusResponse = serde_json::from_str(
            r#"{"status":"awaiting_human","question":"Which branch?","message":"waiting"}"#,
        )
        .expect("parse");
        assert_eq!(resp.status, TaskState::AwaitingHuman);
        assert_eq!(resp.question.as_deref(), Some("Which branch?"));
    }

    #[test]
    fn empty_logs_response_defaults_to_no_entries() {
        let resp: LogsResponse = serde_json::from_str(r#"{"next_index":0}"#).expect("parse");
        assert!(resp.logs.is_empty());
        assert_eq!(resp.next_index, 0);
    }
}
