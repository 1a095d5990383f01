use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity attached to a backend log entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "WARNING")]
    Warning,
    #[serde(alias = "ERROR", alias = "CRITICAL")]
    Error,
    /// The backend occasionally emits captured stdout without a level.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a task's log stream.
///
/// Entries are append-only and arrive in execution order; that order is the
/// chronological narrative of the agent run and must never be shuffled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    /// Unix timestamp (seconds, fractional) assigned by the backend.
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: 0.0,
            level,
            message: message.into(),
        }
    }
}

/// Lifecycle state of one backend task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// The agent is executing. The backend historically reported this as
    /// `processing`; both spellings decode to the same state.
    #[serde(alias = "processing")]
    Running,
    /// The agent asked a question and is blocked on the user.
    AwaitingHuman,
    Completed,
    Error,
    /// Forward-compatible catch-all; treated the same as `Running`.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Terminal states end polling for the task.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::AwaitingHuman => "awaiting_human",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a display message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Bot,
    User,
}

/// One rendered row of the chat transcript.
///
/// Derived from the log stream, never persisted. The transcript grows
/// append-only in step with the log sequence; the only reset is an explicit
/// new task.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMessage {
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Opens a new step group in the chat view.
    pub is_step_header: bool,
    /// A question the agent is blocked on.
    pub is_question: bool,
    /// The user's answer to a question, echoed back through the log stream.
    pub is_response: bool,
}

impl DisplayMessage {
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            is_step_header: false,
            is_question: false,
            is_response: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            ..Self::bot(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_accepts_backend_spellings() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"level":"WARNING","message":"careful"}"#).expect("parse");
        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.timestamp, 0.0);
    }

    #[test]
    fn unknown_log_level_maps_to_unspecified() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"level":"TRACE","message":"m"}"#).expect("parse");
        assert_eq!(entry.level, LogLevel::Unspecified);
    }

    #[test]
    fn task_state_processing_alias_decodes_as_running() {
        let state: TaskState = serde_json::from_str(r#""processing""#).expect("parse");
        assert_eq!(state, TaskState::Running);
        assert!(!state.is_terminal());
    }

    #[test]
    fn task_state_terminal_covers_completed_and_error() {
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Error.is_terminal());
        assert!(!TaskState::AwaitingHuman.is_terminal());
        assert!(!TaskState::Unknown.is_terminal());
    }

    #[test]
    fn unknown_status_string_decodes_as_unknown() {
        let state: TaskState = serde_json::from_str(r#""paused""#).expect("parse");
        assert_eq!(state, TaskState::Unknown);
    }
}
