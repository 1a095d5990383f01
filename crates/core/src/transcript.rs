//! Reconstruction of the chat transcript from a task's raw log stream.
//!
//! The backend does not send chat messages; it sends log lines. A handful of
//! marker prefixes embedded in those lines carry the chat structure: step
//! boundaries, questions the agent asks the user, and the user's answers
//! (which the backend echoes back into the log). Everything else is plain
//! narration attributed to the agent.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::task::{DisplayMessage, LogEntry, Sender};

/// Marks a question the agent is blocked on.
pub const QUESTION_MARKER: &str = "[HUMAN_QUESTION]";

/// Marks the user's answer, injected into the log by the backend when a
/// `/human_response` is accepted.
pub const RESPONSE_MARKER: &str = "[USER_RESPONSE]";

/// Telemetry lines dropped from the transcript entirely. They still show in
/// the raw log view.
pub const DROP_PREFIXES: &[&str] = &["Token usage:", "[HEARTBEAT]"];

/// `Executing step 3/20` and `Executing continuation step 4/30`.
static STEP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Executing (?:continuation )?step \d+").expect("step marker regex")
});

fn is_step_header(message: &str) -> bool {
    STEP_RE.is_match(message)
}

fn entry_time(entry: &LogEntry) -> DateTime<Utc> {
    let secs = entry.timestamp.trunc() as i64;
    let nanos = (entry.timestamp.fract() * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos).unwrap_or_default()
}

fn message(entry: &LogEntry, sender: Sender, content: &str) -> DisplayMessage {
    DisplayMessage {
        content: content.to_string(),
        sender,
        timestamp: entry_time(entry),
        is_step_header: false,
        is_question: false,
        is_response: false,
    }
}

/// Fold the full log sequence into the ordered transcript.
///
/// Pure and deterministic: no clocks, no shared state. It is re-run from the
/// start each time new entries arrive, so identical input must always yield
/// identical output.
pub fn reconstruct(entries: &[LogEntry]) -> Vec<DisplayMessage> {
    let mut messages = Vec::new();

    for entry in entries {
        let text = entry.message.trim();
        if text.is_empty() || DROP_PREFIXES.iter().any(|p| text.starts_with(p)) {
            continue;
        }

        if is_step_header(text) {
            let mut msg = message(entry, Sender::Bot, text);
            msg.is_step_header = true;
            messages.push(msg);
        } else if let Some(question) = text.strip_prefix(QUESTION_MARKER) {
            let mut msg = message(entry, Sender::Bot, question.trim());
            msg.is_question = true;
            messages.push(msg);
        } else if let Some(answer) = text.strip_prefix(RESPONSE_MARKER) {
            let mut msg = message(entry, Sender::User, answer.trim());
            msg.is_response = true;
            messages.push(msg);
        } else {
            messages.push(message(entry, Sender::Bot, text));
        }
    }

    messages
}

/// The question currently awaiting an answer: the last question with no
/// user response after it.
pub fn pending_question(messages: &[DisplayMessage]) -> Option<&str> {
    for msg in messages.iter().rev() {
        if msg.is_response {
            return None;
        }
        if msg.is_question {
            return Some(&msg.content);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::LogLevel;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(LogLevel::Info, message)
    }

    #[test]
    fn reconstruct_is_deterministic() {
        let entries = vec![
            entry("Executing step 1/20"),
            entry("Reading the repository layout"),
            entry("[HUMAN_QUESTION] Which branch should I use?"),
            entry("[USER_RESPONSE] main"),
            entry("Token usage: Input=120, Completion=40"),
            entry("Executing step 2/20"),
        ];

        let first = reconstruct(&entries);
        let second = reconstruct(&entries);
        assert_eq!(first, second);
    }

    #[test]
    fn step_marker_yields_exactly_one_header() {
        let entries = vec![
            entry("Executing step 1/20"),
            entry("thinking about the plan"),
            entry("Executing step 2/20"),
        ];

        let messages = reconstruct(&entries);
        assert_eq!(messages.len(), 3);
        let headers: Vec<_> = messages.iter().filter(|m| m.is_step_header).collect();
        assert_eq!(headers.len(), 2);
        // The plain entry sits between the two headers, not inside either one.
        assert!(!messages[1].is_step_header);
        assert_eq!(messages[1].content, "thinking about the plan");
    }

    #[test]
    fn continuation_step_counts_as_header() {
        let messages = reconstruct(&[entry("Executing continuation step 5/30")]);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_step_header);
    }

    #[test]
    fn telemetry_prefixes_are_dropped() {
        let entries = vec![
            entry("Token usage: Input=9, Completion=3"),
            entry("[HEARTBEAT]"),
            entry("real output"),
        ];

        let messages = reconstruct(&entries);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "real output");
    }

    #[test]
    fn question_and_response_markers_are_stripped_and_tagged() {
        let entries = vec![
            entry("[HUMAN_QUESTION] Deploy to production?"),
            entry("[USER_RESPONSE] yes, go ahead"),
        ];

        let messages = reconstruct(&entries);
        assert_eq!(messages.len(), 2);

        assert!(messages[0].is_question);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[0].content, "Deploy to production?");

        assert!(messages[1].is_response);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].content, "yes, go ahead");
    }

    #[test]
    fn entries_before_first_step_are_standalone_bot_messages() {
        let entries = vec![entry("warming up"), entry("Executing step 1/5")];
        let messages = reconstruct(&entries);
        assert!(!messages[0].is_step_header);
        assert!(messages[1].is_step_header);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let messages = reconstruct(&[entry("   "), entry("")]);
        assert!(messages.is_empty());
    }

    #[test]
    fn pending_question_tracks_latest_unanswered() {
        let answered = reconstruct(&[
            entry("[HUMAN_QUESTION] first?"),
            entry("[USER_RESPONSE] done"),
        ]);
        assert_eq!(pending_question(&answered), None);

        let open = reconstruct(&[
            entry("[HUMAN_QUESTION] first?"),
            entry("[USER_RESPONSE] done"),
            entry("[HUMAN_QUESTION] second?"),
        ]);
        assert_eq!(pending_question(&open), Some("second?"));
    }
}
