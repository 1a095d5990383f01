use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use agentdeck_core::transcript::{self, reconstruct};
use agentdeck_core::{DisplayMessage, LogEntry, TaskState};
use agentdeck_poller::{PollerEvent, PollerEventKind};

use crate::async_ops::{AsyncCommand, CommandResult};
use crate::follow::TailScroll;

/// Shown for the only polling-independent failure the user ever sees: a
/// failed `/send` or `/human_response` POST.
pub const REQUEST_FAILED_NOTICE: &str = "Request failed, please try again.";

/// Optimistic placeholder shown between submitting a message and the first
/// reconstructed transcript entry.
pub const THINKING_PLACEHOLDER: &str = "Thinking…";

/// Top-level tab navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    Logs,
    Files,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Self::Chat => Self::Logs,
            Self::Logs => Self::Files,
            Self::Files => Self::Chat,
        }
    }
}

/// Focus within the Files tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesFocus {
    Todo,
    PathEntry,
}

/// Side effects the render loop must carry out for the app. The app itself
/// never touches the network or the runtime, which keeps it testable.
pub enum Effect {
    /// Spawn log+status pollers for this task with a fresh cursor.
    StartPolling(String),
    /// Drop the current poller handles.
    StopPolling,
    /// Run an async command and feed the result back in.
    Run(AsyncCommand),
}

pub struct App {
    pub tab: Tab,
    pub input: String,

    // ── Chat state ────────────────────────────────────────────────────
    /// Locally echoed user messages (optimistic, `/send` only).
    echoes: Vec<DisplayMessage>,
    /// Transcript reconstructed from the accumulated log stream.
    transcript: Vec<DisplayMessage>,
    /// Final response messages appended on task completion.
    finals: Vec<DisplayMessage>,
    /// Raw accumulated log stream for the active task.
    pub log_entries: Vec<LogEntry>,

    pub task_id: Option<String>,
    pub busy: bool,
    pub awaiting_human: bool,
    pub pending_question: Option<String>,
    pub connection_lost: bool,
    pub notice: Option<String>,
    thinking: bool,

    // ── Files state ───────────────────────────────────────────────────
    pub todo: Option<String>,
    pub files_focus: FilesFocus,
    pub file_path_input: String,
    pub file_view: Option<(String, String)>,

    // ── Scrolling ─────────────────────────────────────────────────────
    pub chat_scroll: TailScroll,
    pub log_scroll: TailScroll,

    effects: Vec<Effect>,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            tab: Tab::Chat,
            input: String::new(),
            echoes: Vec::new(),
            transcript: Vec::new(),
            finals: Vec::new(),
            log_entries: Vec::new(),
            task_id: None,
            busy: false,
            awaiting_human: false,
            pending_question: None,
            connection_lost: false,
            notice: None,
            thinking: false,
            todo: None,
            files_focus: FilesFocus::Todo,
            file_path_input: String::new(),
            file_view: None,
            chat_scroll: TailScroll::default(),
            log_scroll: TailScroll::default(),
            effects: Vec::new(),
        };
        app.effects.push(Effect::Run(AsyncCommand::FetchTodo));
        app
    }

    /// Drain the side effects queued since the last frame.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// The input line accepts text unless a task is running without a
    /// pending question.
    pub fn input_enabled(&self) -> bool {
        !self.busy || self.awaiting_human
    }

    /// The full chat view, composed in order: optimistic echoes, the
    /// thinking placeholder, the reconstructed transcript, then any final
    /// response. The placeholder stays up for the whole running phase, next
    /// to whatever transcript has streamed in so far.
    pub fn visible_messages(&self) -> Vec<DisplayMessage> {
        let mut messages = self.echoes.clone();
        if self.thinking {
            messages.push(DisplayMessage::bot(THINKING_PLACEHOLDER));
        }
        messages.extend(self.transcript.iter().cloned());
        messages.extend(self.finals.iter().cloned());
        messages
    }

    // ── Key handling ──────────────────────────────────────────────────

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if key.code == KeyCode::Tab {
            self.tab = self.tab.next();
            return false;
        }

        match self.tab {
            Tab::Chat => self.handle_chat_key(key.code),
            Tab::Logs => return self.handle_logs_key(key.code),
            Tab::Files => return self.handle_files_key(key.code),
        }
        false
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Up => self.chat_scroll.scroll_up(),
            KeyCode::Down => self.chat_scroll.to_end(),
            KeyCode::Char(c) => {
                if self.input_enabled() {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_logs_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => self.log_scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => {
                // Viewport geometry is applied at render time; a plain step
                // down is enough here.
                self.log_scroll.scroll_down(usize::MAX, 0);
            }
            KeyCode::End | KeyCode::Char('f') => self.log_scroll.to_end(),
            _ => {}
        }
        false
    }

    fn handle_files_key(&mut self, code: KeyCode) -> bool {
        match self.files_focus {
            FilesFocus::Todo => match code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('r') => self.effects.push(Effect::Run(AsyncCommand::FetchTodo)),
                KeyCode::Char('/') => {
                    self.files_focus = FilesFocus::PathEntry;
                    self.file_path_input.clear();
                }
                _ => {}
            },
            FilesFocus::PathEntry => match code {
                KeyCode::Esc => self.files_focus = FilesFocus::Todo,
                KeyCode::Enter => {
                    let path = self.file_path_input.trim().to_string();
                    if !path.is_empty() {
                        self.effects
                            .push(Effect::Run(AsyncCommand::FetchFile { path }));
                    }
                    self.files_focus = FilesFocus::Todo;
                }
                KeyCode::Backspace => {
                    self.file_path_input.pop();
                }
                KeyCode::Char(c) => self.file_path_input.push(c),
                _ => {}
            },
        }
        false
    }

    // ── Actions ───────────────────────────────────────────────────────

    /// Enter on the chat input: either answer the pending question or start
    /// a new task.
    pub fn submit_input(&mut self) {
        let text = self.input.trim().to_string();
        if text.is_empty() || !self.input_enabled() {
            return;
        }
        self.input.clear();
        self.notice = None;

        if self.awaiting_human {
            if let Some(task_id) = self.task_id.clone() {
                // Deliberately not echoed locally: the answer comes back
                // through the log stream as a [USER_RESPONSE] entry.
                self.awaiting_human = false;
                self.busy = true;
                self.pending_question = None;
                self.effects.push(Effect::Run(AsyncCommand::SubmitResponse {
                    task_id,
                    response: text,
                }));
            }
            return;
        }

        self.start_task(text);
    }

    /// New task reset: clear everything derived from the previous task,
    /// echo the user message plus a thinking placeholder, and post `/send`.
    fn start_task(&mut self, message: String) {
        self.effects.push(Effect::StopPolling);
        self.task_id = None;
        self.log_entries.clear();
        self.transcript.clear();
        self.finals.clear();
        self.echoes = vec![DisplayMessage::user(&message)];
        self.thinking = true;
        self.busy = true;
        self.awaiting_human = false;
        self.pending_question = None;
        self.chat_scroll.reset();
        self.log_scroll.reset();
        self.effects
            .push(Effect::Run(AsyncCommand::SendMessage { message }));
    }

    // ── Event application ─────────────────────────────────────────────

    pub fn apply_command_result(&mut self, result: CommandResult) {
        match result {
            CommandResult::Send(Ok(resp)) => {
                self.task_id = Some(resp.task_id.clone());
                self.busy = true;
                self.effects.push(Effect::StartPolling(resp.task_id));
            }
            CommandResult::Send(Err(e)) => {
                tracing::warn!(error = %e, "send failed");
                // The placeholder becomes the failure message.
                self.thinking = false;
                self.busy = false;
                self.echoes.push(DisplayMessage::bot(REQUEST_FAILED_NOTICE));
            }
            CommandResult::Respond(Ok(())) => {}
            CommandResult::Respond(Err(e)) => {
                tracing::warn!(error = %e, "human response failed");
                // Re-open the question so the user can retry.
                self.awaiting_human = true;
                self.busy = false;
                self.notice = Some(REQUEST_FAILED_NOTICE.to_string());
            }
            CommandResult::Todo(Ok(content)) => self.todo = Some(content),
            CommandResult::Todo(Err(e)) => {
                tracing::debug!(error = %e, "todo fetch failed");
            }
            CommandResult::File { path, result } => match result {
                Ok(content) => self.file_view = Some((path, content)),
                Err(e) => {
                    tracing::debug!(path = %path, error = %e, "file fetch failed");
                    self.notice = Some(format!("Could not fetch {path}"));
                }
            },
        }
    }

    pub fn apply_poller_event(&mut self, event: PollerEvent) {
        // Stale guard: events from a superseded task are dropped, which is
        // how an already-issued fetch loses its side effects after a stop.
        if self.task_id.as_deref() != Some(event.task_id.as_str()) {
            return;
        }

        match event.kind {
            PollerEventKind::Logs(batch) => {
                self.log_entries.extend(batch);
                self.transcript = reconstruct(&self.log_entries);
                if self.awaiting_human && self.pending_question.is_none() {
                    self.pending_question =
                        transcript::pending_question(&self.transcript).map(String::from);
                }
            }
            PollerEventKind::Status(resp) => self.apply_status(resp),
            PollerEventKind::ConnectionLost => self.connection_lost = true,
            PollerEventKind::ConnectionRestored => self.connection_lost = false,
        }
    }

    /// The status transition table.
    fn apply_status(&mut self, resp: agentdeck_api::StatusResponse) {
        match resp.status {
            TaskState::AwaitingHuman => {
                self.thinking = false;
                self.busy = false;
                self.awaiting_human = true;
                if resp.question.is_some() {
                    self.pending_question = resp.question;
                }
            }
            TaskState::Completed => {
                self.thinking = false;
                self.busy = false;
                self.awaiting_human = false;
                self.pending_question = None;
                if let Some(text) = resp.response {
                    self.finals.push(DisplayMessage::bot(text));
                }
                self.task_id = None;
                self.effects.push(Effect::StopPolling);
            }
            TaskState::Error => {
                tracing::warn!("task ended with error status");
                self.thinking = false;
                self.busy = false;
                self.awaiting_human = false;
                self.pending_question = None;
                self.task_id = None;
                self.effects.push(Effect::StopPolling);
            }
            TaskState::Running | TaskState::Unknown => {
                // Keep polling; nothing to update.
            }
        }
    }
}
