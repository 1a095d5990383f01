use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::backoff::BackoffState;
use crate::source::TaskSource;
use crate::{PollerEvent, PollerEventKind};

/// Timing policy shared by both pollers.
#[derive(Debug, Clone)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_consecutive_failures: u32,
    pub max_backoff: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1_000),
            max_consecutive_failures: 5,
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl PollOptions {
    fn backoff(&self) -> BackoffState {
        BackoffState::new(self.interval, self.max_backoff, self.max_consecutive_failures)
    }
}

/// Owner of one running poller task.
///
/// `stop()` (or dropping the handle) aborts the task. An in-flight fetch is
/// not interrupted mid-request by the backend, but its result is dropped
/// with the task, so no stale side effect can land after a stop.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Polls `/logs` with a monotonically advancing cursor.
///
/// The poller owns the cursor; it starts at 0 for a fresh task and is set to
/// the server-supplied `next_index` after every successful fetch. Failures
/// leave it untouched, so the next tick retries the same offset.
pub struct LogPoller;

impl LogPoller {
    pub fn spawn<S: TaskSource>(
        source: Arc<S>,
        task_id: String,
        options: PollOptions,
        events: UnboundedSender<PollerEvent>,
    ) -> PollerHandle {
        let task = tokio::spawn(run_log_loop(source, task_id, options, events));
        PollerHandle { task }
    }
}

async fn run_log_loop<S: TaskSource>(
    source: Arc<S>,
    task_id: String,
    options: PollOptions,
    events: UnboundedSender<PollerEvent>,
) {
    let mut cursor = 0usize;
    let mut backoff = options.backoff();

    loop {
        tokio::time::sleep(backoff.current_delay()).await;
        if events.is_closed() {
            break;
        }

        match source.fetch_logs(&task_id, cursor).await {
            Ok(resp) => {
                if backoff.on_success()
                    && send(&events, &task_id, PollerEventKind::ConnectionRestored).is_err()
                {
                    break;
                }
                cursor = resp.next_index;
                if !resp.logs.is_empty() {
                    debug!(task_id = %task_id, count = resp.logs.len(), cursor, "new log entries");
                    if send(&events, &task_id, PollerEventKind::Logs(resp.logs)).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                warn!(task_id = %task_id, cursor, error = %e, "log poll failed");
                if backoff.on_failure()
                    && send(&events, &task_id, PollerEventKind::ConnectionLost).is_err()
                {
                    break;
                }
            }
        }
    }
}

/// Polls `/status` until a terminal state is observed.
///
/// Every snapshot is forwarded; a `completed`/`error` snapshot is the last
/// event, after which the task exits on its own. `awaiting_human` keeps the
/// poll running — the task is suspended, not finished.
pub struct StatusPoller;

impl StatusPoller {
    pub fn spawn<S: TaskSource>(
        source: Arc<S>,
        task_id: String,
        options: PollOptions,
        events: UnboundedSender<PollerEvent>,
    ) -> PollerHandle {
        let task = tokio::spawn(run_status_loop(source, task_id, options, events));
        PollerHandle { task }
    }
}

async fn run_status_loop<S: TaskSource>(
    source: Arc<S>,
    task_id: String,
    options: PollOptions,
    events: UnboundedSender<PollerEvent>,
) {
    let mut backoff = options.backoff();

    loop {
        tokio::time::sleep(backoff.current_delay()).await;
        if events.is_closed() {
            break;
        }

        match source.fetch_status(&task_id).await {
            Ok(resp) => {
                if backoff.on_success()
                    && send(&events, &task_id, PollerEventKind::ConnectionRestored).is_err()
                {
                    break;
                }
                let terminal = resp.status.is_terminal();
                if send(&events, &task_id, PollerEventKind::Status(resp)).is_err() {
                    break;
                }
                if terminal {
                    debug!(task_id = %task_id, "task reached terminal state, status poll done");
                    break;
                }
            }
            Err(e) => {
                warn!(task_id = %task_id, error = %e, "status poll failed");
                if backoff.on_failure()
                    && send(&events, &task_id, PollerEventKind::ConnectionLost).is_err()
                {
                    break;
                }
            }
        }
    }
}

fn send(
    events: &UnboundedSender<PollerEvent>,
    task_id: &str,
    kind: PollerEventKind,
) -> Result<(), ()> {
    events
        .send(PollerEvent {
            task_id: task_id.to_string(),
            kind,
        })
        .map_err(|_| ())
}
