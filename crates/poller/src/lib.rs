//! Timer-driven pollers for the agentdeck backend.
//!
//! The backend exposes no push channel; the client learns everything by
//! polling `/logs` and `/status` on a fixed cadence. Each poller here is an
//! explicit object owning its own cursor and failure state, spawned onto the
//! tokio runtime and reporting through an event channel. The render loop
//! never does network I/O.
//!
//! Overlap guard: a poller is a single task that awaits its own fetch before
//! sleeping again, so at most one request per poller is ever in flight.

pub mod backoff;
pub mod pollers;
pub mod source;

pub use backoff::BackoffState;
pub use pollers::{LogPoller, PollOptions, PollerHandle, StatusPoller};
pub use source::TaskSource;

use agentdeck_api::{LogEntry, StatusResponse};

/// One notification from a poller to its consumer.
#[derive(Debug, Clone)]
pub struct PollerEvent {
    /// The task this event belongs to. Consumers discard events from a
    /// superseded task instead of aborting in-flight requests.
    pub task_id: String,
    pub kind: PollerEventKind,
}

#[derive(Debug, Clone)]
pub enum PollerEventKind {
    /// New log entries, in arrival order.
    Logs(Vec<LogEntry>),
    /// A status snapshot. Terminal states are the poller's last event.
    Status(StatusResponse),
    /// Too many consecutive poll failures; the poller keeps retrying with
    /// backoff but the UI should show the connection as lost.
    ConnectionLost,
    /// A poll succeeded again after `ConnectionLost`.
    ConnectionRestored,
}
