//! Persisted configuration types for the agentdeck TUI.
//!
//! Loading/saving and environment overrides live in the TUI crate; this
//! crate only defines the `agentdeck.toml` shape and its defaults.

use serde::{Deserialize, Serialize};

/// Canonical config file name.
pub const CONFIG_FILE_NAME: &str = "agentdeck.toml";

/// Environment variable overriding `[server].url`.
pub const SERVER_URL_ENV: &str = "AGENTDECK_SERVER_URL";

/// Top-level configuration (persisted as `agentdeck.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub poll: PollSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Full API root, e.g. `http://localhost:8009/api`.
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    /// Base tick period for both pollers.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Consecutive failures before the UI shows the connection as lost and
    /// the poller starts backing off.
    #[serde(default = "default_max_consecutive_failures")]
    pub max_consecutive_failures: u32,
    /// Cap for the doubled backoff interval.
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_consecutive_failures: default_max_consecutive_failures(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

// ── Serde default functions ─────────────────────────────────────────────

fn default_server_url() -> String {
    "http://localhost:8009/api".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_interval_ms() -> u64 {
    1_000
}
fn default_max_consecutive_failures() -> u32 {
    5
}
fn default_max_backoff_secs() -> u64 {
    30
}

/// Apply compatibility fallbacks after loading raw TOML.
/// Returns true when any field was updated.
pub fn apply_compat_fallbacks(config: &mut ConsoleConfig) -> bool {
    let mut changed = false;

    if config.server.url.trim().is_empty() {
        config.server.url = default_server_url();
        changed = true;
    }
    if config.poll.interval_ms == 0 {
        config.poll.interval_ms = default_interval_ms();
        changed = true;
    }

    changed
}
