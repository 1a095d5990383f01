use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

// Re-export shared config types.
pub use agentdeck_runtime_config::{
    CONFIG_FILE_NAME, ConsoleConfig, SERVER_URL_ENV, apply_compat_fallbacks,
};

// ── File I/O ────────────────────────────────────────────────────────────

pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("agentdeck"))
}

/// Load config from `~/.config/agentdeck/agentdeck.toml`, then apply the
/// `AGENTDECK_SERVER_URL` environment override. Missing or unparsable files
/// fall back to defaults.
pub fn load_config() -> ConsoleConfig {
    let mut config = config_dir()
        .ok()
        .map(|dir| load_config_from(&dir))
        .unwrap_or_default();

    apply_compat_fallbacks(&mut config);

    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        if !url.trim().is_empty() {
            config.server.url = url.trim().trim_end_matches('/').to_string();
        }
    }

    config
}

fn load_config_from(dir: &Path) -> ConsoleConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

/// Save config to `~/.config/agentdeck/agentdeck.toml`.
pub fn save_config(config: &ConsoleConfig) -> Result<()> {
    save_config_to(&config_dir()?, config)
}

fn save_config_to(dir: &Path, config: &ConsoleConfig) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Default log file path; the TUI owns the terminal, so tracing output goes
/// to a file instead of stderr.
pub fn log_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("agentdeck.log"))
}
