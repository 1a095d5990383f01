mod app;
mod async_ops;
mod config;
mod follow;
mod theme;
mod ui;
mod views;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing_subscriber::EnvFilter;

use agentdeck_api_client::ApiClient;
use agentdeck_poller::{LogPoller, PollOptions, PollerEvent, PollerHandle, StatusPoller};

use app::{App, Effect};
use async_ops::CommandResult;

#[derive(Parser)]
#[command(name = "agentdeck", about = "Terminal console for an agentdeck backend")]
struct Cli {
    /// Backend API root, e.g. http://localhost:8009/api
    #[arg(long)]
    server: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let mut conf = config::load_config();
    if let Some(server) = cli.server {
        conf.server.url = server.trim_end_matches('/').to_string();
    }
    if let Some(interval) = cli.interval_ms {
        conf.poll.interval_ms = interval;
    }
    config::apply_compat_fallbacks(&mut conf);

    // First run: write the default config so users have a file to edit.
    if let Ok(dir) = config::config_dir() {
        if !dir.join(config::CONFIG_FILE_NAME).exists() {
            if let Err(e) = config::save_config(&config::ConsoleConfig::default()) {
                tracing::warn!(error = %e, "could not write default config");
            }
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let client = Arc::new(ApiClient::new(
        &conf.server.url,
        Duration::from_secs(conf.server.timeout_secs),
    )?);
    let poll_options = PollOptions {
        interval: Duration::from_millis(conf.poll.interval_ms),
        max_consecutive_failures: conf.poll.max_consecutive_failures,
        max_backoff: Duration::from_secs(conf.poll.max_backoff_secs),
    };

    tracing::info!(server = %conf.server.url, "starting console");

    // Terminal setup
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run(&mut terminal, &mut app, &runtime, client, poll_options);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// The TUI owns the terminal, so tracing output goes to a file. Failure to
/// open the log file silently disables logging rather than breaking the UI.
fn init_tracing() {
    let Ok(path) = config::log_file_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
}

/// Poller pair for the active task; dropped as a unit on task switch.
struct ActivePollers {
    _logs: PollerHandle,
    _status: PollerHandle,
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    runtime: &tokio::runtime::Runtime,
    client: Arc<ApiClient>,
    poll_options: PollOptions,
) -> Result<()> {
    let (poller_tx, mut poller_rx) = unbounded_channel::<PollerEvent>();
    let (result_tx, mut result_rx) = unbounded_channel::<CommandResult>();
    let mut pollers: Option<ActivePollers> = None;

    loop {
        // Apply everything the async side produced since the last frame.
        while let Ok(event) = poller_rx.try_recv() {
            app.apply_poller_event(event);
        }
        while let Ok(result) = result_rx.try_recv() {
            app.apply_command_result(result);
        }

        for effect in app.take_effects() {
            apply_effect(
                effect,
                runtime,
                &client,
                &poll_options,
                &poller_tx,
                &result_tx,
                &mut pollers,
            );
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn apply_effect(
    effect: Effect,
    runtime: &tokio::runtime::Runtime,
    client: &Arc<ApiClient>,
    poll_options: &PollOptions,
    poller_tx: &UnboundedSender<PollerEvent>,
    result_tx: &UnboundedSender<CommandResult>,
    pollers: &mut Option<ActivePollers>,
) {
    match effect {
        Effect::StartPolling(task_id) => {
            let _guard = runtime.enter();
            *pollers = Some(ActivePollers {
                _logs: LogPoller::spawn(
                    client.clone(),
                    task_id.clone(),
                    poll_options.clone(),
                    poller_tx.clone(),
                ),
                _status: StatusPoller::spawn(
                    client.clone(),
                    task_id,
                    poll_options.clone(),
                    poller_tx.clone(),
                ),
            });
        }
        Effect::StopPolling => {
            *pollers = None;
        }
        Effect::Run(cmd) => {
            let client = client.clone();
            let results = result_tx.clone();
            runtime.spawn(async move {
                let _ = results.send(async_ops::execute(cmd, client).await);
            });
        }
    }
}
