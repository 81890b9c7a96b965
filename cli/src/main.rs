//! slurp - Binary entry point and terminal session management.
//!
//! Bridges [`slurp_engine`] (application state) and [`slurp_tui`]
//! (rendering), with RAII-based terminal cleanup.
//!
//! # Event loop
//!
//! A fixed 8ms (~120 FPS) render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking)
//! 3. Advance application state (`app.tick(now)`)
//! 4. Drain completed page operations
//! 5. Render frame

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::{
    env,
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use slurp_engine::{App, SlurpConfig, Vault, config_path};
use slurp_tui::{Theme, draw, handle_events};

const FRAME_DURATION: Duration = Duration::from_millis(8);

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Without a log file, prefer "no logs" over corrupting the TUI by
    // writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!("failed to create log dir {}: {e}", parent.display()));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.slurp/logs/slurp.log
    if let Some(path) = config_path()
        && let Some(config_dir) = path.parent()
    {
        candidates.push(config_dir.join("logs").join("slurp.log"));
    }

    // Fallback: ./.slurp/logs/slurp.log (useful in constrained environments)
    candidates.push(PathBuf::from(".slurp").join("logs").join("slurp.log"));

    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode plus the alternate screen, and alternate scroll mode (1007)
/// so the wheel maps to arrow keys without capturing mouse clicks. All of
/// it is unwound on drop, panics included.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        // Alternate scroll mode: CSI ? 1007 h
        let _ = out.write_all(b"\x1b[?1007h");
        let _ = out.flush();

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let mut out = stdout();
                let _ = out.write_all(b"\x1b[?1007l");
                let _ = out.flush();
                let _ = execute!(out, LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self.terminal.backend_mut().write_all(b"\x1b[?1007l");
        let _ = Write::flush(&mut *self.terminal.backend_mut());
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn usage() -> &'static str {
    "slurp - terminal browser for a drop folder\n\n\
     Usage: slurp [ROOT]\n\n\
     ROOT overrides the drop folder from SLURP_ROOT or\n\
     ~/.slurp/config.toml (default: ~/drops)."
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let mut root_arg = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage());
                return ExitCode::SUCCESS;
            }
            other if root_arg.is_none() => root_arg = Some(other.to_string()),
            other => {
                eprintln!("unexpected argument: {other}\n\n{}", usage());
                return ExitCode::FAILURE;
            }
        }
    }

    match run(root_arg.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(root_arg: Option<&str>) -> Result<()> {
    let config = SlurpConfig::load().context("broken config file")?;
    let root = config.resolve_root(root_arg);
    let vault =
        Vault::open(&root).with_context(|| format!("cannot open vault at {}", root.display()))?;
    tracing::info!(root = %vault.root().display(), "vault opened");

    let theme = Theme::new(config.ascii_only());
    let mut app = App::new(vault, &config);
    app.refresh();

    let mut session = TerminalSession::new()?;
    let result = run_app(&mut session.terminal, &mut app, &theme).await;
    drop(session);
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    theme: &Theme,
) -> Result<()> {
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        handle_events(app)?;
        if app.should_quit() {
            return Ok(());
        }

        app.tick(Instant::now());
        app.process_op_events();

        terminal.draw(|frame| draw(frame, app, theme))?;
    }
}
