//! DeskView headless viewer entry point.
//!
//! Replays a JSON-lines trace of host messages through one session view and
//! prints every forwarded input event as a JSON line on stdout.  Logs go to
//! stderr so the output stays machine-readable.
//!
//! # Usage
//!
//! ```text
//! deskview [OPTIONS]
//!
//! Options:
//!   --config <PATH>         Config file [default: platform config dir]
//!   --trace <PATH>          Trace to replay; `-` or absent reads stdin
//!   --session-id <ID>       Session identifier [default: config, then random]
//!   --display-mode <MODE>   native | fit [default: config]
//!   --passthrough           Forward box-local coordinates without scaling
//! ```
//!
//! # Architecture overview
//!
//! ```text
//! TraceInputSource (reader thread)
//!       │ ViewMessage
//!       ▼
//! InputPump ── SessionView::update ──► ViewEffect
//!       │ forward()
//!       ▼
//! ChannelForwarder ──► writer task ──► stdout (JSON lines)
//! ```
//!
//! Ctrl+C stops the replay: the pump disposes the view and drops every message
//! still queued, then the process exits without waiting for the reader.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use deskview_client::application::input_pump::{InputForwarder, InputPump};
use deskview_client::application::session_view::{SessionId, SessionView, ViewSettings};
use deskview_client::infrastructure::input_source::trace::{TraceInputSource, TraceOrigin};
use deskview_client::infrastructure::input_source::InputSource;
use deskview_client::infrastructure::storage::config::{self, AppConfig, ConfigError};
use deskview_client::infrastructure::transport::ChannelForwarder;
use deskview_core::{DisplayMode, MappingMode};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Presentation mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisplayModeArg {
    Native,
    Fit,
}

impl From<DisplayModeArg> for DisplayMode {
    fn from(arg: DisplayModeArg) -> Self {
        match arg {
            DisplayModeArg::Native => DisplayMode::Native,
            DisplayModeArg::Fit => DisplayMode::Fit,
        }
    }
}

/// DeskView headless session viewer.
#[derive(Debug, Parser)]
#[command(
    name = "deskview",
    about = "Replays host input through a remote session view and prints forwarded events",
    version
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, env = "DESKVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-lines trace of view messages.  `-` or absent reads stdin.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Identifier of the remote session the events address.
    #[arg(long, env = "DESKVIEW_SESSION_ID")]
    session_id: Option<String>,

    /// Presentation mode; overrides `[viewer] display_mode`.
    #[arg(long, value_enum)]
    display_mode: Option<DisplayModeArg>,

    /// Forward box-local coordinates without letterbox correction.
    #[arg(long)]
    passthrough: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(id) = &self.session_id {
            config.session.session_id = Some(id.clone());
        }
        if let Some(mode) = self.display_mode {
            config.viewer.display_mode = mode.into();
        }
        if self.passthrough {
            config.pointer.mapping = MappingMode::Passthrough;
        }
    }

    fn trace_origin(&self) -> TraceOrigin {
        match &self.trace {
            Some(path) if path.as_os_str() != "-" => TraceOrigin::File(path.clone()),
            _ => TraceOrigin::Stdin,
        }
    }
}

/// Loads the explicit config file, or the platform one when none is given.
///
/// A missing platform directory is not fatal: defaults apply.
fn load_app_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => match config::load_config() {
            Err(ConfigError::NoPlatformConfigDir) => Ok(AppConfig::default()),
            other => other.context("failed to load platform config"),
        },
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut app_config = load_app_config(cli.config.as_ref())?;
    cli.apply_to(&mut app_config);

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.viewer.log_level)),
        )
        .init();

    let session = &app_config.session;
    let session_id = session
        .session_id
        .clone()
        .map(SessionId::new)
        .unwrap_or_else(SessionId::generate);
    let settings = ViewSettings {
        display_mode: app_config.viewer.display_mode,
        mapping: app_config.pointer.mapping,
    };

    info!(
        session_id = %session_id,
        remote_width = session.remote_width,
        remote_height = session.remote_height,
        mode = ?settings.display_mode,
        mapping = ?settings.mapping,
        "DeskView viewer starting"
    );

    // ── Session view ──────────────────────────────────────────────────────────
    let mut view = SessionView::create(session_id, &session.display_info(), settings)
        .context("failed to create session view")?;
    view.mount(session.visible_width, session.visible_height)
        .context("failed to mount session view")?;

    // ── Transport: forwarded events → stdout ──────────────────────────────────
    let (forwarder, mut forwarded_rx) = ChannelForwarder::new();
    let forwarder = Arc::new(forwarder);

    let writer = tokio::spawn(async move {
        let stdout = std::io::stdout();
        while let Some(item) = forwarded_rx.recv().await {
            let line = match serde_json::to_string(&item) {
                Ok(line) => line,
                Err(e) => {
                    error!("failed to serialize forwarded event: {e}");
                    continue;
                }
            };
            let mut out = stdout.lock();
            if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
                warn!("stdout closed: {e}");
                break;
            }
        }
    });

    // ── Input source ──────────────────────────────────────────────────────────
    let source = TraceInputSource::new(cli.trace_origin());
    let messages = source.start().context("failed to start trace replay")?;
    let stop = source.stop_flag();

    // ── Input pump ────────────────────────────────────────────────────────────
    //
    // The pump is synchronous, so it runs on the blocking pool and owns the only
    // handle the view has to the forwarder.  It checks `stop` before every
    // message, so queued lines are discarded once the signal arrives.
    let pump_forwarder = Arc::clone(&forwarder) as Arc<dyn InputForwarder>;
    let mut pump_task = tokio::task::spawn_blocking(move || {
        let mut pump = InputPump::new(view, pump_forwarder);
        pump.run(&messages, &stop)
    });

    // The reader thread may be blocked on stdin; it is never awaited.
    let pump_result = tokio::select! {
        result = &mut pump_task => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            source.stop();
            pump_task.await
        }
    };
    let forwarded = pump_result.context("input pump task panicked")?;

    let dropped = forwarder.dropped_count();
    drop(forwarder);
    writer.await.context("output writer task panicked")?;

    info!(forwarded, dropped, "DeskView viewer stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
