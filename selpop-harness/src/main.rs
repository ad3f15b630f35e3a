//! Selpop Harness - Replays a scripted selection scenario against the popup.
//!
//! Popup events are printed to stdout as JSON lines; logs go to stderr.

mod replay;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use selpop_actions::{
    builtin_registry, ActionUrls, RecordingClipboard, RecordingOpener, SystemClipboard,
    SystemOpener,
};
use selpop_core::{ActionRegistry, PopupOptions};
use tracing_subscriber::EnvFilter;

use scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "selpop-harness", version, about = "Replay a selection popup scenario")]
struct Args {
    /// Scenario file (JSON).
    scenario: PathBuf,

    /// Options file overriding the scenario's `options`.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Drive the popup with real timers instead of a virtual clock.
    #[arg(long)]
    realtime: bool,

    /// Record clipboard writes and opened URLs instead of performing them.
    #[arg(long)]
    dry_run: bool,
}

/// Recorders kept for the end-of-run summary in dry-run mode.
struct DryRun {
    clipboard: RecordingClipboard,
    opener: RecordingOpener,
}

fn build_actions(urls: ActionUrls, dry_run: bool) -> Result<(ActionRegistry, Option<DryRun>)> {
    if dry_run {
        let recorders = DryRun {
            clipboard: RecordingClipboard::new(),
            opener: RecordingOpener::new(),
        };
        let registry =
            builtin_registry(urls, recorders.clipboard.clone(), recorders.opener.clone())?;
        Ok((registry, Some(recorders)))
    } else {
        Ok((builtin_registry(urls, SystemClipboard, SystemOpener)?, None))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(path) = &args.options {
        scenario.options = PopupOptions::load(path)?;
    }
    tracing::info!(
        scenario = %args.scenario.display(),
        steps = scenario.steps.len(),
        realtime = args.realtime,
        "Starting replay"
    );

    let (actions, dry_run) = build_actions(scenario.urls.clone(), args.dry_run)?;

    if args.realtime {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let local = tokio::task::LocalSet::new();
        local.block_on(&runtime, replay::replay_realtime(&scenario, actions))?;
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        replay::replay_virtual(&scenario, actions, &mut out)?;
    }

    if let Some(dry_run) = dry_run {
        for text in dry_run.clipboard.copied() {
            tracing::info!(%text, "dry run: would copy");
        }
        for url in dry_run.opener.opened() {
            tracing::info!(%url, "dry run: would open");
        }
    }

    Ok(())
}
