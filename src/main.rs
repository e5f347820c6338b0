//! Entry point for **bspdesk**.
//!
//! Loads the layout configuration, asks bspwm which monitors are connected,
//! and reconciles the desktops to the matching configuration.  Meant to be
//! run once per monitor change (e.g. from a udev or xrandr hook).

use bspdesk::bspwm::wm::BspcWm;
use bspdesk::config::{self, Config};
use bspdesk::reconciler::{ReconcileError, Reconciler};
use clap::Parser;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "bspdesk",
    version,
    about = "Arrange bspwm desktops according to the connected monitors"
)]
struct Cli {
    /// Configuration file (default: ./configuration.yaml, then
    /// $XDG_CONFIG_HOME/bspdesk/configuration.yaml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// bspwm control client to invoke
    #[arg(long, default_value = "bspc")]
    bspc: String,

    /// Print the planned actions instead of running them
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Print the selected configuration as JSON before reconciling
    #[arg(long)]
    dump: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/bspdesk`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("bspdesk")
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[derive(Debug, thiserror::Error)]
enum FatalError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("failed to serialize configuration: {0}")]
    Dump(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), FatalError> {
    let path = config::resolve_path(cli.config, Path::new("."), &config_dir());
    let config = Config::load(&path)?;
    info!("loaded config from {}", path.display());

    let reconciler = Reconciler::new(BspcWm::new(cli.bspc), config.options.clone());
    let current = reconciler.detect()?;
    let configuration = reconciler.select(&config, &current)?;

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(configuration)?);
    }

    let actions = reconciler.plan(configuration, &current);

    if cli.dry_run {
        for action in &actions {
            println!("{}", action);
        }
        return Ok(());
    }

    let report = reconciler.apply(&actions);
    if report.is_clean() {
        info!("done: {}", report);
    } else {
        warn!("done with failures: {}", report);
    }
    Ok(())
}
