use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, error, info, warn};

use desk_wm::config::{WmConfig, default_config_toml};
use desk_wm::persistence::{FileStore, GeometryStore};
use desk_wm::term::keybindings::KeyBindings;
use desk_wm::term::{Desktop, TerminalHost};
use desk_wm::{WindowManager, tracing_sub};

/// A floating-window desktop in the terminal.
#[derive(Debug, Parser)]
#[command(name = "desk-wm", version, about)]
struct Cli {
    /// TOML file overriding window manager settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where window geometry is remembered between sessions.
    #[arg(long, value_name = "PATH", conflicts_with = "no_persist")]
    store: Option<PathBuf>,

    /// Keep window geometry in memory only.
    #[arg(long)]
    no_persist: bool,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: Level,

    /// Write logs here; without it logs are discarded.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the default configuration and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.print_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }
    if let Err(err) = tracing_sub::init(cli.log_level, cli.log_file.as_deref()) {
        eprintln!("desk-wm: cannot open log file: {err}");
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "desktop failed");
            eprintln!("desk-wm: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let config = match &cli.config {
        Some(path) => WmConfig::load_or(path, WmConfig::terminal())
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?,
        None => WmConfig::terminal(),
    };
    let store = open_store(cli);
    let (columns, rows) = crossterm::terminal::size()?;
    let wm = WindowManager::new(TerminalHost::new(columns, rows), config, store);
    let mut desktop = Desktop::new(wm, KeyBindings::default());
    desktop.run()
}

/// Geometry persistence never blocks startup: any failure falls back to an
/// in-memory store.
fn open_store(cli: &Cli) -> GeometryStore {
    if cli.no_persist {
        return GeometryStore::in_memory();
    }
    let Some(path) = cli.store.clone().or_else(FileStore::default_path) else {
        warn!("no data directory, geometry will not be remembered");
        return GeometryStore::in_memory();
    };
    match FileStore::open(&path) {
        Ok(store) => {
            info!(path = %path.display(), "remembering geometry");
            GeometryStore::new(store)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "geometry store unavailable, using memory");
            GeometryStore::in_memory()
        }
    }
}
