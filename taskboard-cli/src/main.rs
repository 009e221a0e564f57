//! `taskboard`: command-line front end for the kanban board store.
//!
//! ```bash
//! taskboard board create "Sprint 1" --description "first two weeks"
//! taskboard task create "Sprint 1" "To Do" "Write spec" --priority high
//! taskboard task move "Sprint 1" "To Do" Done "Write spec"
//! taskboard search p:high due:overdue
//! ```

mod commands;
mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use taskboard_core::storage::local::LocalStorage;
use taskboard_core::BoardStore;

use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Kanban boards on the command line")]
struct Cli {
    /// Path to config file (default: ~/.config/taskboard/config.json)
    #[arg(short, long, env = "TASKBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the board snapshot
    #[arg(long, env = "TASKBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage key (snapshot file name without extension)
    #[arg(long)]
    key: Option<String>,

    /// Log filter, e.g. `info` or `taskboard_core=debug` (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Print JSON instead of text where a command has output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_logging(filter: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    builder.target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let resolved = config::resolve(config::load_config(&config_path), cli.data_dir, cli.key);
    log::info!(
        "[taskboard.cli] Using {:?} in {}",
        resolved.storage_key,
        resolved.data_dir.display()
    );

    let storage = LocalStorage::new(&resolved.data_dir);
    if let Err(e) = storage.path_for(&resolved.storage_key) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }
    let mut store = BoardStore::open(storage, resolved.storage_key);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = commands::run(&mut store, cli.command, cli.json, &mut out);
    let _ = out.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
