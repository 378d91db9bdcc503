use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use tarefa::core::config::{self, CliOverrides, TarefaConfig};
use tarefa::storage::{PersistenceAdapter, SaveQueue, open_store};
use tarefa::tui;

#[derive(Parser)]
#[command(name = "tarefa", about = "A small to-do list for the terminal")]
struct Args {
    /// Directory holding the saved task list
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Storage key the list is saved under
    #[arg(long)]
    key: Option<String>,

    /// Keep tasks in memory only; nothing is read or written
    #[arg(long)]
    ephemeral: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            storage_dir: args.storage_dir,
            key: args.key,
            ephemeral: args.ephemeral,
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliOverrides::from(Args::parse());
    dotenv::dotenv().ok();

    // Config messages and errors are logged once the logger is up
    let mut notes = Vec::new();
    let (file_config, config_error) = match config::load_config(&mut notes) {
        Ok(cfg) => (cfg, None),
        Err(e) => (TarefaConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, &cli, &mut notes);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "tarefa: cannot open log file {}: {}",
            resolved.log_file.display(),
            e
        ),
    }

    for note in &notes {
        note.log();
    }
    if let Some(e) = &config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("tarefa starting up: {:?}", resolved);

    let store = open_store(
        resolved.backend,
        resolved.storage_dir.as_deref(),
        &resolved.key,
    )
    .with_context(|| {
        format!(
            "opening {:?} storage with key {:?}",
            resolved.backend, resolved.key
        )
    })?;

    let adapter = PersistenceAdapter::with_key(store, resolved.key.clone());
    let queue = SaveQueue::spawn(adapter.clone());

    let result = tui::run(adapter, &queue);

    // Drain pending saves even if the UI failed
    queue.shutdown().await;
    log::info!("tarefa shut down");

    result.context("terminal UI failed")
}
