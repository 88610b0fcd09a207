mod ai;
mod app;
mod classifier;
mod config;
mod domain;
mod infrastructure;
mod router;
mod sources;
mod store;
mod summarizer;
mod tasks;
#[cfg(test)]
mod testing;
mod vault;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use infrastructure::{directories, logging};

#[derive(Debug, Parser)]
#[command(name = "bookmark-router", version, about = "Classify saved bookmarks and route them")]
struct Cli {
    /// Category and routing YAML
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Processed-ID ledger
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Notes vault root
    #[arg(long, global = true)]
    vault: Option<PathBuf>,
    /// How many bookmarks to fetch
    #[arg(long, global = true)]
    limit: Option<usize>,
    /// Parallel workers
    #[arg(long, global = true)]
    workers: Option<usize>,
    /// Process one bookmark at a time
    #[arg(long, global = true)]
    sequential: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Process new bookmarks
    Process {
        /// Reprocess bookmarks already in the ledger
        #[arg(long)]
        force: bool,
    },
    /// Show processing stats
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = config::load_config()?;
    if let Some(path) = cli.config {
        config.paths.config_file = path;
    }
    if let Some(path) = cli.state {
        config.paths.state_file = path;
    }
    if let Some(path) = cli.vault {
        config.paths.vault_dir = path;
    }
    if let Some(limit) = cli.limit {
        config.source.limit = limit;
    }
    if let Some(workers) = cli.workers {
        config.pipeline.workers = workers;
    }
    if cli.sequential {
        config.pipeline.parallel = false;
    }

    let paths = directories::ensure_directories(&config.paths)?;
    logging::init_tracing(&config, &paths)?;

    let app = app::BookmarkApp::initialize(config, paths)?;
    match cli.command.unwrap_or(Command::Process { force: false }) {
        Command::Process { force } => app.process(force).await,
        Command::Status => app.status(),
    }
}
