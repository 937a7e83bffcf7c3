//! Kanboard - terminal kanban board viewer
//!
//! Shows records from a JSON data file as a board of colored cards, lets the
//! user mark records with the mouse, and keeps the column order in the config
//! file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kanboard::config::{Config, ConfigStore};
use kanboard::constants::APP_BINARY_NAME;
use kanboard::host::{FileDataSource, PropertyStore, RecordingHost};
use kanboard::services::{BoardBuilder, CycleOutcome};
use kanboard::tui::{restore_terminal, run_tui, setup_terminal, AppState};

/// Kanboard - terminal kanban board viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use this config file instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a data file in the interactive board
    View {
        /// Delivery document (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write logs here instead of the config directory
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },
    /// Print the board computed from a data file as JSON
    Layout {
        /// Delivery document (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Read the column order from this file instead of the config
        #[arg(long, value_name = "PATH")]
        order_file: Option<PathBuf>,
    },
    /// Show or change the persisted column order
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand, Debug)]
enum OrderAction {
    /// Print the persisted order, one label per line
    Show,
    /// Replace the persisted order (newline-separated labels)
    Set {
        /// New order text
        text: String,
    },
    /// Remove the persisted order
    Clear,
}

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Logs to stderr for the headless commands.
fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Logs to a file while the terminal UI owns the screen.
fn init_file_logging(verbose: bool, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

fn open_store(config: Option<&PathBuf>) -> Result<ConfigStore> {
    match config {
        Some(path) => ConfigStore::open(path.clone()),
        None => ConfigStore::open_default(),
    }
}

fn run_view(cli_config: Option<&PathBuf>, file: &Path) -> Result<()> {
    let store = open_store(cli_config)?;
    let board = &store.config().board;
    let source = FileDataSource::load(file, board.order_text(), board.dim_unmarked)?;
    info!(file = %file.display(), "opening board");

    let title = file
        .file_name()
        .map_or_else(|| file.display().to_string(), |name| name.to_string_lossy().into_owned());
    let mut state = AppState::new(source, store, title);

    let mut terminal = setup_terminal()?;
    let result = run_tui(&mut state, &mut terminal);
    restore_terminal(terminal)?;
    result
}

fn run_layout(cli_config: Option<&PathBuf>, file: &Path, order_file: Option<&PathBuf>) -> Result<()> {
    let config = match cli_config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let order_text = match order_file {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read order file: {}", path.display()))?,
        ),
        None => config.board.order_text(),
    };
    let delivery = FileDataSource::load(file, order_text, config.board.dim_unmarked)?.snapshot();

    let mut host = RecordingHost::default();
    let mut builder = BoardBuilder::new(config.board.invalid_colors);
    match builder.on_delivery(&delivery, &mut host) {
        CycleOutcome::Rendered(summary) => {
            info!(columns = summary.columns, cards = summary.cards, "layout computed");
        }
        CycleOutcome::Halted(err) => return Err(err).context("Failed to compute board"),
    }

    let board = builder.board().context("Board was not rendered")?;
    let json = serde_json::to_string_pretty(board).context("Failed to serialize board")?;
    println!("{json}");
    Ok(())
}

fn run_order(cli_config: Option<&PathBuf>, action: &OrderAction) -> Result<()> {
    let mut store = open_store(cli_config)?;
    let builder = BoardBuilder::default();
    match action {
        OrderAction::Show => {
            let text = &store.config().board.column_order;
            if text.is_empty() {
                eprintln!("No column order stored. Set one with:");
                eprintln!("  {APP_BINARY_NAME} order set \"Todo\\nDoing\\nDone\"");
            } else {
                println!("{text}");
            }
        }
        OrderAction::Set { text } => {
            // Accept literal "\n" so the order can be given on one line
            let text = text.replace("\\n", "\n");
            let stored = builder.edit_order(&text, &mut store)?;
            println!("Stored {} labels in {}", stored.lines().count(), store.path().display());
        }
        OrderAction::Clear => {
            store.write_order_text("")?;
            println!("Column order cleared");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::View { file, log_file } => {
            let log_path = match log_file {
                Some(path) => path.clone(),
                None => Config::log_file_path()?,
            };
            init_file_logging(cli.verbose, &log_path)?;
            run_view(cli.config.as_ref(), file)
        }
        Command::Layout { file, order_file } => {
            init_stderr_logging(cli.verbose);
            run_layout(cli.config.as_ref(), file, order_file.as_ref())
        }
        Command::Order { action } => {
            init_stderr_logging(cli.verbose);
            run_order(cli.config.as_ref(), action)
        }
    }
}
