//! wger-export CLI - Command-line tool for exporting wger exercises to XML.
//!
//! This is the main entry point for the wger-export command-line application.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wger_export::prelude::*;

/// wger-export - exercise export tool
#[derive(Parser)]
#[command(name = "wger-export")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to wger-export.toml)
    #[arg(short, long, env = "WGER_EXPORT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// SQLite database holding the exercises
    #[arg(long, env = "WGER_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// Directory stored image paths are relative to
    #[arg(long, env = "WGER_MEDIA_ROOT", global = true)]
    media_root: Option<PathBuf>,

    /// Display languages, comma separated, most preferred first
    #[arg(short, long, value_delimiter = ',', global = true)]
    languages: Vec<String>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export exercises to an XML file
    Export {
        /// Which exercises to export: `all`, or `user` for accepted exercises
        /// in the display languages
        #[arg(short, long, default_value = "all")]
        selector: String,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: Option<PathBuf>,

        /// Write the document to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show exercise counts
    Overview,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Export { selector, output, stdout } => {
            cmd_export(&config, &selector, output.as_deref(), stdout)?;
        }
        Commands::Overview => {
            cmd_overview(&config)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so `--stdout` output stays clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ExportConfig> {
    let mut config = match &cli.config {
        Some(path) => ExportConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExportConfig::load().context("Failed to load config")?,
    };

    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    if let Some(media_root) = &cli.media_root {
        config.media_root = media_root.clone();
    }
    if !cli.languages.is_empty() {
        config.display_languages = cli.languages.clone();
    }

    Ok(config)
}

fn open_handler(config: &ExportConfig) -> Result<ExportHandler<SqliteStore, FsImageStorage>> {
    let store = SqliteStore::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))?;

    Ok(ExportHandler::new(
        store,
        FsImageStorage::new(&config.media_root),
        config.display_languages.clone(),
    ))
}

fn cmd_export(
    config: &ExportConfig,
    selector: &str,
    output: Option<&Path>,
    stdout: bool,
) -> Result<()> {
    let permissions = config
        .permissions()
        .context("Invalid capabilities in config")?;
    let handler = open_handler(config)?;

    let start = Instant::now();
    let response = handler
        .handle(&permissions, selector)
        .context("Export failed")?;

    if stdout {
        print!("{}", response.body);
        return Ok(());
    }

    let dir = output.unwrap_or(&config.output_dir);
    let path = response
        .write_to(dir)
        .with_context(|| format!("Failed to write export to {}", dir.display()))?;

    println!(
        "Exported {} ({} bytes, {}) in {:?}",
        path.display(),
        response.body.len(),
        ExportResponse::CONTENT_TYPE,
        start.elapsed()
    );

    Ok(())
}

fn cmd_overview(config: &ExportConfig) -> Result<()> {
    let permissions = config
        .permissions()
        .context("Invalid capabilities in config")?;
    let handler = open_handler(config)?;
    let overview = handler.overview(&permissions)?;

    println!("Exercises: {}", overview.total);
    println!(
        "Accepted in display languages ({}): {}",
        handler.display_languages().join(", "),
        overview.by_display_languages
    );

    Ok(())
}
