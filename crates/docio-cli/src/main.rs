//! # docio CLI
//!
//! Command-line front end for the docio ingestion pipeline.
//!
//! ## Commands
//!
//! - `docio load <PATH>` - Load a file and print its documents
//! - `docio formats` - List registered extensions and their extractors
//! - `docio config` - Print the effective configuration
//!
//! ## Examples
//!
//! ```bash
//! # Print every page of a PDF
//! docio load handbook.pdf
//!
//! # JSON output with caller metadata, staged like an upload
//! docio load ./tmp/upload-3f2a --upload-name "Board Deck.pdf" --format json
//! ```
//!
//! Exit status is 2 when the input was rejected (unsupported type, malformed
//! file, invalid configuration) and 1 for any other failure.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docio::{DocioError, Document, DocumentOverlay, Loader, LoaderConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod logging;

#[derive(Parser)]
#[command(name = "docio")]
#[command(about = "Turn text, Markdown, CSV and PDF files into sanitized documents")]
#[command(version)]
struct Cli {
    /// Path to a config file (TOML, YAML or JSON). Defaults to a discovered docio.toml.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a file and print the resulting documents
    Load {
        /// File to load
        path: PathBuf,

        /// Treat the file as an upload with this original filename
        #[arg(long, conflicts_with_all = ["source", "document_id"])]
        upload_name: Option<String>,

        /// Override the `source` metadata of every document
        #[arg(long)]
        source: Option<String>,

        /// Set the `document_id` metadata of every document
        #[arg(long)]
        document_id: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List supported file extensions
    Formats {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// 2 for rejected input, 1 for everything else.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DocioError>() {
        Some(docio_err) if docio_err.is_user_error() => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Load {
            path,
            upload_name,
            source,
            document_id,
            format,
            pretty,
        } => {
            let loader = Loader::with_config(config)?;
            let docs = match upload_name {
                Some(name) => {
                    let bytes = std::fs::read(&path).map_err(|e| {
                        DocioError::extraction_with_source(format!("Failed to read {}", path.display()), e)
                    })?;
                    loader.load_upload(&name, &bytes)?
                }
                None => {
                    let mut overlay = DocumentOverlay::new();
                    if let Some(source) = source {
                        overlay = overlay.with_source(source);
                    }
                    if let Some(document_id) = document_id {
                        overlay = overlay.with_document_id(document_id);
                    }
                    loader.load_with_overlay(&path, &overlay)?
                }
            };
            tracing::info!(path = %path.display(), documents = docs.len(), "Loaded");
            print_documents(&docs, format, pretty)
        }
        Commands::Formats { format } => {
            let loader = Loader::with_config(config)?;
            let entries = loader.registry().entries();
            match format {
                OutputFormat::Text => {
                    for (extension, extractor) in entries {
                        println!("{:<10} {}", extension, extractor);
                    }
                }
                OutputFormat::Json => {
                    let map: serde_json::Map<String, serde_json::Value> = entries
                        .into_iter()
                        .map(|(extension, extractor)| (extension, serde_json::Value::String(extractor)))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&map)?);
                }
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", toml::to_string(&config).context("Failed to serialize configuration")?);
            Ok(())
        }
    }
}

/// Explicit `--config` file, else a discovered `docio.toml`, else defaults.
fn load_config(path: Option<&Path>) -> Result<LoaderConfig> {
    let config = match path {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::discover()?.unwrap_or_default(),
    };
    tracing::debug!(?config, "Using configuration");
    Ok(config)
}

fn print_documents(docs: &[Document], format: OutputFormat, pretty: bool) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (index, doc) in docs.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("--- document {} (page {}) ---", index + 1, doc.page());
                for (key, value) in doc.metadata() {
                    println!("{}: {}", key, value);
                }
                println!();
                println!("{}", doc.page_content());
            }
        }
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(docs)?
            } else {
                serde_json::to_string(docs)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
