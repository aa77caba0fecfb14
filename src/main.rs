//! # HTML Minify Build - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Risoluzione dei path (una sola volta, qui) in un `BuildConfig`
//! - Avvio della build e exit code non-zero in caso di errore fatale
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (root, src, out, config, json, verbose)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose, `RUST_LOG` ha la precedenza)
//! 3. Crea il `BuildConfig` e istanzia `SiteBuilder`
//! 4. Esegue la build e stampa il riepilogo
//!
//! ## Esempio di utilizzo:
//! ```bash
//! HTML_SRC_DIR=site html-minify --out public --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use html_minify_build::config::{DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR, OPTIONS_FILE_NAME};
use html_minify_build::json_output::JsonMessage;
use html_minify_build::{BuildConfig, BuildError, RunStats, SiteBuilder};

#[derive(Parser)]
#[command(name = "html-minify")]
#[command(about = "Minify HTML and copy static assets into an output directory")]
struct Args {
    /// Project root; relative paths below are resolved against it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Source directory
    #[arg(long, env = "HTML_SRC_DIR", default_value = DEFAULT_SOURCE_DIR)]
    src: PathBuf,

    /// Output directory (cleared on every run)
    #[arg(long, env = "HTML_OUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Minifier options file [default: <root>/htmlmin.config.json]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output progress and status as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the --verbose level
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = BuildConfig {
        source_dir: args.root.join(&args.src),
        output_dir: args.root.join(&args.out),
        options_path: args
            .config
            .unwrap_or_else(|| args.root.join(OPTIONS_FILE_NAME)),
        json_output: args.json,
        root: args.root,
    };

    let json_output = config.json_output;
    if let Err(e) = build(config).await {
        if json_output {
            JsonMessage::error(e.to_string()).emit();
        }
        return Err(e.into());
    }

    Ok(())
}

async fn build(config: BuildConfig) -> Result<RunStats, BuildError> {
    let builder = SiteBuilder::new(config).await?;
    builder.run().await
}
