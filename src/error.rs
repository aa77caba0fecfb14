//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `BuildError` per gli errori fatali della build (interrompono il run)
//! - Definisce `MinifyError` per gli errori recuperabili del minifier (per singolo file)
//! - Ogni variante identifica l'operazione che ha fallito e il path coinvolto
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori fatali:
//! - `Layout`: Source/output root non validi (mancanti, sovrapposti)
//! - `CleanOutput`: Impossibile svuotare o ricreare la directory di output
//! - `CreateDir`: Impossibile creare una directory di destinazione
//! - `Walk`: Errore durante l'enumerazione di una directory
//! - `Read` / `Write` / `Copy`: Errori di I/O sui singoli file
//! - `MirrorPath`: Path fuori dalla source root
//!
//! ## Errori recuperabili (minifier):
//! - `InvalidUtf8Input`: Il file markup non è testo UTF-8
//! - `InvalidOption`: Un'opzione riconosciuta ha un valore del tipo sbagliato
//! - `InvalidUtf8Output`: Il minifier ha prodotto byte non UTF-8
//!
//! ## Esempio:
//! ```ignore
//! if !source.is_dir() {
//!     return Err(BuildError::Layout(format!("{} is not a directory", source.display())));
//! }
//! ```

use std::path::PathBuf;

/// Run-fatal errors, one variant per failing operation
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("Invalid layout: {0}")]
    Layout(String),

    #[error("Failed to clear output directory {}: {source}", .path.display())]
    CleanOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not under source root {}", .path.display(), .root.display())]
    MirrorPath { path: PathBuf, root: PathBuf },
}

/// Per-file minification failures; the build falls back to the original content
#[derive(thiserror::Error, Debug)]
pub enum MinifyError {
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8Input(#[from] std::str::Utf8Error),

    #[error("option `{name}` must be a {expected}")]
    InvalidOption { name: String, expected: &'static str },

    #[error("minifier produced invalid UTF-8: {0}")]
    InvalidUtf8Output(#[from] std::string::FromUtf8Error),
}
