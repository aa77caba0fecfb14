//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso programmatico.
//!
//! ## Responsabilità:
//! - Emette messaggi JSON strutturati (uno per riga) su stdout
//! - Riusa `RunStats` per il messaggio finale
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio build (source, output, numero di opzioni)
//! - `file_complete`: Fine elaborazione di un file (minified, fallback o copied)
//! - `complete`: Fine build con statistiche finali
//! - `error`: Errore fatale

use crate::builder::file_task::{FileOutcome, FileTask};
use crate::progress::RunStats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio della build
    #[serde(rename = "start")]
    Start {
        source_dir: PathBuf,
        output_dir: PathBuf,
        options: usize,
    },

    /// Fine elaborazione di un file specifico
    #[serde(rename = "file_complete")]
    FileComplete {
        path: PathBuf,
        output: PathBuf,
        kind: String,
        original_size: u64,
        output_size: u64,
        error: Option<String>,
    },

    /// Build completata
    #[serde(rename = "complete")]
    Complete {
        minified: usize,
        fallback: usize,
        copied: usize,
        bytes_before: u64,
        bytes_after: u64,
        bytes_saved: i64,
        saved_percent: f64,
        duration_seconds: f64,
    },

    /// Errore fatale
    #[serde(rename = "error")]
    Error { message: String },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(source_dir: PathBuf, output_dir: PathBuf, options: usize) -> Self {
        Self::Start {
            source_dir,
            output_dir,
            options,
        }
    }

    /// Crea un messaggio di completamento file
    pub fn file_complete(task: &FileTask, outcome: &FileOutcome) -> Self {
        let (kind, original_size, output_size, error) = match outcome {
            FileOutcome::Minified {
                original_size,
                minified_size,
            } => ("minified", *original_size, *minified_size, None),
            FileOutcome::Fallback {
                original_size,
                error,
            } => ("fallback", *original_size, *original_size, Some(error.to_string())),
            FileOutcome::Copied { size } => ("copied", *size, *size, None),
        };

        Self::FileComplete {
            path: task.source.clone(),
            output: task.output.clone(),
            kind: kind.to_string(),
            original_size,
            output_size,
            error,
        }
    }

    /// Crea un messaggio di completamento generale
    pub fn complete(stats: &RunStats, duration_seconds: f64) -> Self {
        Self::Complete {
            minified: stats.minified,
            fallback: stats.fallback,
            copied: stats.copied,
            bytes_before: stats.bytes_before,
            bytes_after: stats.bytes_after,
            bytes_saved: stats.bytes_saved(),
            saved_percent: stats.saved_percent(),
            duration_seconds,
        }
    }

    pub fn error(message: String) -> Self {
        Self::Error { message }
    }
}
