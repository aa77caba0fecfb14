//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il feedback visuale e le statistiche della build.
//!
//! ## Responsabilità:
//! - Spinner con `indicatif` che mostra il file corrente
//! - Tracking statistiche della build (`RunStats`)
//! - Calcolo byte risparmiati e percentuale di riduzione
//! - Riga di riepilogo finale
//!
//! ## Statistiche tracciate:
//! - **minified**: File markup minificati con successo
//! - **fallback**: File markup per cui il minifier ha fallito (copiati invariati)
//! - **copied**: Asset copiati 1:1
//! - **bytes_before / bytes_after**: Dimensione markup prima e dopo (fallback inclusi)
//!
//! Il walk è lazy: il numero totale di file non è noto in anticipo,
//! per questo si usa uno spinner invece di una barra.
//!
//! ## Esempio:
//! ```ignore
//! let mut stats = RunStats::new();
//! stats.record(&outcome);
//! println!("{}", stats.format_summary("dist"));
//! ```

use crate::builder::file_task::FileOutcome;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Manages the spinner shown while the tree is processed
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a spinner for indeterminate progress
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        Self { bar }
    }

    /// A manager that draws nothing (JSON mode)
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Aggregate counters for one build run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub minified: usize,
    pub fallback: usize,
    pub copied: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one processed file
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Minified {
                original_size,
                minified_size,
            } => {
                self.minified += 1;
                self.bytes_before += original_size;
                self.bytes_after += minified_size;
            }
            FileOutcome::Fallback { original_size, .. } => {
                self.fallback += 1;
                self.bytes_before += original_size;
                self.bytes_after += original_size;
            }
            FileOutcome::Copied { .. } => {
                self.copied += 1;
            }
        }
    }

    /// Markup files processed, whether or not minification succeeded
    pub fn markup_files(&self) -> usize {
        self.minified + self.fallback
    }

    pub fn total_files(&self) -> usize {
        self.markup_files() + self.copied
    }

    /// Bytes saved on markup; negative if the minifier grew the output
    pub fn bytes_saved(&self) -> i64 {
        self.bytes_before as i64 - self.bytes_after as i64
    }

    pub fn saved_percent(&self) -> f64 {
        if self.bytes_before == 0 {
            0.0
        } else {
            self.bytes_saved() as f64 / self.bytes_before as f64 * 100.0
        }
    }

    pub fn format_summary(&self, output: &str) -> String {
        format!(
            "Minified {} HTML file(s) ({} fell back to original). Copied {} asset(s).\nSaved {} bytes ({:.1}%). Output → {}",
            self.minified,
            self.fallback,
            self.copied,
            self.bytes_saved(),
            self.saved_percent(),
            output
        )
    }
}
