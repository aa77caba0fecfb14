//! # Progress Tracking Module
//!
//! Gestisce il feedback per ogni file completato e il report finale.
//! Supporta sia output JSON che spinner tradizionale.

use crate::{
    builder::file_task::{FileOutcome, FileTask},
    config::display_relative,
    file_manager::FileManager,
    json_output::JsonMessage,
    progress::{ProgressManager, RunStats},
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Tracker progress per una singola build
pub struct ProgressTracker {
    json_output: bool,
    root: PathBuf,
    progress_manager: ProgressManager,
}

impl ProgressTracker {
    /// Crea un nuovo tracker
    pub fn new(json_output: bool, root: impl Into<PathBuf>) -> Self {
        let progress_manager = if json_output {
            ProgressManager::hidden()
        } else {
            ProgressManager::spinner("Building...")
        };

        Self {
            json_output,
            root: root.into(),
            progress_manager,
        }
    }

    /// Gestisce completamento file con eventi JSON automatici
    pub fn handle_file_completion(&self, task: &FileTask, outcome: &FileOutcome) {
        if self.json_output {
            JsonMessage::file_complete(task, outcome).emit();
            return;
        }

        let output = display_relative(&task.output, &self.root);
        let message = match outcome {
            FileOutcome::Minified {
                original_size,
                minified_size,
            } => {
                info!("✓ minified {}", output);
                format!(
                    "[OK] {}: {:.1}% saved",
                    output,
                    FileManager::calculate_reduction(*original_size, *minified_size)
                )
            }
            FileOutcome::Fallback { .. } => format!("[FALLBACK] {}: copied unminified", output),
            FileOutcome::Copied { size } => {
                debug!("copied {} ({})", output, FileManager::format_size(*size));
                format!("[COPY] {}", output)
            }
        };
        self.progress_manager.update(&message);
    }

    /// Stampa statistiche finali
    pub fn finish(&self, stats: &RunStats, output: &str, duration: f64) {
        self.progress_manager.finish();

        if self.json_output {
            JsonMessage::complete(stats, duration).emit();
            return;
        }

        for line in stats.format_summary(output).lines() {
            info!("{}", line);
        }
        debug!(
            "Markup {} -> {} in {:.2}s",
            FileManager::format_size(stats.bytes_before),
            FileManager::format_size(stats.bytes_after),
            duration
        );
    }
}
