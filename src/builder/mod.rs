//! # Builder Module
//!
//! Modulo che separa le responsabilità della build in sottomoduli:
//! - `site_builder`: Orchestratore principale
//! - `file_task`: Worker per singoli file (minify o copia)
//! - `progress_tracker`: Feedback per file e report finale
//! - `path_resolver`: Calcolo dei path di output (mirror del source tree)

pub mod file_task;
pub mod path_resolver;
pub mod progress_tracker;
pub mod site_builder;

pub use file_task::{FileOutcome, FileTask, TaskExecutor};
pub use path_resolver::PathResolver;
pub use progress_tracker::ProgressTracker;
pub use site_builder::SiteBuilder;
