//! # File Task Module
//!
//! Worker per l'elaborazione di un singolo file del source tree.
//! Separato dall'orchestratore principale per maggiore modularità.
//!
//! - Markup: lettura completa, minify, scrittura. Se il minifier fallisce
//!   viene scritto il contenuto originale e la build continua.
//! - Asset e altri file: copia binaria 1:1.
//!
//! Gli errori di I/O sono fatali e vengono propagati come `BuildError`.

use crate::{
    error::{BuildError, MinifyError},
    file_manager::FileKind,
    minifier::Minifier,
    options::BuildOptions,
};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, error};

/// One file of the walk: where it comes from, where it goes, how it is handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub source: PathBuf,
    pub output: PathBuf,
    pub kind: FileKind,
}

/// What happened to a single file
#[derive(Debug)]
pub enum FileOutcome {
    Minified {
        original_size: u64,
        minified_size: u64,
    },
    /// Minification failed; the original bytes were written
    Fallback {
        original_size: u64,
        error: MinifyError,
    },
    Copied {
        size: u64,
    },
}

impl FileOutcome {
    /// Diagnostic for a fallback, naming the file and the minifier error
    pub fn diagnostic(&self, task: &FileTask) -> Option<String> {
        match self {
            Self::Fallback { error, .. } => Some(format!(
                "✖ minify failed: {}\n  {}\n  -> copying unminified",
                task.source.display(),
                error
            )),
            _ => None,
        }
    }
}

/// Executes file tasks with a given minifier and option set
pub struct TaskExecutor<'a, M: Minifier + ?Sized> {
    minifier: &'a M,
    options: &'a BuildOptions,
}

impl<'a, M: Minifier + ?Sized> TaskExecutor<'a, M> {
    pub fn new(minifier: &'a M, options: &'a BuildOptions) -> Self {
        Self { minifier, options }
    }

    /// Processa un singolo file, scrivendo esattamente un file di output
    pub async fn execute(&self, task: &FileTask) -> Result<FileOutcome, BuildError> {
        if task.kind.is_markup() {
            self.minify_file(task).await
        } else {
            self.copy_file(task).await
        }
    }

    async fn minify_file(&self, task: &FileTask) -> Result<FileOutcome, BuildError> {
        let original = fs::read(&task.source)
            .await
            .map_err(|source| BuildError::Read {
                path: task.source.clone(),
                source,
            })?;
        let original_size = original.len() as u64;

        let result = std::str::from_utf8(&original)
            .map_err(MinifyError::from)
            .and_then(|html| self.minifier.minify(html, self.options));

        let outcome = match result {
            Ok(minified) => {
                self.write(task, minified.as_bytes()).await?;
                FileOutcome::Minified {
                    original_size,
                    minified_size: minified.len() as u64,
                }
            }
            Err(error) => {
                self.write(task, &original).await?;
                FileOutcome::Fallback {
                    original_size,
                    error,
                }
            }
        };

        if let Some(diagnostic) = outcome.diagnostic(task) {
            error!("{}", diagnostic);
        }

        Ok(outcome)
    }

    async fn copy_file(&self, task: &FileTask) -> Result<FileOutcome, BuildError> {
        let size = fs::copy(&task.source, &task.output)
            .await
            .map_err(|source| BuildError::Copy {
                from: task.source.clone(),
                to: task.output.clone(),
                source,
            })?;
        debug!("Copied {} ({} bytes)", task.output.display(), size);
        Ok(FileOutcome::Copied { size })
    }

    async fn write(&self, task: &FileTask, content: &[u8]) -> Result<(), BuildError> {
        fs::write(&task.output, content)
            .await
            .map_err(|source| BuildError::Write {
                path: task.output.clone(),
                source,
            })
    }
}
