//! # Path Resolution Module
//!
//! Centralizza la logica di calcolo dei path di output.
//! Il path di output è il path relativo alla source root, riportato sotto la
//! output root senza modifiche (nome file ed estensione inclusi).

use crate::error::BuildError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Mirrors source paths into the output tree
#[derive(Debug, Clone)]
pub struct PathResolver {
    source_root: PathBuf,
    output_root: PathBuf,
}

impl PathResolver {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Calcola il path di output per un file del source tree
    pub fn mirror(&self, input_path: &Path) -> Result<PathBuf, BuildError> {
        let relative = input_path
            .strip_prefix(&self.source_root)
            .map_err(|_| BuildError::MirrorPath {
                path: input_path.to_path_buf(),
                root: self.source_root.clone(),
            })?;

        let result = self.output_root.join(relative);
        debug!("Resolved output path: {} -> {}", input_path.display(), result.display());
        Ok(result)
    }

    /// Crea le directory parent se necessario
    pub async fn ensure_parent_dirs(path: &Path) -> Result<(), BuildError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| BuildError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }
}
