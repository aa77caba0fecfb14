//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione della build.
//!
//! ## Responsabilità:
//! - Definisce la struct `BuildConfig` con i path risolti una sola volta al confine (CLI)
//! - Fornisce valori di default sensati (`src` → `dist`, `htmlmin.config.json`)
//! - Valida il layout prima che la directory di output venga cancellata
//!
//! ## Parametri di configurazione:
//! - `root`: Project root (default: `.`)
//! - `source_dir`: Directory sorgente (default: `<root>/src`)
//! - `output_dir`: Directory di output, svuotata a ogni run (default: `<root>/dist`)
//! - `options_path`: File JSON opzionale con le opzioni del minifier
//! - `json_output`: Emette eventi JSON invece dell'output leggibile
//!
//! ## Validazione:
//! - La source root deve esistere ed essere una directory
//! - La output root non può coincidere con la source root né contenerla
//!   (verrebbe cancellata insieme ai sorgenti)
//!
//! ## Esempio:
//! ```ignore
//! let config = BuildConfig {
//!     output_dir: PathBuf::from("public"),
//!     ..BuildConfig::for_root(".")
//! };
//! config.validate()?;
//! ```

use crate::error::BuildError;
use std::path::{Component, Path, PathBuf};

/// Default source directory, relative to the project root
pub const DEFAULT_SOURCE_DIR: &str = "src";
/// Default output directory, relative to the project root
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
/// Options file looked up in the project root
pub const OPTIONS_FILE_NAME: &str = "htmlmin.config.json";

/// Configuration for a build run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project root, used to resolve defaults and to shorten paths in output
    pub root: PathBuf,
    /// Tree to read from
    pub source_dir: PathBuf,
    /// Tree to rebuild
    pub output_dir: PathBuf,
    /// Optional JSON options for the minifier
    pub options_path: PathBuf,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl BuildConfig {
    /// Default layout under the given project root
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            source_dir: root.join(DEFAULT_SOURCE_DIR),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            options_path: root.join(OPTIONS_FILE_NAME),
            json_output: false,
            root,
        }
    }

    /// Validate the source/output layout
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.source_dir.exists() {
            return Err(BuildError::Layout(format!(
                "Source directory does not exist: {}",
                self.source_dir.display()
            )));
        }
        if !self.source_dir.is_dir() {
            return Err(BuildError::Layout(format!(
                "Source path is not a directory: {}",
                self.source_dir.display()
            )));
        }

        let source = resolve(&self.source_dir)?;
        let output = resolve(&self.output_dir)?;
        if source.starts_with(&output) {
            return Err(BuildError::Layout(format!(
                "Output directory {} would delete source directory {}",
                self.output_dir.display(),
                self.source_dir.display()
            )));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(BuildError::Layout(format!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            )));
        }

        Ok(())
    }

    /// Output directory relative to the project root, for display
    pub fn display_output(&self) -> String {
        display_relative(&self.output_dir, &self.root)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::for_root(".")
    }
}

/// Absolute path with symlinks and `..` resolved, even if it does not exist yet
///
/// The nearest existing ancestor is canonicalized; the missing tail is
/// normalized lexically.
pub(crate) fn resolve(path: &Path) -> Result<PathBuf, BuildError> {
    let absolute = std::path::absolute(path).map_err(|e| {
        BuildError::Layout(format!("Cannot resolve {}: {}", path.display(), e))
    })?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        let (Some(parent), Some(last)) = (existing.parent(), existing.components().next_back())
        else {
            break;
        };
        missing.push(last);
        existing = parent;
    }

    let mut resolved = existing.canonicalize().map_err(|e| {
        BuildError::Layout(format!("Cannot resolve {}: {}", existing.display(), e))
    })?;
    for component in missing.into_iter().rev() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

/// `path` relative to `base` when possible, the path itself otherwise
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
