//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery del source tree.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva e lazy dei file in una directory (`TreeWalker`)
//! - Classificazione dei file per estensione (markup vs asset)
//! - Reset della directory di output all'inizio di ogni run
//! - Formattazione human-readable delle dimensioni
//!
//! ## Classificazione (case-insensitive):
//! - **Markup** (minify): HTML, HTM
//! - **Asset** (copia 1:1): immagini, CSS, JS, font, PDF, WASM, ...
//! - **Altro** (copia 1:1): qualsiasi altra estensione, mai scartata
//!
//! ## Walk:
//! - Depth-first, nell'ordine restituito dal filesystem (nessun sort)
//! - Solo directory e file regolari: i symlink non vengono seguiti
//! - Ogni chiamata a `files()` ricalcola la sequenza da zero
//! - Un errore di lettura di una directory viene restituito e interrompe la build
//!
//! ## Esempio:
//! ```ignore
//! for file in TreeWalker::new("src").files() {
//!     let file = file?;
//!     if FileKind::classify(&file).is_markup() {
//!         // minify
//!     }
//! }
//! ```

use crate::error::BuildError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Extensions treated as markup and minified
pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];

/// Extensions known to be static assets, copied as-is
pub const ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "svg", "ico", "css", "js", "mjs", "map", "json", "txt",
    "xml", "pdf", "wasm", "woff", "woff2", "ttf", "otf",
];

/// How a source file is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Markup,
    Asset,
    Other,
}

impl FileKind {
    /// Classify a path by its extension
    pub fn classify(path: &Path) -> Self {
        let Some(ext) = path.extension() else {
            return Self::Other;
        };
        let ext_lower = ext.to_string_lossy().to_lowercase();

        if MARKUP_EXTENSIONS.contains(&ext_lower.as_str()) {
            Self::Markup
        } else if ASSET_EXTENSIONS.contains(&ext_lower.as_str()) {
            Self::Asset
        } else {
            Self::Other
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Markup)
    }
}

/// Lazy depth-first producer of the regular files under a root
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    excluded: Option<PathBuf>,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded: None,
        }
    }

    /// Skip a subtree; `dir` must be expressed under the walker's root
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded = Some(dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files under the root, recomputed on every call
    pub fn files(&self) -> impl Iterator<Item = Result<PathBuf, BuildError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| match &self.excluded {
                Some(excluded) if entry.file_type().is_dir() && entry.path() == excluded => {
                    debug!("Skipping output directory inside source tree: {}", excluded.display());
                    false
                }
                _ => true,
            })
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(BuildError::from(e))),
            })
    }
}

/// Filesystem helpers shared by the build
pub struct FileManager;

impl FileManager {
    /// Remove a directory tree if present and recreate it empty
    pub async fn reset_dir(dir: &Path) -> Result<(), BuildError> {
        match fs::remove_dir_all(dir).await {
            Ok(()) => debug!("Removed previous output: {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(BuildError::CleanOutput {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        }

        fs::create_dir_all(dir)
            .await
            .map_err(|source| BuildError::CleanOutput {
                path: dir.to_path_buf(),
                source,
            })
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction (negative when the file grew)
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}
