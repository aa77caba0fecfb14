//! # Minifier Options Module
//!
//! Questo modulo carica le opzioni passate al minifier HTML.
//!
//! ## Responsabilità:
//! - Legge `htmlmin.config.json` dalla project root (se presente)
//! - Fornisce un set di opzioni di default quando il file manca o non è valido
//! - Non fallisce mai: la build parte sempre con un `BuildOptions` valido
//!
//! ## Formato:
//! Un oggetto JSON con nomi di opzione in stile html-minifier:
//! ```json
//! { "removeComments": true, "minifyCSS": true, "minifyJS": false }
//! ```
//! Il contenuto non viene interpretato qui: è il minifier a decidere
//! quali opzioni conosce.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Option name to value mapping handed to the minifier as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildOptions(Map<String, Value>);

impl BuildOptions {
    /// Load options from a JSON file, falling back to the defaults on any failure
    pub async fn load(path: &Path) -> Self {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No options file at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Cannot read options file {}: {} - using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::parse(&raw) {
            Some(options) => {
                let names: Vec<&str> = options.iter().map(|(name, _)| name.as_str()).collect();
                debug!(
                    "Loaded {} options from {}: {}",
                    options.len(),
                    path.display(),
                    names.join(", ")
                );
                options
            }
            None => {
                warn!("Invalid options file {} - using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse a JSON object; anything else is rejected
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw).ok()? {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        let defaults = json!({
            "collapseWhitespace": true,
            "removeComments": true,
            "removeRedundantAttributes": true,
            "removeScriptTypeAttributes": true,
            "removeStyleLinkTypeAttributes": true,
            "useShortDoctype": true,
            "minifyCSS": true,
            "minifyJS": true
        });
        match defaults {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_options() {
        let options = BuildOptions::default();
        assert_eq!(options.len(), 8);
        assert_eq!(options.get("removeComments"), Some(&Value::Bool(true)));
        assert_eq!(options.get("minifyJS"), Some(&Value::Bool(true)));
        assert_eq!(options.get("keepClosingSlash"), None);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(BuildOptions::parse("[true, false]").is_none());
        assert!(BuildOptions::parse("\"removeComments\"").is_none());
        assert!(BuildOptions::parse("{ not json").is_none());
        assert!(BuildOptions::parse("{}").is_some_and(|o| o.is_empty()));
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let options = BuildOptions::load(&temp_dir.path().join("htmlmin.config.json")).await;
        assert_eq!(options, BuildOptions::default());
    }

    #[tokio::test]
    async fn test_load_invalid_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("htmlmin.config.json");
        tokio::fs::write(&path, "{ removeComments: yes").await.unwrap();

        let options = BuildOptions::load(&path).await;
        assert_eq!(options, BuildOptions::default());
    }

    #[tokio::test]
    async fn test_load_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("htmlmin.config.json");
        tokio::fs::write(&path, r#"{ "removeComments": false, "quoteCharacter": "'" }"#)
            .await
            .unwrap();

        let options = BuildOptions::load(&path).await;
        assert_eq!(options.len(), 2);
        assert_eq!(options.get("removeComments"), Some(&Value::Bool(false)));
        assert_eq!(options.get("quoteCharacter"), Some(&Value::String("'".to_string())));
    }

    #[test]
    fn test_iter_yields_every_option() {
        let options = BuildOptions::parse(r#"{ "minifyJS": false, "removeComments": true }"#).unwrap();
        let pairs: Vec<(&str, &Value)> = options.iter().map(|(k, v)| (k.as_str(), v)).collect();

        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("minifyJS", &Value::Bool(false))));
        assert!(pairs.contains(&("removeComments", &Value::Bool(true))));
    }
}
