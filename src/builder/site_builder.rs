//! # Site Builder Main Orchestrator
//!
//! Orchestratore principale che delega responsabilità ai moduli specializzati.
//!
//! ## Flusso di esecuzione:
//! 1. **Inizializzazione**: Valida il layout, carica le opzioni (una sola volta)
//! 2. **Reset output**: Cancella e ricrea la directory di output
//! 3. **Walk**: Un file alla volta dal `TreeWalker`
//! 4. **Dispatch**: Path di output, directory parent, classificazione
//! 5. **Esecuzione**: Minify o copia tramite `TaskExecutor`
//! 6. **Statistics**: `RunStats` aggiornato dopo ogni file, report finale
//!
//! L'elaborazione è sequenziale: ogni file viene completato prima di
//! richiedere il successivo. Il primo errore fatale interrompe la build
//! lasciando l'output parzialmente popolato.

use crate::{
    builder::{
        file_task::{FileTask, TaskExecutor},
        path_resolver::PathResolver,
        progress_tracker::ProgressTracker,
    },
    config::{resolve, BuildConfig},
    error::BuildError,
    file_manager::{FileKind, FileManager, TreeWalker},
    json_output::JsonMessage,
    minifier::{HtmlMinifier, Minifier},
    options::BuildOptions,
    progress::RunStats,
};
use std::time::Instant;
use tracing::{debug, info};

/// Orchestratore principale della build
pub struct SiteBuilder<M: Minifier = HtmlMinifier> {
    config: BuildConfig,
    options: BuildOptions,
    minifier: M,
}

impl SiteBuilder<HtmlMinifier> {
    /// Crea nuova istanza con il minifier HTML di default
    pub async fn new(config: BuildConfig) -> Result<Self, BuildError> {
        Self::with_minifier(config, HtmlMinifier::new()).await
    }
}

impl<M: Minifier> SiteBuilder<M> {
    /// Crea nuova istanza con un minifier specifico
    pub async fn with_minifier(config: BuildConfig, minifier: M) -> Result<Self, BuildError> {
        config.validate()?;
        let options = BuildOptions::load(&config.options_path).await;

        Ok(Self {
            config,
            options,
            minifier,
        })
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Esegue la build completa
    pub async fn run(&self) -> Result<RunStats, BuildError> {
        let start_time = Instant::now();
        let source_dir = &self.config.source_dir;
        let output_dir = &self.config.output_dir;

        self.emit_start_message();

        FileManager::reset_dir(output_dir).await?;

        let walker = self.walker()?;
        let resolver = PathResolver::new(source_dir, output_dir);
        let executor = TaskExecutor::new(&self.minifier, &self.options);
        let progress_tracker = ProgressTracker::new(self.config.json_output, &self.config.root);
        let mut stats = RunStats::new();

        for file in walker.files() {
            let source = file?;
            let output = resolver.mirror(&source)?;
            PathResolver::ensure_parent_dirs(&output).await?;

            let task = FileTask {
                kind: FileKind::classify(&source),
                source,
                output,
            };
            debug!("{:?}: {}", task.kind, task.source.display());

            let outcome = executor.execute(&task).await?;
            stats.record(&outcome);
            progress_tracker.handle_file_completion(&task, &outcome);
        }

        progress_tracker.finish(
            &stats,
            &self.config.display_output(),
            start_time.elapsed().as_secs_f64(),
        );

        Ok(stats)
    }

    /// Invia messaggio di inizio
    fn emit_start_message(&self) {
        if self.config.json_output {
            JsonMessage::start(
                self.config.source_dir.clone(),
                self.config.output_dir.clone(),
                self.options.len(),
            )
            .emit();
        } else {
            info!(
                "Building {} -> {} ({} minifier options)",
                self.config.source_dir.display(),
                self.config.output_dir.display(),
                self.options.len()
            );
        }
    }

    /// Walker sul source tree; esclude la directory di output se è annidata
    fn walker(&self) -> Result<TreeWalker, BuildError> {
        let source_dir = &self.config.source_dir;
        let walker = TreeWalker::new(source_dir);

        let source_abs = resolve(source_dir)?;
        let output_abs = resolve(&self.config.output_dir)?;
        match output_abs.strip_prefix(&source_abs) {
            Ok(nested) => {
                debug!("Output directory is nested in source: {}", nested.display());
                Ok(walker.excluding(source_dir.join(nested)))
            }
            Err(_) => Ok(walker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::file_task::tests::FailingMinifier;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const INDEX_HTML: &str = "<!DOCTYPE html>\n<html>\n  <head>\n    <title>Home</title>\n  </head>\n  <body>\n    <!-- main navigation -->\n    <nav>\n      <a href=\"/\">Home</a>\n    </nav>\n    <p>Welcome    to   the    site.</p>\n  </body>\n</html>\n";
    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    fn project() -> (TempDir, BuildConfig) {
        let temp_dir = TempDir::new().unwrap();
        let config = BuildConfig::for_root(temp_dir.path());
        std::fs::create_dir_all(&config.source_dir).unwrap();
        (temp_dir, config)
    }

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        walkdir::WalkDir::new(dir)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(dir).unwrap().to_path_buf();
                (rel, std::fs::read(e.path()).unwrap())
            })
            .collect()
    }

    #[tokio::test]
    async fn test_minifies_markup_and_copies_assets() {
        let (_temp_dir, config) = project();
        write(&config.source_dir, "index.html", INDEX_HTML.as_bytes());
        write(&config.source_dir, "logo.png", PNG_BYTES);

        let builder = SiteBuilder::new(config.clone()).await.unwrap();
        let stats = builder.run().await.unwrap();

        assert_eq!(stats.minified, 1);
        assert_eq!(stats.fallback, 0);
        assert_eq!(stats.copied, 1);
        assert!(stats.bytes_saved() > 0);

        let index = std::fs::read_to_string(config.output_dir.join("index.html")).unwrap();
        assert!(!index.contains("main navigation"));
        assert!(index.contains("Welcome to the site."));
        assert_eq!(index.len() as u64, stats.bytes_after);
        assert_eq!(
            std::fs::read(config.output_dir.join("logo.png")).unwrap(),
            PNG_BYTES
        );
    }

    #[tokio::test]
    async fn test_every_file_is_mirrored() {
        let (_temp_dir, config) = project();
        write(&config.source_dir, "index.html", b"<p>home</p>");
        write(&config.source_dir, "blog/post.HTM", b"<p>post</p>");
        write(&config.source_dir, "blog/img/photo.jpg", b"jpeg");
        write(&config.source_dir, "css/site.css", b"body { color: red; }");
        write(&config.source_dir, "CNAME", b"example.com");
        write(&config.source_dir, "data/archive.tar.zst", &[0, 1, 2, 3]);

        let builder = SiteBuilder::new(config.clone()).await.unwrap();
        let stats = builder.run().await.unwrap();

        let source = snapshot(&config.source_dir);
        let output = snapshot(&config.output_dir);
        assert_eq!(
            source.keys().collect::<Vec<_>>(),
            output.keys().collect::<Vec<_>>()
        );
        assert_eq!(stats.total_files(), 6);
        assert_eq!(stats.markup_files(), 2);

        for (rel, bytes) in &source {
            if !FileKind::classify(rel).is_markup() {
                assert_eq!(&output[rel], bytes, "{} differs", rel.display());
            }
        }
    }

    #[tokio::test]
    async fn test_minifier_failure_falls_back_to_original() {
        let (_temp_dir, config) = project();
        let broken = b"<html><body>BROKEN <p>unclosed</body>\n";
        write(&config.source_dir, "broken.html", broken);
        write(&config.source_dir, "ok.html", b"<p>fine</p>");

        let builder = SiteBuilder::with_minifier(config.clone(), FailingMinifier)
            .await
            .unwrap();
        let stats = builder.run().await.unwrap();

        assert_eq!(stats.minified, 1);
        assert_eq!(stats.fallback, 1);
        assert_eq!(
            std::fs::read(config.output_dir.join("broken.html")).unwrap(),
            broken
        );
        assert_eq!(
            std::fs::read(config.output_dir.join("ok.html")).unwrap(),
            b"<P>FINE</P>"
        );
    }

    #[tokio::test]
    async fn test_build_is_idempotent() {
        let (_temp_dir, config) = project();
        write(&config.source_dir, "index.html", INDEX_HTML.as_bytes());
        write(&config.source_dir, "about/index.html", b"<div>  <span> about </span>  </div>");
        write(&config.source_dir, "favicon.ico", &[0, 0, 1, 0]);

        let builder = SiteBuilder::new(config.clone()).await.unwrap();
        let first_stats = builder.run().await.unwrap();
        let first = snapshot(&config.output_dir);
        let second_stats = builder.run().await.unwrap();
        let second = snapshot(&config.output_dir);

        assert_eq!(first, second);
        assert_eq!(first_stats, second_stats);
    }

    #[tokio::test]
    async fn test_stale_output_is_removed() {
        let (_temp_dir, config) = project();
        write(&config.source_dir, "index.html", b"<p>home</p>");
        write(&config.output_dir, "old/removed.html", b"stale");
        write(&config.output_dir, "unrelated.txt", b"stale");

        SiteBuilder::new(config.clone())
            .await
            .unwrap()
            .run()
            .await
            .unwrap();

        let output = snapshot(&config.output_dir);
        assert_eq!(output.len(), 1);
        assert!(output.contains_key(Path::new("index.html")));
    }

    #[tokio::test]
    async fn test_invalid_options_file_uses_defaults() {
        let (_temp_dir, config) = project();
        write(&config.root, "htmlmin.config.json", b"{ this is not json");
        write(&config.source_dir, "index.html", INDEX_HTML.as_bytes());

        let builder = SiteBuilder::new(config.clone()).await.unwrap();
        assert_eq!(builder.options(), &BuildOptions::default());

        let stats = builder.run().await.unwrap();
        assert_eq!(stats.minified, 1);
    }

    #[tokio::test]
    async fn test_options_file_is_honored() {
        let (_temp_dir, config) = project();
        write(&config.root, "htmlmin.config.json", br#"{ "removeComments": false }"#);
        write(&config.source_dir, "index.html", INDEX_HTML.as_bytes());

        SiteBuilder::new(config.clone())
            .await
            .unwrap()
            .run()
            .await
            .unwrap();

        let index = std::fs::read_to_string(config.output_dir.join("index.html")).unwrap();
        assert!(index.contains("main navigation"));
    }

    #[tokio::test]
    async fn test_nested_output_is_not_walked() {
        let temp_dir = TempDir::new().unwrap();
        let config = BuildConfig {
            source_dir: temp_dir.path().to_path_buf(),
            output_dir: temp_dir.path().join("dist"),
            ..BuildConfig::for_root(temp_dir.path())
        };
        write(temp_dir.path(), "index.html", b"<p>home</p>");

        let builder = SiteBuilder::new(config.clone()).await.unwrap();
        builder.run().await.unwrap();
        let stats = builder.run().await.unwrap();

        assert_eq!(stats.total_files(), 1);
        assert!(config.output_dir.join("index.html").exists());
        assert!(!config.output_dir.join("dist").exists());
    }

    #[tokio::test]
    async fn test_invalid_layout_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = BuildConfig::for_root(temp_dir.path());

        let missing = SiteBuilder::new(config.clone()).await;
        assert!(matches!(missing, Err(BuildError::Layout(_))));

        std::fs::create_dir_all(&config.source_dir).unwrap();
        write(&config.source_dir, "index.html", b"<p>keep me</p>");
        let overlapping = BuildConfig {
            output_dir: config.source_dir.clone(),
            ..config.clone()
        };
        let result = SiteBuilder::new(overlapping).await;
        assert!(matches!(result, Err(BuildError::Layout(_))));
        assert!(config.source_dir.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_parent_output_never_deletes_source() {
        let (temp_dir, config) = project();
        write(&config.source_dir, "index.html", b"<p>home</p>");
        let up = BuildConfig {
            output_dir: config.source_dir.join(".."),
            ..BuildConfig::for_root(temp_dir.path())
        };

        let result = SiteBuilder::new(up).await;

        assert!(matches!(result, Err(BuildError::Layout(_))));
        assert!(config.source_dir.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_nested_output_through_parent_dir_is_not_walked() {
        let temp_dir = TempDir::new().unwrap();
        let config = BuildConfig {
            source_dir: temp_dir.path().join("site"),
            output_dir: temp_dir.path().join("site").join("drafts").join("..").join("dist"),
            ..BuildConfig::for_root(temp_dir.path())
        };
        write(&config.source_dir, "index.html", b"<p>home</p>");

        let builder = SiteBuilder::new(config.clone()).await.unwrap();
        builder.run().await.unwrap();
        let stats = builder.run().await.unwrap();

        assert_eq!(stats.total_files(), 1);
        assert!(!config.source_dir.join("dist").join("dist").exists());
    }

    #[tokio::test]
    async fn test_walk_failure_aborts_run() {
        let (_temp_dir, config) = project();
        write(&config.source_dir, "index.html", b"<p>home</p>");

        let builder = SiteBuilder::new(config.clone()).await.unwrap();
        std::fs::remove_dir_all(&config.source_dir).unwrap();

        let result = builder.run().await;

        assert!(matches!(result, Err(BuildError::Walk(_))));
        assert!(config.output_dir.is_dir());
        assert_eq!(std::fs::read_dir(&config.output_dir).unwrap().count(), 0);
    }
}
