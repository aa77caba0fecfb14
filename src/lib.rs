//! # HTML Minify Build Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Layout della build (source, output, file opzioni) e validazione
//! - `options`: Caricamento opzioni del minifier con fallback ai default
//! - `error`: Tipi di errore fatali e recuperabili
//! - `file_manager`: Walk del source tree e classificazione per estensione
//! - `minifier`: Trait `Minifier` e implementazione con `minify-html`
//! - `builder`: Orchestratore della build e worker per singoli file
//! - `progress`: Spinner e statistiche
//! - `json_output`: Eventi JSON per uso programmatico
//!
//! ## Utilizzo:
//! ```ignore
//! use html_minify_build::{BuildConfig, SiteBuilder};
//!
//! let builder = SiteBuilder::new(BuildConfig::for_root(".")).await?;
//! let stats = builder.run().await?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod minifier;
pub mod options;
pub mod progress;

pub use builder::SiteBuilder;
pub use config::BuildConfig;
pub use error::{BuildError, MinifyError};
pub use minifier::{HtmlMinifier, Minifier};
pub use options::BuildOptions;
pub use progress::RunStats;
