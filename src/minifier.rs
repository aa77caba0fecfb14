//! # HTML Minification Module
//!
//! Questo modulo incapsula il minifier HTML usato per i file markup.
//!
//! ## Responsabilità:
//! - Definisce il trait `Minifier`: testo + opzioni → testo, fallibile
//! - Implementa `HtmlMinifier` sopra il crate `minify-html`
//! - Traduce le opzioni in stile html-minifier nella `Cfg` di `minify-html`
//!
//! ## Opzioni riconosciute
//!
//! | Opzione | Effetto su `Cfg` |
//! |---------|------------------|
//! | `removeComments` | `keep_comments = !v` |
//! | `minifyCSS` | `minify_css = v` |
//! | `minifyJS` | `minify_js = v` |
//! | `useShortDoctype` | `do_not_minify_doctype = !v` |
//! | `removeRedundantAttributes` | `keep_input_type_text_attr = !v` |
//! | `removeAttributeQuotes` | `ensure_spec_compliant_unquoted_attribute_values = !v` |
//! | `removeOptionalTags` | `keep_closing_tags`, `keep_html_and_head_opening_tags = !v` |
//! | `removeProcessingInstructions` | `remove_processing_instructions = v` |
//! | `keepSsiComments` | `keep_ssi_comments = v` |
//! | `preserveBraceTemplateSyntax` | `preserve_brace_template_syntax = v` |
//!
//! Un'opzione assente vale `false`, come in html-minifier. Le altre opzioni
//! (es. `collapseWhitespace`, sempre attivo in `minify-html`) vengono ignorate.
//!
//! ## Attenzione: `minifyJS`
//! Il minifier JS di `minify-html` non preserva sempre la semantica degli
//! script inline: un getter può sparire da un object literal e una
//! `function` può diventare arrow function (cambia `this`). È attivo nei
//! default; per script che dipendono da questi dettagli impostare
//! `"minifyJS": false` nel file di opzioni.
//!
//! ## Errori:
//! - Valore non booleano per un'opzione riconosciuta → `MinifyError::InvalidOption`
//! - Output non UTF-8 → `MinifyError::InvalidUtf8Output`
//!
//! ## Esempio:
//! ```ignore
//! let minifier = HtmlMinifier::new();
//! let html = minifier.minify("<p>  hello  </p>", &BuildOptions::default())?;
//! ```

use crate::error::MinifyError;
use crate::options::BuildOptions;
use minify_html::Cfg;
use serde_json::Value;
use tracing::debug;

/// Opaque markup transformation: text in, text out
pub trait Minifier {
    fn minify(&self, html: &str, options: &BuildOptions) -> Result<String, MinifyError>;
}

/// `minify-html` backed minifier
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMinifier;

impl HtmlMinifier {
    pub fn new() -> Self {
        Self
    }

    /// Build the `minify-html` configuration for a set of options
    pub fn cfg_from_options(options: &BuildOptions) -> Result<Cfg, MinifyError> {
        let mut cfg = Cfg::new();

        cfg.keep_comments = !flag(options, "removeComments")?;
        cfg.minify_css = flag(options, "minifyCSS")?;
        cfg.minify_js = flag(options, "minifyJS")?;
        cfg.do_not_minify_doctype = !flag(options, "useShortDoctype")?;
        cfg.keep_input_type_text_attr = !flag(options, "removeRedundantAttributes")?;
        cfg.ensure_spec_compliant_unquoted_attribute_values =
            !flag(options, "removeAttributeQuotes")?;

        let keep_optional_tags = !flag(options, "removeOptionalTags")?;
        cfg.keep_closing_tags = keep_optional_tags;
        cfg.keep_html_and_head_opening_tags = keep_optional_tags;

        cfg.remove_processing_instructions = flag(options, "removeProcessingInstructions")?;
        cfg.keep_ssi_comments = flag(options, "keepSsiComments")?;
        cfg.preserve_brace_template_syntax = flag(options, "preserveBraceTemplateSyntax")?;

        Ok(cfg)
    }
}

impl Minifier for HtmlMinifier {
    fn minify(&self, html: &str, options: &BuildOptions) -> Result<String, MinifyError> {
        let cfg = Self::cfg_from_options(options)?;
        let minified = minify_html::minify(html.as_bytes(), &cfg);
        debug!("minify-html: {} -> {} bytes", html.len(), minified.len());
        Ok(String::from_utf8(minified)?)
    }
}

/// Boolean option, `false` when absent
fn flag(options: &BuildOptions, name: &str) -> Result<bool, MinifyError> {
    match options.get(name) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(MinifyError::InvalidOption {
            name: name.to_string(),
            expected: "boolean",
        }),
    }
}
