//! Template rendering engine with Tera.
//!
//! [`TemplateRenderer`] wraps Tera with the generator's own delimiter
//! [`Syntax`], the custom filters from [`filters`], and passthrough handling
//! for the chart runtime's `{{ … }}` expressions.
//!
//! Rendering one template is three steps:
//! 1. [`syntax::translate`] rewrites generator spans into Tera spans and
//!    replaces every downstream span with a placeholder
//! 2. Tera renders the result against the model
//! 3. [`syntax::restore`] puts the downstream spans back, byte for byte
//!
//! # Examples
//!
//! ```rust,no_run
//! use kube_chartgen::templating::{Syntax, TemplateRenderer};
//!
//! let mut renderer = TemplateRenderer::new(Syntax::GENERATOR)?;
//! let mut context = tera::Context::new();
//! context.insert("suffix", "cluster");
//! let out = renderer.render("role.yaml", "name: {{ .Release.Name }}-[[ suffix ]]", &context)?;
//! assert_eq!(out, "name: {{ .Release.Name }}-cluster");
//! # Ok::<(), kube_chartgen::core::ChartError>(())
//! ```

pub mod filters;
pub mod syntax;

use serde::Serialize;
use tera::{Context as TeraContext, Tera};

pub use filters::indent;
pub use syntax::{Delimiters, RUNTIME_RESERVED, Syntax};

use crate::core::ChartError;

/// Template renderer with the Tera engine and chart-specific filters.
pub struct TemplateRenderer {
    syntax: Syntax,
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer for templates written in `syntax`.
    ///
    /// # Errors
    ///
    /// [`ChartError::DelimiterConflict`] when `syntax` shares a character with
    /// the chart runtime's delimiters, which would make passthrough ambiguous.
    pub fn new(syntax: Syntax) -> Result<Self, ChartError> {
        syntax.check_disjoint(RUNTIME_RESERVED)?;

        let mut tera = Tera::default();
        // Output is YAML and plain text; nothing is ever HTML-escaped.
        tera.autoescape_on(vec![]);
        tera.register_filter("reindent", filters::reindent_filter);

        Ok(Self {
            syntax,
            tera,
        })
    }

    /// Build a Tera context from any serializable value with named fields.
    pub fn context<T: Serialize>(value: &T) -> Result<TeraContext, ChartError> {
        TeraContext::from_serialize(value)
            .map_err(|e| ChartError::template("template context", describe_tera_error(&e)))
    }

    /// Render `source`, reporting failures against `name`.
    pub fn render(&mut self, name: &str, source: &str, context: &TeraContext) -> Result<String, ChartError> {
        let translated =
            syntax::translate(source, &self.syntax).map_err(|message| ChartError::template(name, message))?;
        tracing::trace!(template = name, passthrough = translated.passthrough.len(), "translated template");

        let rendered = self
            .tera
            .render_str(&translated.source, context)
            .map_err(|e| ChartError::template(name, describe_tera_error(&e)))?;

        Ok(syntax::restore(&rendered, &translated.passthrough))
    }
}

/// Flatten a Tera error and its causes into one line, hiding Tera's
/// internal name for one-off templates.
fn describe_tera_error(error: &tera::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts
        .join(": ")
        .replace("Failed to render '__tera_one_off'", "render failed")
        .replace("Failed to parse '__tera_one_off'", "syntax error")
        .replace("'__tera_one_off'", "template")
}
