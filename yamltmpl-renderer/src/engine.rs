//! Handlebars rendering engine: [`EngineConfig`] and [`TemplateEngine`].
//!
//! An engine owns one compiled template. Compilation happens once in
//! [`TemplateEngine::new`]; every render after that reuses it.

use handlebars::Handlebars;
use serde::Serialize;

use yamltmpl_core::ContextRecord;

use crate::context::UnifiedContext;
use crate::error::RenderError;
use crate::helpers::{self, NamedHelper, BUILTIN_HELPERS};

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Construction-time settings for a [`TemplateEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Helpers registered before the template is compiled.
    pub helpers: &'static [NamedHelper],
    /// HTML-escape `{{expr}}` output. `{{{expr}}}` is never escaped.
    pub escape_html: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            helpers: BUILTIN_HELPERS,
            escape_html: true,
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// A compiled template plus the helper registry it renders with.
///
/// Rendering is lenient: a missing variable renders as empty text.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
    name: String,
}

impl TemplateEngine {
    /// Register `config.helpers` and compile `source` under `name`.
    ///
    /// `name` doubles as the unified-mode `fileName`, so callers pass the
    /// template's base name.
    pub fn new(name: &str, source: &str, config: &EngineConfig) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        if !config.escape_html {
            registry.register_escape_fn(handlebars::no_escape);
        }
        helpers::register_helpers(&mut registry, config.helpers);

        registry
            .register_template_string(name, source)
            .map_err(|e| RenderError::Compile {
                name: name.to_owned(),
                source: Box::new(e),
            })?;
        tracing::debug!("compiled template '{name}'");

        Ok(TemplateEngine {
            registry,
            name: name.to_owned(),
        })
    }

    /// The name the template was compiled under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template against one context record.
    pub fn render_record(&self, record: &ContextRecord) -> Result<String, RenderError> {
        self.render_value(&record.file_name(), record)
    }

    /// Render the template once against all `contexts`.
    ///
    /// The template sees `{ fileName: <engine name>, contexts: [...] }`.
    pub fn render_unified(&self, contexts: &[ContextRecord]) -> Result<String, RenderError> {
        let payload = UnifiedContext::new(&self.name, contexts);
        self.render_value(&self.name, &payload)
    }

    fn render_value<T: Serialize>(&self, label: &str, data: &T) -> Result<String, RenderError> {
        self.registry
            .render(&self.name, data)
            .map_err(|e| RenderError::Evaluate {
                name: self.name.clone(),
                context: label.to_owned(),
                source: Box::new(e),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
