//! Error types for yamltmpl-renderer.

use thiserror::Error;

/// All errors that can arise from template compilation and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template source is not valid Handlebars.
    #[error("template '{name}' failed to compile: {source}")]
    Compile {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// Evaluation failed: missing partial, failing helper, bad block params.
    #[error("template '{name}' failed to render '{context}': {source}")]
    Evaluate {
        name: String,
        context: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}
