//! Error types for yamltmpl-generate.

use std::path::PathBuf;

use thiserror::Error;

use yamltmpl_core::LoadError;
use yamltmpl_renderer::RenderError;

/// All errors that can arise from a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Loading the context directory failed.
    #[error("context error: {0}")]
    Load(#[from] LoadError),

    /// Compiling or evaluating the template failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`GenerateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
