//! Error types for yamltmpl-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a context directory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The directory could not be listed, or an entry could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid YAML; includes file path and line context from serde_yaml.
    #[error("failed to parse context document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A document parsed but holds a value JSON cannot represent (e.g. a mapping used as a key).
    #[error("context document {path} cannot be used as template data: {source}")]
    Convert {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document parsed, but its top level is a sequence or a scalar.
    #[error("context document {path} must hold a mapping at the top level")]
    NotAMapping { path: PathBuf },
}

/// Convenience constructor for [`LoadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.into(),
        source,
    }
}
