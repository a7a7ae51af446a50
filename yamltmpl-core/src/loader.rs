//! Context directory loader.
//!
//! Every entry of the directory is one YAML document; merge keys (`<<`) are
//! resolved before the document becomes a record. Listing is
//! non-recursive and nothing is filtered: a subdirectory surfaces as a
//! [`LoadError::Io`] when its "content" is read.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{io_err, LoadError};
use crate::types::{base_name, ContextCollection, ContextRecord, ListingOrder};

/// Load every document in `dir`, in directory listing order.
pub fn load(dir: &Path) -> Result<ContextCollection, LoadError> {
    load_ordered(dir, ListingOrder::Directory)
}

/// Load every document in `dir`, iterating in the requested `order`.
///
/// All files are read before this returns; the first failure aborts the load.
pub fn load_ordered(dir: &Path, order: ListingOrder) -> Result<ContextCollection, LoadError> {
    let mut paths = list_entries(dir)?;
    if order == ListingOrder::FileName {
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    let mut contexts = Vec::with_capacity(paths.len());
    for path in paths {
        contexts.push(load_document(&path)?);
    }
    tracing::debug!("loaded {} context(s) from {}", contexts.len(), dir.display());
    Ok(contexts)
}

/// Parse a single document and merge its derived `fileName`.
///
/// An empty document yields a record holding only `fileName`.
pub fn load_document(path: &Path) -> Result<ContextRecord, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = base_name(&file_name);

    let record = match parse_document(path, &contents)? {
        Value::Null => ContextRecord::named(name),
        Value::Object(map) => ContextRecord::merge(name, map),
        _ => {
            return Err(LoadError::NotAMapping {
                path: path.to_path_buf(),
            })
        }
    };
    tracing::debug!("loaded context '{}' from {}", record, path.display());
    Ok(record)
}

fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        paths.push(entry.path());
    }
    Ok(paths)
}

fn parse_document(path: &Path, contents: &str) -> Result<Value, LoadError> {
    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    let parse_err = |source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut document: serde_yaml::Value = serde_yaml::from_str(contents).map_err(parse_err)?;
    document.apply_merge().map_err(parse_err)?;
    serde_json::to_value(document).map_err(|source| LoadError::Convert {
        path: path.to_path_buf(),
        source,
    })
}
