//! Domain types for loaded contexts.
//!
//! A context is an open-ended key/value bag: whatever the source document
//! holds, plus the reserved `fileName` key. Values are kept as
//! [`serde_json::Value`] so the template engine can walk arbitrary nesting,
//! and maps preserve document key order.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Reserved key holding the base name of the source document.
pub const FILE_NAME_KEY: &str = "fileName";

// ---------------------------------------------------------------------------
// ContextRecord
// ---------------------------------------------------------------------------

/// One parsed document merged with its derived `fileName`.
///
/// Serializes transparently as the underlying mapping, so templates see
/// `{{fileName}}` next to the document's own keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContextRecord(Map<String, Value>);

impl ContextRecord {
    /// A record holding only the derived `fileName`.
    pub fn named(base_name: &str) -> Self {
        let mut map = Map::new();
        map.insert(FILE_NAME_KEY.to_owned(), Value::String(base_name.to_owned()));
        Self(map)
    }

    /// Merge `document` over a record named `base_name`.
    ///
    /// The derived name goes in first, so a document that defines its own
    /// `fileName` overwrites it.
    pub fn merge(base_name: &str, document: Map<String, Value>) -> Self {
        let mut record = Self::named(base_name);
        for (key, value) in document {
            record.0.insert(key, value);
        }
        record
    }

    /// Text used to name this record's output file.
    ///
    /// Strings are used verbatim. A document that overrode `fileName` with a
    /// non-string value gets that value's JSON text.
    pub fn file_name(&self) -> Cow<'_, str> {
        match self.0.get(FILE_NAME_KEY) {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
            None => Cow::Borrowed(""),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ContextRecord> for Value {
    fn from(record: ContextRecord) -> Self {
        Value::Object(record.0)
    }
}

impl fmt::Display for ContextRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// All records of one run, in load order.
pub type ContextCollection = Vec<ContextRecord>;

// ---------------------------------------------------------------------------
// ListingOrder
// ---------------------------------------------------------------------------

/// Iteration order of the context directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingOrder {
    /// Whatever order the platform's directory listing yields.
    #[default]
    Directory,
    /// Byte-wise ascending by file name.
    FileName,
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Strip the final `.`-delimited suffix from a file name.
///
/// `user.profile.yaml` becomes `user.profile`; a name without a `.` is
/// returned unchanged.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => file_name,
    }
}
