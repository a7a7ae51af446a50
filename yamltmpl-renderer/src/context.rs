//! Unified rendering payload and template naming.

use std::path::Path;

use serde::Serialize;

use yamltmpl_core::{base_name, ContextRecord};

/// File suffixes recognised as "this is a template" and stripped from the
/// template's file name to get its base name.
pub const TEMPLATE_SUFFIXES: &[&str] = &[".handlebars", ".hbs", ".mustache", ".tmpl", ".tpl"];

/// Payload for unified mode: every context under one key.
///
/// Templates see `{{fileName}}` (the template's base name) and iterate
/// `{{#each contexts}}`.
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedContext<'a> {
    #[serde(rename = "fileName")]
    pub file_name: &'a str,
    pub contexts: &'a [ContextRecord],
}

impl<'a> UnifiedContext<'a> {
    pub fn new(file_name: &'a str, contexts: &'a [ContextRecord]) -> Self {
        UnifiedContext { file_name, contexts }
    }
}

/// Base name of a template file.
///
/// A known template suffix is stripped (`report.tmpl` → `report`,
/// `model.ts.hbs` → `model.ts`); any other name loses its final extension.
pub fn template_base_name(template_path: &Path) -> String {
    let file_name = template_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    for suffix in TEMPLATE_SUFFIXES {
        if let Some(stem) = file_name.strip_suffix(suffix) {
            if !stem.is_empty() {
                return stem.to_owned();
            }
        }
    }
    base_name(&file_name).to_owned()
}
