//! # yamltmpl-renderer
//!
//! Handlebars engine that renders loaded contexts through a single template.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use yamltmpl_renderer::{EngineConfig, TemplateEngine};
//!
//! fn render_all(source: &str, dir: &std::path::Path) {
//!     let engine = TemplateEngine::new("model", source, &EngineConfig::default())
//!         .expect("template compiles");
//!     for record in yamltmpl_core::load(dir).expect("contexts load") {
//!         if let Ok(text) = engine.render_record(&record) {
//!             println!("{}: {} bytes", record.file_name(), text.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod helpers;

pub use context::{template_base_name, UnifiedContext};
pub use engine::{EngineConfig, TemplateEngine};
pub use error::RenderError;
pub use helpers::{NamedHelper, BUILTIN_HELPERS};
