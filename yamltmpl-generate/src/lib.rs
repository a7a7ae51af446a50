//! # yamltmpl-generate
//!
//! Render-and-write orchestration.
//!
//! Call [`pipeline::run`] to load a context directory, render every context
//! through one template and write the results, or use [`render_each`] /
//! [`render_unified`] directly with contexts already in memory.

pub mod error;
pub mod pipeline;
pub mod writer;

pub use error::GenerateError;
pub use pipeline::{render_each, render_unified, GenerateOptions, OutputTarget};
pub use writer::{apply, WriteOutcome, WritePolicy};
