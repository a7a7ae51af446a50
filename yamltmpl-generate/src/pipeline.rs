//! Generation pipeline shared by the CLI and library callers.
//!
//! Contexts are loaded in full before anything renders. Rendering then walks
//! them in order and applies the write policy to each artifact as soon as it
//! is produced; the first error aborts the rest of the run.

use std::io::Write;
use std::path::{Path, PathBuf};

use yamltmpl_core::{loader, ContextRecord, ListingOrder};
use yamltmpl_renderer::{template_base_name, EngineConfig, TemplateEngine};

use crate::error::{io_err, GenerateError};
use crate::writer::{self, WriteOutcome, WritePolicy};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Where rendered files go and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    /// Appended verbatim, so it carries its own dot (`.ts`).
    pub extension: String,
    pub prefix: String,
}

impl OutputTarget {
    /// `<dir>/<prefix><base_name><extension>`
    pub fn path_for(&self, base_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.prefix, base_name, self.extension))
    }
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub template: PathBuf,
    pub context_dir: PathBuf,
    pub target: OutputTarget,
    pub policy: WritePolicy,
    /// Render once against all contexts instead of once per context.
    pub unified: bool,
    pub order: ListingOrder,
    pub escape_html: bool,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `engine` once per context and write one file per context.
pub fn render_each<W: Write>(
    engine: &TemplateEngine,
    contexts: &[ContextRecord],
    target: &OutputTarget,
    policy: WritePolicy,
    stdout: &mut W,
) -> Result<Vec<WriteOutcome>, GenerateError> {
    let mut outcomes = Vec::with_capacity(contexts.len());
    for record in contexts {
        let data = engine.render_record(record)?;
        let path = target.path_for(&record.file_name());
        outcomes.push(writer::apply(stdout, &path, &data, policy)?);
    }
    Ok(outcomes)
}

/// Render `engine` once against every context and write a single file named
/// after the template.
pub fn render_unified<W: Write>(
    engine: &TemplateEngine,
    contexts: &[ContextRecord],
    target: &OutputTarget,
    policy: WritePolicy,
    stdout: &mut W,
) -> Result<Vec<WriteOutcome>, GenerateError> {
    let data = engine.render_unified(contexts)?;
    let path = target.path_for(engine.name());
    Ok(vec![writer::apply(stdout, &path, &data, policy)?])
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Load `options.context_dir`, compile `options.template` and render.
///
/// Outside dry-run mode the output directory is created if missing.
pub fn run<W: Write>(
    options: &GenerateOptions,
    stdout: &mut W,
) -> Result<Vec<WriteOutcome>, GenerateError> {
    let contexts = loader::load_ordered(&options.context_dir, options.order)?;
    let engine = compile(&options.template, options.escape_html)?;

    if !options.policy.dry_run {
        let dir = &options.target.dir;
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }

    tracing::debug!(
        "rendering {} context(s) with '{}' (unified: {})",
        contexts.len(),
        engine.name(),
        options.unified
    );
    if options.unified {
        render_unified(&engine, &contexts, &options.target, options.policy, stdout)
    } else {
        render_each(&engine, &contexts, &options.target, options.policy, stdout)
    }
}

fn compile(template: &Path, escape_html: bool) -> Result<TemplateEngine, GenerateError> {
    let source = std::fs::read_to_string(template).map_err(|e| io_err(template, e))?;
    let config = EngineConfig {
        escape_html,
        ..EngineConfig::default()
    };
    Ok(TemplateEngine::new(
        &template_base_name(template),
        &source,
        &config,
    )?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn record(name: &str, doc: Value) -> ContextRecord {
        match doc {
            Value::Object(map) => ContextRecord::merge(name, map),
            _ => ContextRecord::named(name),
        }
    }

    fn target(dir: &Path, extension: &str, prefix: &str) -> OutputTarget {
        OutputTarget {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
            prefix: prefix.to_string(),
        }
    }

    fn engine(name: &str, source: &str) -> TemplateEngine {
        TemplateEngine::new(name, source, &EngineConfig::default()).unwrap()
    }

    const OVERWRITE: WritePolicy = WritePolicy {
        dry_run: false,
        overwrite: true,
    };

    #[test]
    fn path_for_joins_prefix_name_and_extension() {
        let t = target(Path::new("/out"), ".ts", "I");
        assert_eq!(t.path_for("user"), PathBuf::from("/out/Iuser.ts"));
    }

    #[test]
    fn render_each_writes_one_file_per_context() {
        let out = TempDir::new().unwrap();
        let contexts = vec![
            record("alpha", json!({ "name": "Alpha" })),
            record("beta", json!({ "name": "Beta" })),
        ];
        let e = engine("greet", "Hello {{name}} ({{fileName}})");
        let mut sink = Vec::new();

        let outcomes =
            render_each(&e, &contexts, &target(out.path(), ".txt", ""), OVERWRITE, &mut sink)
                .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            fs::read_to_string(out.path().join("alpha.txt")).unwrap(),
            "Hello Alpha (alpha)"
        );
        assert_eq!(
            fs::read_to_string(out.path().join("beta.txt")).unwrap(),
            "Hello Beta (beta)"
        );
        assert!(sink.is_empty(), "nothing printed outside dry-run");
    }

    #[test]
    fn render_unified_writes_single_file_named_after_template() {
        let out = TempDir::new().unwrap();
        let contexts = vec![record("a", json!({ "v": 1 })), record("b", json!({ "v": 2 }))];
        let e = engine(
            &template_base_name(Path::new("report.tmpl")),
            "{{fileName}}:{{#each contexts}}{{v}}{{/each}}",
        );
        let mut sink = Vec::new();

        let outcomes =
            render_unified(&e, &contexts, &target(out.path(), ".md", ""), OVERWRITE, &mut sink)
                .unwrap();

        let expected = out.path().join("report.md");
        assert_eq!(outcomes, vec![WriteOutcome::Written { path: expected.clone() }]);
        assert_eq!(fs::read_to_string(&expected).unwrap(), "report:12");
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
    }

    #[test]
    fn prefix_applies_in_unified_mode() {
        let out = TempDir::new().unwrap();
        let e = engine("index", "{{#each contexts}}{{fileName}};{{/each}}");
        let contexts = vec![ContextRecord::named("x")];
        let mut sink = Vec::new();

        render_unified(&e, &contexts, &target(out.path(), ".ts", "gen_"), OVERWRITE, &mut sink)
            .unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("gen_index.ts")).unwrap(),
            "x;"
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let out = TempDir::new().unwrap();
        let contexts = vec![record("alpha", json!({ "name": "Alpha" }))];
        let e = engine("greet", "Hi {{name}}");
        let policy = WritePolicy {
            dry_run: true,
            overwrite: true,
        };
        let mut sink = Vec::new();

        let outcomes =
            render_each(&e, &contexts, &target(out.path(), ".txt", ""), policy, &mut sink)
                .unwrap();

        assert!(matches!(outcomes[0], WriteOutcome::DryRun { .. }));
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
        let printed = String::from_utf8(sink).unwrap();
        assert!(printed.contains("going to write"));
        assert!(printed.contains("alpha.txt"));
        assert!(printed.contains("Hi Alpha"));
    }

    #[test]
    fn existing_outputs_survive_without_overwrite() {
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("alpha.txt"), "hand-edited").unwrap();
        let contexts = vec![
            record("alpha", json!({ "name": "Alpha" })),
            record("beta", json!({ "name": "Beta" })),
        ];
        let e = engine("greet", "Hi {{name}}");
        let mut sink = Vec::new();

        let outcomes = render_each(
            &e,
            &contexts,
            &target(out.path(), ".txt", ""),
            WritePolicy::default(),
            &mut sink,
        )
        .unwrap();

        assert!(matches!(outcomes[0], WriteOutcome::Skipped { .. }));
        assert!(matches!(outcomes[1], WriteOutcome::Written { .. }));
        assert_eq!(
            fs::read_to_string(out.path().join("alpha.txt")).unwrap(),
            "hand-edited"
        );
        assert_eq!(fs::read_to_string(out.path().join("beta.txt")).unwrap(), "Hi Beta");
    }

    #[test]
    fn render_failure_aborts_remaining_contexts() {
        let out = TempDir::new().unwrap();
        let contexts = vec![
            record("first", json!({ "n": "1" })),
            record("second", json!({ "n": "oops" })),
            record("third", json!({ "n": "3" })),
        ];
        let e = engine("count", "{{increments n}}");
        let mut sink = Vec::new();

        let err = render_each(&e, &contexts, &target(out.path(), ".txt", ""), OVERWRITE, &mut sink)
            .unwrap_err();

        assert!(matches!(err, GenerateError::Render(_)), "got: {err}");
        assert_eq!(fs::read_to_string(out.path().join("first.txt")).unwrap(), "2");
        assert!(!out.path().join("second.txt").exists());
        assert!(!out.path().join("third.txt").exists());
    }

    #[test]
    fn run_creates_output_directory_and_renders() {
        let ctx = TempDir::new().unwrap();
        fs::write(ctx.path().join("alpha.yaml"), "name: Alpha\n").unwrap();
        let work = TempDir::new().unwrap();
        let template = work.path().join("greet.hbs");
        fs::write(&template, "Hello {{name}} ({{fileName}})").unwrap();
        let out_dir = work.path().join("out").join("nested");

        let options = GenerateOptions {
            template,
            context_dir: ctx.path().to_path_buf(),
            target: target(&out_dir, ".txt", ""),
            policy: OVERWRITE,
            unified: false,
            order: ListingOrder::Directory,
            escape_html: true,
        };
        let mut sink = Vec::new();
        let outcomes = run(&options, &mut sink).unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(
            fs::read_to_string(out_dir.join("alpha.txt")).unwrap(),
            "Hello Alpha (alpha)"
        );
    }

    #[test]
    fn run_dry_run_does_not_create_output_directory() {
        let ctx = TempDir::new().unwrap();
        fs::write(ctx.path().join("alpha.yaml"), "name: Alpha\n").unwrap();
        let work = TempDir::new().unwrap();
        let template = work.path().join("greet.hbs");
        fs::write(&template, "Hello {{name}}").unwrap();
        let out_dir = work.path().join("out");

        let options = GenerateOptions {
            template,
            context_dir: ctx.path().to_path_buf(),
            target: target(&out_dir, ".txt", ""),
            policy: WritePolicy {
                dry_run: true,
                overwrite: false,
            },
            unified: false,
            order: ListingOrder::Directory,
            escape_html: true,
        };
        let mut sink = Vec::new();
        run(&options, &mut sink).unwrap();

        assert!(!out_dir.exists(), "dry-run must not create the output directory");
    }

    #[test]
    fn run_reports_missing_template_path() {
        let ctx = TempDir::new().unwrap();
        let options = GenerateOptions {
            template: ctx.path().join("missing.hbs"),
            context_dir: ctx.path().to_path_buf(),
            target: target(ctx.path(), ".txt", ""),
            policy: WritePolicy::default(),
            unified: false,
            order: ListingOrder::Directory,
            escape_html: true,
        };
        let mut sink = Vec::new();

        let err = run(&options, &mut sink).unwrap_err();
        assert!(matches!(err, GenerateError::Io { .. }), "got: {err}");
        assert!(err.to_string().contains("missing.hbs"));
    }
}
