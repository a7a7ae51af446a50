//! `yamltmpl`: render every context document through one template.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use yamltmpl_core::ListingOrder;
use yamltmpl_generate::{pipeline, GenerateOptions, OutputTarget, WriteOutcome, WritePolicy};

/// Arguments for a generation run.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Handlebars template file.
    #[arg(long, value_name = "PATH")]
    pub template: PathBuf,

    /// Directory of YAML context documents, one per output.
    #[arg(long, value_name = "DIR")]
    pub context_path: PathBuf,

    /// Output directory (created if missing).
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,

    /// Output file extension including the dot, e.g. `.ts`.
    #[arg(long, value_name = "EXT")]
    pub extension: String,

    /// String prepended to every output file name.
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Print what would be written instead of writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Replace output files that already exist.
    #[arg(long)]
    pub overwrite: bool,

    /// Render once against all contexts into a single file named after the template.
    #[arg(long)]
    pub unified: bool,

    /// Process context files sorted by name instead of directory order.
    #[arg(long)]
    pub sorted: bool,

    /// Do not HTML-escape `{{expr}}` output.
    #[arg(long)]
    pub no_escape: bool,
}

impl GenerateArgs {
    pub fn into_options(self) -> GenerateOptions {
        GenerateOptions {
            template: self.template,
            context_dir: self.context_path,
            target: OutputTarget {
                dir: self.out,
                extension: self.extension,
                prefix: self.prefix,
            },
            policy: WritePolicy {
                dry_run: self.dry_run,
                overwrite: self.overwrite,
            },
            unified: self.unified,
            order: if self.sorted {
                ListingOrder::FileName
            } else {
                ListingOrder::Directory
            },
            escape_html: !self.no_escape,
        }
    }

    pub fn run(self) -> Result<()> {
        let options = self.into_options();
        tracing::debug!("options: {options:?}");
        let outcomes = {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            let outcomes = pipeline::run(&options, &mut lock).with_context(|| {
                format!(
                    "failed to render '{}' with contexts from '{}'",
                    options.template.display(),
                    options.context_dir.display()
                )
            })?;
            lock.flush().context("failed to flush stdout")?;
            outcomes
        };

        // Dry-run stdout holds only notices and rendered content.
        if !options.policy.dry_run {
            print_results(&outcomes);
        }
        Ok(())
    }
}

fn print_results(outcomes: &[WriteOutcome]) {
    let written = outcomes
        .iter()
        .filter(|r| matches!(r, WriteOutcome::Written { .. }))
        .count();
    let skipped = outcomes
        .iter()
        .filter(|r| matches!(r, WriteOutcome::Skipped { .. }))
        .count();

    if outcomes.is_empty() {
        println!("✓ nothing to do: no contexts found");
        return;
    }

    println!("✓ generated ({written} written, {skipped} skipped)");
    for r in outcomes {
        match r {
            WriteOutcome::Written { path } => println!("  ✎  {}", path.display()),
            WriteOutcome::Skipped { path } => println!("  ·  {} (exists, skipped)", path.display()),
            WriteOutcome::DryRun { path } => println!("  ~  {}", path.display()),
        }
    }
}
