//! Write policy for rendered output.
//!
//! ## `apply` decision order
//!
//! 1. Dry run: print a notice and the content to `stdout`, touch nothing.
//! 2. Target exists and overwrite is off: warn and skip.
//! 3. Otherwise write the content straight to the target, replacing it.
//!
//! The write in step 3 is direct, not write-temp-then-rename.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{io_err, GenerateError};

// ---------------------------------------------------------------------------
// Policy and outcome
// ---------------------------------------------------------------------------

/// How rendered content reaches the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WritePolicy {
    /// Print instead of writing.
    pub dry_run: bool,
    /// Replace files that already exist.
    pub overwrite: bool,
}

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was created or replaced.
    Written { path: PathBuf },
    /// File already existed and overwrite is off; left untouched.
    Skipped { path: PathBuf },
    /// `--dry-run` mode: the content was printed instead.
    DryRun { path: PathBuf },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written { path }
            | WriteOutcome::Skipped { path }
            | WriteOutcome::DryRun { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Apply `policy` to one rendered artifact.
///
/// `stdout` receives the dry-run notice and content; it is unused otherwise.
pub fn apply<W: Write>(
    stdout: &mut W,
    path: &Path,
    content: &str,
    policy: WritePolicy,
) -> Result<WriteOutcome, GenerateError> {
    if policy.dry_run {
        print_dry_run(stdout, path, content).map_err(|e| io_err("<stdout>", e))?;
        tracing::debug!("[dry-run] printed: {}", path.display());
        return Ok(WriteOutcome::DryRun {
            path: path.to_path_buf(),
        });
    }

    if !policy.overwrite && path.exists() {
        tracing::warn!(
            "{} already exists; skipping (pass --overwrite to replace it)",
            path.display()
        );
        return Ok(WriteOutcome::Skipped {
            path: path.to_path_buf(),
        });
    }

    std::fs::write(path, content).map_err(|e| io_err(path, e))?;
    tracing::info!("wrote: {}", path.display());
    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
    })
}

fn print_dry_run<W: Write>(stdout: &mut W, path: &Path, content: &str) -> std::io::Result<()> {
    writeln!(stdout, "going to write {}", path.display())?;
    stdout.write_all(content.as_bytes())?;
    if !content.is_empty() && !content.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
