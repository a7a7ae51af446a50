//! yamltmpl: render a directory of YAML documents through one Handlebars template.
//!
//! # Usage
//!
//! ```text
//! yamltmpl --template <PATH> --context-path <DIR> --out <DIR> --extension <EXT>
//!          [--prefix <STR>] [--dry-run] [--overwrite] [--unified] [--sorted] [--no-escape]
//! ```
//!
//! Example:
//!
//! ```text
//! yamltmpl --template model.ts.hbs --context-path models --out src/models --extension .ts
//! ```

mod commands;

use anyhow::Result;
use clap::Parser;

use commands::generate::GenerateArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "yamltmpl",
    version,
    about = "Render YAML context documents through a Handlebars template",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    cli.args.run()
}

/// Log to stderr; stdout is reserved for dry-run output and the summary.
fn init_tracing() {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
