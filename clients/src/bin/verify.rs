//! `xmacro-verify` — Checks that the generated headers are current.
//!
//! Each header in the compiled-in include directory must record the
//! compiled-in bound in its banner and match a fresh rendering byte for byte.
//!
//! **Usage:**
//! ```
//! xmacro-verify [--json]
//! ```
//!
//! Exits non-zero if any check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use xmacro_codegen::verify::verify_all;
use xmacro_codegen::DEFAULT_BOUND;

/// Verify the generated preprocessor headers.
#[derive(Parser)]
#[command(
    name = "xmacro-verify",
    version,
    about = "Check the generated preprocessor headers against the generator"
)]
struct Args {
    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    xmacro_clients::init_logging();

    let dir = xmacro_clients::include_dir();
    let report = verify_all(&dir, DEFAULT_BOUND)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize the report")?;
        println!("{json}");
    } else {
        println!("Header verification (bound {DEFAULT_BOUND})");
        println!("==============================");
        for result in &report.results {
            println!("{result}");
        }
        println!();
        println!(
            "{} checks, {} failed",
            report.results.len(),
            report.failure_count()
        );
        for operation in report.needs_regeneration() {
            println!("  rerun {}", operation.generator_name());
        }
    }

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
