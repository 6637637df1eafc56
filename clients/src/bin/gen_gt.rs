//! `gen-xmacro-gt` — Generates `rf_xmacro_gt.h`, the greater-than token table.
//!
//! Takes no configuration: the bound and the output directory are compiled
//! in.
//!
//! **Usage:**
//! ```
//! gen-xmacro-gt
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::Result;
use clap::Parser;
use xmacro_codegen::Operation;

/// Generate the preprocessor greater-than header.
#[derive(Parser)]
#[command(
    name = "gen-xmacro-gt",
    version,
    about = "Generate the preprocessor greater-than token header"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();
    xmacro_clients::init_logging();
    xmacro_clients::generate_header(Operation::GreaterThan)
}
