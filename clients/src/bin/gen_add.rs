//! `gen-xmacro-add` — Generates `rf_xmacro_add.h`, the addition token table.
//!
//! Takes no configuration: the bound and the output directory are compiled
//! in.
//!
//! **Usage:**
//! ```
//! gen-xmacro-add
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

/// Generate the preprocessor addition header.
#[derive(Parser)]
#[command(
    name = "gen-xmacro-add",
    version,
    about = "Generate the preprocessor addition token header"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();
    xmacro_clients::init_logging();
    xmacro_clients::generate_header(Operation::Add)
}
