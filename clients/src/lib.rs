//! Shared plumbing for the client binaries.
//!
//! Paths are compiled in relative to this crate's own directory, so the
//! binaries write to the same place no matter where they are run from.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use xmacro_codegen::{Operation, DEFAULT_BOUND};

/// Directory the generated headers live in.
pub fn include_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("include")
        .join("Preprocessor")
}

/// Options profile handed to the source formatter.
pub fn astyle_options() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("style")
        .join("astyle_options")
}

/// Installs the fmt subscriber, honoring `RUST_LOG` and defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Regenerates one header into [`include_dir`] with the compiled-in bound.
///
/// # Errors
///
/// Returns an error if the header cannot be written.
pub fn generate_header(operation: Operation) -> Result<()> {
    let report = xmacro_codegen::generate(operation, DEFAULT_BOUND, &include_dir())?;
    tracing::debug!(path = %report.path.display(), "header written");
    Ok(())
}
