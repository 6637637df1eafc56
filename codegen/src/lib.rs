//! Preprocessor arithmetic table generator.
//!
//! Writes C headers that let the preprocessor add and compare small integers.
//! For every operand pair in `[0, N]` a header defines one token whose
//! replacement text is the precomputed result, plus a lookup macro that
//! pastes its arguments onto the token prefix:
//!
//! ```text
//! #define RP_ADD(v1__,v2__)  i_ADD_##v1__##_##v2__
//! #define i_ADD_3_1   4
//! ```
//!
//! The three operations share one enumeration ([`table::generate`]) and one
//! emitter ([`emit::emit`]); [`op::Operation`] carries the differences.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod emit;
pub mod op;
pub mod report;
pub mod table;
pub mod verify;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

pub use op::{Operation, Sweep};
pub use report::{Check, CheckResult, Severity, VerifyReport};
pub use table::{Bound, Entry, DEFAULT_BOUND};

/// Report of what was generated for one header.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Operation the header implements.
    pub operation: Operation,
    /// Bound the table covers.
    pub bound: Bound,
    /// File written.
    pub path: PathBuf,
    /// Number of token definitions.
    pub entry_count: usize,
    /// Number of outer-operand groups.
    pub group_count: usize,
}

/// Generates the header for `operation` into `out_dir`.
///
/// # Errors
///
/// Returns an error if the header file cannot be opened or written.
pub fn generate(operation: Operation, bound: Bound, out_dir: &Path) -> Result<GenerationReport> {
    let path = out_dir.join(operation.file_name());
    info!("Generating {} ...", operation.file_name());

    let stats = emit::write_header(operation, bound, &path)?;

    info!(
        entries = stats.entries,
        groups = stats.groups,
        "{} has been generated!",
        operation.file_name()
    );
    Ok(GenerationReport {
        operation,
        bound,
        path,
        entry_count: stats.entries,
        group_count: stats.groups,
    })
}

/// Generates all three headers into `out_dir`.
///
/// # Errors
///
/// Returns the first error encountered. Headers generated before the failure
/// are left in place.
pub fn generate_all(bound: Bound, out_dir: &Path) -> Result<Vec<GenerationReport>> {
    Operation::ALL
        .into_iter()
        .map(|operation| generate(operation, bound, out_dir))
        .collect()
}
