//! Generated header validator.
//!
//! Compares headers on disk against a fresh rendering. A header whose banner
//! records a different bound than the one the caller expects is reported
//! separately, since consumers sized for one bound silently miss tokens
//! generated for another.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::emit::{render, BOUND_MARKER};
use crate::op::Operation;
use crate::report::{Check, CheckResult, VerifyReport};
use crate::table::Bound;

/// Extracts the bound recorded in a header banner.
pub fn read_bound(text: &str) -> Option<Bound> {
    text.lines()
        .take_while(|line| line.trim_end() != "*/")
        .find_map(|line| line.strip_prefix(BOUND_MARKER))
        .and_then(|n| n.trim().parse().ok())
        .map(Bound)
}

/// Checks one header against `operation` over `[0, bound]`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn verify_header(operation: Operation, bound: Bound, path: &Path) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();

    let on_disk = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            report.push(CheckResult::failed(
                operation,
                Check::Present,
                format!("Header not found: {}", path.display()),
            ));
            return Ok(report);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read header: {}", path.display()))
        }
    };

    match read_bound(&on_disk) {
        Some(found) if found == bound => {
            report.push(CheckResult::passed(
                operation,
                Check::Bound,
                format!("{} records bound {found}", operation.file_name()),
            ));
        }
        Some(found) => {
            report.push(CheckResult::failed(
                operation,
                Check::Bound,
                format!(
                    "{} was generated for bound {found}, expected {bound}",
                    operation.file_name()
                ),
            ));
            return Ok(report);
        }
        None => {
            report.push(CheckResult::failed(
                operation,
                Check::Bound,
                format!("{} has no bound in its banner", operation.file_name()),
            ));
            return Ok(report);
        }
    }

    let expected = render(operation, bound)
        .with_context(|| format!("Failed to render {}", operation.file_name()))?;
    match first_difference(&expected, &on_disk) {
        None => report.push(CheckResult::passed(
            operation,
            Check::Content,
            format!("{} is up to date", operation.file_name()),
        )),
        Some(line) => report.push(
            CheckResult::failed(
                operation,
                Check::Content,
                format!(
                    "{} is stale; rerun {}",
                    operation.file_name(),
                    operation.generator_name()
                ),
            )
            .with_detail(format!("first difference at line {line}")),
        ),
    }

    Ok(report)
}

/// Checks every operation's header in `dir`.
///
/// # Errors
///
/// Returns an error if an existing header cannot be read.
pub fn verify_all(dir: &Path, bound: Bound) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();
    for operation in Operation::ALL {
        report.merge(verify_header(
            operation,
            bound,
            &dir.join(operation.file_name()),
        )?);
    }
    Ok(report)
}

/// One-based line number of the first difference, if any.
fn first_difference(expected: &str, actual: &str) -> Option<usize> {
    if expected == actual {
        return None;
    }
    let mut exp = expected.split('\n');
    let mut act = actual.split('\n');
    let mut line = 1;
    loop {
        match (exp.next(), act.next()) {
            (Some(x), Some(y)) if x == y => line += 1,
            _ => return Some(line),
        }
    }
}
