//! Header emission helpers.
//!
//! [`HeaderWriter`] is a thin line-oriented wrapper over any [`io::Write`]
//! sink. [`emit`] drives the table iterator through it, writing each entry
//! as it is produced.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::op::Operation;
use crate::table::{generate, Bound};

/// Author recorded in every banner.
pub const AUTHOR: &str = "Lefteris";

/// Prefix of the banner line carrying the bound.
pub const BOUND_MARKER: &str = "** Bound: ";

/// Counts of what one header contains.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitStats {
    /// Number of `#define` lines for table entries.
    pub entries: usize,
    /// Number of outer-operand groups.
    pub groups: usize,
}

/// Line-oriented writer for C header text.
pub struct HeaderWriter<W: Write> {
    out: W,
}

impl<W: Write> HeaderWriter<W> {
    /// Wraps a sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one line followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    pub fn line(&mut self, s: &str) -> io::Result<()> {
        writeln!(self.out, "{s}")
    }

    /// Writes a blank line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Writes a `//!` comment line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    pub fn comment(&mut self, s: &str) -> io::Result<()> {
        writeln!(self.out, "//! {s}")
    }

    /// Writes `#define <name>   <value>`.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    pub fn define(&mut self, name: impl std::fmt::Display, value: u64) -> io::Result<()> {
        writeln!(self.out, "#define {name}   {value}")
    }

    /// Flushes and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns any error raised while flushing.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Writes the full header for `operation` over `[0, bound]` into `out`.
///
/// # Errors
///
/// Returns any error from the sink. Whatever was written before the error
/// stays in the sink.
pub fn emit<W: Write>(operation: Operation, bound: Bound, out: W) -> io::Result<EmitStats> {
    let mut w = HeaderWriter::new(out);
    write_banner(&mut w, operation, bound)?;
    write_lookup_macro(&mut w, operation)?;

    let mut stats = EmitStats::default();
    let mut group: Option<u32> = None;
    for entry in generate(operation, bound) {
        if group != Some(entry.a) {
            if group.is_some() {
                w.blank()?;
            }
            w.comment(&operation.group_comment(entry.a))?;
            group = Some(entry.a);
            stats.groups += 1;
        }
        w.define(entry.symbol(), entry.result)?;
        stats.entries += 1;
    }
    if group.is_some() {
        w.blank()?;
    }

    w.finish()?;
    Ok(stats)
}

/// Renders the header into a string.
///
/// # Errors
///
/// Returns any error [`emit`] reports, or `InvalidData` if the output is not
/// UTF-8.
pub fn render(operation: Operation, bound: Bound) -> io::Result<String> {
    let mut buf = Vec::with_capacity(64 * 1024);
    emit(operation, bound, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Creates or truncates `path` and streams the header into it.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written. The parent
/// directory is not created, and a failed write leaves a truncated file.
pub fn write_header(operation: Operation, bound: Bound, path: &Path) -> Result<EmitStats> {
    let file = File::create(path)
        .with_context(|| format!("Failed to open header for writing: {}", path.display()))?;
    emit(operation, bound, BufWriter::new(file))
        .with_context(|| format!("Failed to write header: {}", path.display()))
}

fn write_banner<W: Write>(
    w: &mut HeaderWriter<W>,
    operation: Operation,
    bound: Bound,
) -> io::Result<()> {
    w.line("/**")?;
    w.line(&format!("** @author {AUTHOR}"))?;
    w.line(&format!("** @date {}", operation.banner_date()))?;
    w.line("**")?;
    w.line(&format!(
        "**This file contains token definition for emulating {} with",
        operation.description()
    ))?;
    w.line(&format!(
        "**the C preprocessor. It is automatically generated by {}",
        operation.generator_name()
    ))?;
    w.line("**")?;
    w.line(&format!("{BOUND_MARKER}{bound}"))?;
    w.line("*/")
}

fn write_lookup_macro<W: Write>(
    w: &mut HeaderWriter<W>,
    operation: Operation,
) -> io::Result<()> {
    let (v1, v2) = operation.macro_params();
    w.comment(&format!(
        "This is the macro from which {} will be achieved",
        operation.description()
    ))?;
    w.line(&format!(
        "#define {}({v1},{v2})  {}_##{v1}##_##{v2}",
        operation.lookup_macro(),
        operation.symbol_prefix()
    ))?;
    w.blank()
}
