//! Function comment checks.
//!
//! A function definition at column 0 must be preceded by a comment, either a
//! `/* ... */` block or `//` lines.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::StyleError;

/// A function definition missing its comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentViolation {
    /// One-based line of the definition.
    pub line: usize,
    /// Function name.
    pub function: String,
}

/// Checks the comments of a source file.
pub trait CommentChecker {
    /// Returns every violation found in `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn check(&self, file: &Path) -> Result<Vec<CommentViolation>, StyleError>;
}

/// Reports function definitions without a preceding comment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FunctionCommentChecker;

impl CommentChecker for FunctionCommentChecker {
    fn check(&self, file: &Path) -> Result<Vec<CommentViolation>, StyleError> {
        let source = fs::read_to_string(file).map_err(|source| StyleError::Io {
            action: "failed to read",
            path: file.to_path_buf(),
            source,
        })?;
        Ok(check_source(&source))
    }
}

const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "return", "sizeof", "typedef", "case",
    "goto",
];

// How far a definition's `{` may trail its name.
const SIGNATURE_LOOKAHEAD: usize = 8;

// The pattern is a literal, so compiling it cannot fail.
#[allow(clippy::unwrap_used)]
fn definition_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^((?:[A-Za-z_]\w*[\s*]+)+)\**([A-Za-z_]\w*)\s*\(").unwrap())
}

/// Scans C source text for uncommented function definitions.
pub fn check_source(source: &str) -> Vec<CommentViolation> {
    let lines: Vec<&str> = source.lines().collect();
    let mut violations = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = definition_start().captures(line) else {
            continue;
        };
        let first_word = caps[1].split_whitespace().next().unwrap_or_default();
        let name = &caps[2];
        if KEYWORDS.contains(&first_word) || KEYWORDS.contains(&name) {
            continue;
        }
        if !opens_body(&lines[i..]) {
            continue;
        }
        if !has_comment_above(&lines[..i]) {
            violations.push(CommentViolation {
                line: i + 1,
                function: name.to_string(),
            });
        }
    }

    violations
}

/// True if the signature starting at `lines[0]` reaches `{` before `;`.
fn opens_body(lines: &[&str]) -> bool {
    for line in lines.iter().take(SIGNATURE_LOOKAHEAD) {
        for c in line.chars() {
            match c {
                '{' => return true,
                ';' => return false,
                _ => {}
            }
        }
    }
    false
}

fn has_comment_above(lines: &[&str]) -> bool {
    lines
        .iter()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .map(|l| l.ends_with("*/") || l.starts_with("//"))
        .unwrap_or(false)
}
