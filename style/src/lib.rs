//! Source style wrapper.
//!
//! Runs a source formatter over a C file and either shows what it would
//! change (check mode, original restored afterwards) or keeps its output
//! (reformat mode). Function comments are checked by a separate
//! [`CommentChecker`].
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use xmacro_style::{FunctionCommentChecker, Modes, StyleChecker, Toolchain};
//!
//! let tools = Toolchain::detect(PathBuf::from("style/astyle_options")).unwrap();
//! let checker = StyleChecker::new(tools.formatter, tools.diff, FunctionCommentChecker);
//! let modes = Modes { check_style: true, ..Modes::default() };
//! assert!(checker.run(Path::new("src/refu.c"), modes));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod adapter;
pub mod comments;
pub mod error;
pub mod tools;

use std::fs;
use std::path::Path;

use tracing::{error, info, warn};

pub use adapter::{Astyle, DiffFlavor, DiffRenderer, DiffTool, FormatOutcome, Formatter};
pub use comments::{CommentChecker, CommentViolation, FunctionCommentChecker};
pub use error::StyleError;
pub use tools::{find_on_path, Toolchain};

/// Which style operations to run on a file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    /// Show a diff of style violations, leaving the file untouched.
    pub check_style: bool,
    /// Reformat the file in place.
    pub reformat_style: bool,
    /// Check the comments above functions.
    pub check_comments: bool,
    /// Keep the formatter's `.orig` backup after reformatting.
    pub keep_original: bool,
}

/// Whether a file needed formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleOutcome {
    /// The file already matched the style.
    Clean,
    /// The formatter changed the file.
    Changed,
}

/// Drives a formatter, a diff renderer and a comment checker.
pub struct StyleChecker<F, D, C> {
    formatter: F,
    diff: D,
    comments: C,
}

impl<F: Formatter, D: DiffRenderer, C: CommentChecker> StyleChecker<F, D, C> {
    /// Creates a checker from its three collaborators.
    pub fn new(formatter: F, diff: D, comments: C) -> Self {
        Self {
            formatter,
            diff,
            comments,
        }
    }

    /// Shows the formatter's changes as a diff, then restores the original.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, a `.orig` backup is already
    /// present, the formatter fails, the diff cannot be rendered, or the
    /// original cannot be restored. The original is restored before a diff
    /// error is returned.
    pub fn check_style(&self, file: &Path) -> Result<StyleOutcome, StyleError> {
        let backup = match self.format(file)? {
            FormatOutcome::Unchanged => {
                info!("Woohoo! Go you! No style violations!");
                return Ok(StyleOutcome::Clean);
            }
            FormatOutcome::Reformatted { backup } => backup,
        };

        let diffed = self.diff.render_diff(&backup, file);
        fs::rename(&backup, file).map_err(|source| StyleError::Io {
            action: "failed to restore",
            path: file.to_path_buf(),
            source,
        })?;
        diffed?;
        Ok(StyleOutcome::Changed)
    }

    /// Reformats the file in place, removing the backup unless
    /// `keep_original` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, the formatter fails, or the
    /// backup cannot be removed.
    pub fn reformat_style(
        &self,
        file: &Path,
        keep_original: bool,
    ) -> Result<StyleOutcome, StyleError> {
        match self.format(file)? {
            FormatOutcome::Unchanged => Ok(StyleOutcome::Clean),
            FormatOutcome::Reformatted { backup } => {
                if !keep_original {
                    fs::remove_file(&backup).map_err(|source| StyleError::Io {
                        action: "failed to remove",
                        path: backup.clone(),
                        source,
                    })?;
                }
                Ok(StyleOutcome::Changed)
            }
        }
    }

    /// Checks the comments above every function in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn check_comments(&self, file: &Path) -> Result<Vec<CommentViolation>, StyleError> {
        if !file.is_file() {
            return Err(StyleError::FileNotFound(file.to_path_buf()));
        }
        self.comments.check(file)
    }

    /// Runs the selected modes in order: check, reformat, comments.
    ///
    /// Each mode runs even if an earlier one failed. Returns true if every
    /// selected mode succeeded.
    pub fn run(&self, file: &Path, modes: Modes) -> bool {
        let mut ok = true;

        if modes.check_style {
            match self.check_style(file) {
                Ok(StyleOutcome::Changed) => warn!(file = %file.display(), "style violations found"),
                Ok(StyleOutcome::Clean) => {}
                Err(e) => {
                    error!("{e}");
                    ok = false;
                }
            }
        }

        if modes.reformat_style {
            match self.reformat_style(file, modes.keep_original) {
                Ok(StyleOutcome::Changed) => info!(file = %file.display(), "reformatted"),
                Ok(StyleOutcome::Clean) => {}
                Err(e) => {
                    error!("{e}");
                    ok = false;
                }
            }
        }

        if modes.check_comments {
            match self.check_comments(file) {
                Ok(violations) => {
                    for v in &violations {
                        warn!(
                            "{}:{}: function `{}` has no comment above it",
                            file.display(),
                            v.line,
                            v.function
                        );
                    }
                }
                Err(e) => {
                    error!("{e}");
                    ok = false;
                }
            }
        }

        ok
    }

    fn format(&self, file: &Path) -> Result<FormatOutcome, StyleError> {
        if !file.is_file() {
            return Err(StyleError::FileNotFound(file.to_path_buf()));
        }
        self.formatter.format_in_place(file)
    }
}
