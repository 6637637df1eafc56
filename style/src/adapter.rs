//! Formatter and diff adapters.
//!
//! The style driver only sees the [`Formatter`] and [`DiffRenderer`] traits.
//! [`Astyle`] and [`DiffTool`] implement them by running the external
//! programs synchronously, with their output going straight to the console.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::StyleError;
use crate::tools::FORMATTER;

/// Result of formatting a file in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The file already matched the style.
    Unchanged,
    /// The file was rewritten; the original is kept at `backup`.
    Reformatted {
        /// Copy of the file before formatting.
        backup: PathBuf,
    },
}

/// Formats a file in place.
pub trait Formatter {
    /// Formats `file` and reports whether it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatter cannot be run or fails.
    fn format_in_place(&self, file: &Path) -> Result<FormatOutcome, StyleError>;
}

/// Shows the difference between two versions of a file.
pub trait DiffRenderer {
    /// Renders a unified diff from `original` to `modified`.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff tool cannot be run or reports trouble.
    fn render_diff(&self, original: &Path, modified: &Path) -> Result<(), StyleError>;
}

/// Path where the formatter leaves the unformatted original.
pub fn backup_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".orig");
    PathBuf::from(name)
}

/// `astyle` run with a fixed options profile.
#[derive(Debug, Clone)]
pub struct Astyle {
    program: PathBuf,
    options: PathBuf,
}

impl Astyle {
    /// Creates an adapter that runs `program` with `--options=<options>`.
    pub fn new(program: PathBuf, options: PathBuf) -> Self {
        Self { program, options }
    }

    /// Executable this adapter runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn args(&self, file: &Path) -> Vec<OsString> {
        let mut opt = OsString::from("--options=");
        opt.push(&self.options);
        vec![opt, file.as_os_str().to_owned()]
    }
}

impl Formatter for Astyle {
    /// Runs astyle over `file`. Refuses to run if `<file>.orig` already
    /// exists.
    fn format_in_place(&self, file: &Path) -> Result<FormatOutcome, StyleError> {
        let backup = backup_path(file);
        if backup.exists() {
            return Err(StyleError::StaleBackup(backup));
        }

        let args = self.args(file);
        debug!(program = %self.program.display(), ?args, "running {FORMATTER}");
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| StyleError::Spawn {
                tool: FORMATTER,
                source,
            })?;
        if !status.success() {
            return Err(StyleError::ToolFailed {
                tool: FORMATTER,
                status,
            });
        }

        if backup.is_file() {
            Ok(FormatOutcome::Reformatted { backup })
        } else {
            Ok(FormatOutcome::Unchanged)
        }
    }
}

/// Which unified diff program is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffFlavor {
    /// `colordiff --show-c-function -u`.
    ColorDiff,
    /// Plain `diff -u`.
    Diff,
}

impl DiffFlavor {
    /// Program name looked up on `PATH`.
    pub fn program(self) -> &'static str {
        match self {
            Self::ColorDiff => "colordiff",
            Self::Diff => "diff",
        }
    }

    /// Arguments for a diff from `original` to `modified`.
    pub fn args(self, original: &Path, modified: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            Self::ColorDiff => vec!["--show-c-function".into(), "-u".into()],
            Self::Diff => vec!["-u".into()],
        };
        args.push(original.as_os_str().to_owned());
        args.push(modified.as_os_str().to_owned());
        args
    }
}

/// Unified diff program at a resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTool {
    flavor: DiffFlavor,
    program: PathBuf,
}

impl DiffTool {
    /// Creates an adapter that runs `program` with `flavor`'s arguments.
    pub fn new(flavor: DiffFlavor, program: PathBuf) -> Self {
        Self { flavor, program }
    }

    /// Argument style in use.
    pub fn flavor(&self) -> DiffFlavor {
        self.flavor
    }

    /// Executable this adapter runs.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl DiffRenderer for DiffTool {
    fn render_diff(&self, original: &Path, modified: &Path) -> Result<(), StyleError> {
        let tool = self.flavor.program();
        let status = Command::new(&self.program)
            .args(self.flavor.args(original, modified))
            .status()
            .map_err(|source| StyleError::Spawn { tool, source })?;
        // diff exits 1 when the inputs differ, which is the expected case here.
        match status.code() {
            Some(0 | 1) => Ok(()),
            _ => Err(StyleError::ToolFailed { tool, status }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn backup_appends_orig() {
        assert_eq!(
            backup_path(Path::new("src/refu.c")),
            PathBuf::from("src/refu.c.orig")
        );
    }

    #[test]
    fn astyle_args_carry_options_profile() {
        let astyle = Astyle::new(
            PathBuf::from("/usr/bin/astyle"),
            PathBuf::from("/opt/style/astyle_options"),
        );
        assert_eq!(
            astyle.args(Path::new("a.c")),
            vec![
                OsString::from("--options=/opt/style/astyle_options"),
                OsString::from("a.c")
            ]
        );
    }

    #[test]
    fn diff_args() {
        let orig = Path::new("a.c.orig");
        let new = Path::new("a.c");
        assert_eq!(
            DiffFlavor::ColorDiff.args(orig, new),
            vec!["--show-c-function", "-u", "a.c.orig", "a.c"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
        assert_eq!(
            DiffFlavor::Diff.args(orig, new),
            vec!["-u", "a.c.orig", "a.c"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    // =========================================================================
    // Process handling, with shell scripts standing in for the real tools
    // =========================================================================

    #[cfg(unix)]
    mod scripted {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        use super::*;

        /// Writes an executable `/bin/sh` script named `name` into `dir`.
        fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn source(dir: &Path) -> PathBuf {
            let file = dir.join("a.c");
            fs::write(&file, "int f(void){return 0;}\n").unwrap();
            file
        }

        #[test]
        fn astyle_runs_the_resolved_program() {
            let bin = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            // The file is the second argument, after --options=.
            let program = script(
                bin.path(),
                "astyle",
                r#"cp "$2" "$2.orig" && printf 'int f(void)\n{\n}\n' > "$2""#,
            );
            let file = source(work.path());

            let outcome = Astyle::new(program, PathBuf::from("opts"))
                .format_in_place(&file)
                .unwrap();
            assert_eq!(
                outcome,
                FormatOutcome::Reformatted {
                    backup: backup_path(&file)
                }
            );
            assert_eq!(
                fs::read_to_string(backup_path(&file)).unwrap(),
                "int f(void){return 0;}\n"
            );
        }

        #[test]
        fn astyle_without_backup_is_unchanged() {
            let bin = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            let program = script(bin.path(), "astyle", "exit 0");
            let file = source(work.path());

            let outcome = Astyle::new(program, PathBuf::from("opts"))
                .format_in_place(&file)
                .unwrap();
            assert_eq!(outcome, FormatOutcome::Unchanged);
        }

        #[test]
        fn astyle_nonzero_exit_is_a_tool_failure() {
            let bin = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            let program = script(bin.path(), "astyle", "exit 3");
            let file = source(work.path());

            let err = Astyle::new(program, PathBuf::from("opts"))
                .format_in_place(&file)
                .unwrap_err();
            assert!(matches!(
                err,
                StyleError::ToolFailed { tool: "astyle", status } if status.code() == Some(3)
            ));
        }

        #[test]
        fn existing_backup_is_refused_before_running() {
            let bin = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            let program = script(bin.path(), "astyle", r#"touch "$2.ran""#);
            let file = work.path().join("a.c");
            fs::write(&file, "CURRENT WORK").unwrap();
            fs::write(backup_path(&file), "STALE FROM LAST WEEK").unwrap();

            let err = Astyle::new(program, PathBuf::from("opts"))
                .format_in_place(&file)
                .unwrap_err();
            assert!(matches!(err, StyleError::StaleBackup(ref p) if *p == backup_path(&file)));
            assert!(!work.path().join("a.c.ran").exists());
            assert_eq!(fs::read_to_string(&file).unwrap(), "CURRENT WORK");
            assert_eq!(
                fs::read_to_string(backup_path(&file)).unwrap(),
                "STALE FROM LAST WEEK"
            );
        }

        #[test]
        fn missing_program_is_a_spawn_error() {
            let work = tempfile::tempdir().unwrap();
            let file = source(work.path());
            let astyle = Astyle::new(work.path().join("no-such-astyle"), PathBuf::from("opts"));

            assert!(matches!(
                astyle.format_in_place(&file),
                Err(StyleError::Spawn { tool: "astyle", .. })
            ));
        }

        #[test]
        fn diff_exit_status_one_means_files_differ() {
            let bin = tempfile::tempdir().unwrap();
            let diff = DiffTool::new(DiffFlavor::Diff, script(bin.path(), "diff", "exit 1"));
            diff.render_diff(Path::new("a.c.orig"), Path::new("a.c"))
                .unwrap();
        }

        #[test]
        fn diff_exit_status_two_is_a_tool_failure() {
            let bin = tempfile::tempdir().unwrap();
            let diff = DiffTool::new(
                DiffFlavor::ColorDiff,
                script(bin.path(), "colordiff", "exit 2"),
            );
            let err = diff
                .render_diff(Path::new("a.c.orig"), Path::new("a.c"))
                .unwrap_err();
            assert!(matches!(
                err,
                StyleError::ToolFailed { tool: "colordiff", status } if status.code() == Some(2)
            ));
        }

        #[test]
        fn diff_receives_flavor_arguments() {
            let bin = tempfile::tempdir().unwrap();
            let log = bin.path().join("args");
            let program = script(
                bin.path(),
                "colordiff",
                &format!(r#"echo "$@" > '{}'"#, log.display()),
            );
            DiffTool::new(DiffFlavor::ColorDiff, program)
                .render_diff(Path::new("a.c.orig"), Path::new("a.c"))
                .unwrap();
            assert_eq!(
                fs::read_to_string(&log).unwrap(),
                "--show-c-function -u a.c.orig a.c\n"
            );
        }
    }
}
