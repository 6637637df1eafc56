//! External tool discovery.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::adapter::{Astyle, DiffFlavor, DiffTool};
use crate::error::StyleError;

/// Source formatter program.
pub const FORMATTER: &str = "astyle";

/// Returns the first executable named `program` on `PATH`.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    search_path(program, &env::var_os("PATH")?)
}

/// Returns the first executable named `program` in the `path_var` directory
/// list.
pub fn search_path(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| PathBuf::from(dir.to_string_lossy().trim_matches('"')).join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// External programs the style wrapper runs.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Formatter adapter.
    pub formatter: Astyle,
    /// Diff adapter.
    pub diff: DiffTool,
}

impl Toolchain {
    /// Locates the tools on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ToolNotFound`] if the formatter is missing.
    pub fn detect(options: PathBuf) -> Result<Self, StyleError> {
        Self::detect_in(&env::var_os("PATH").unwrap_or_default(), options)
    }

    /// Locates the tools in an explicit directory list.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ToolNotFound`] if the formatter is missing.
    pub fn detect_in(path_var: &OsStr, options: PathBuf) -> Result<Self, StyleError> {
        let formatter =
            search_path(FORMATTER, path_var).ok_or(StyleError::ToolNotFound(FORMATTER))?;
        let diff = match search_path(DiffFlavor::ColorDiff.program(), path_var) {
            Some(program) => DiffTool::new(DiffFlavor::ColorDiff, program),
            None => {
                warn!("colordiff can't be found in the path. Will use diff");
                let name = DiffFlavor::Diff.program();
                let program = search_path(name, path_var).unwrap_or_else(|| PathBuf::from(name));
                DiffTool::new(DiffFlavor::Diff, program)
            }
        };
        Ok(Self {
            formatter: Astyle::new(formatter, options),
            diff,
        })
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn install(dir: &Path, name: &str, mode: u32) {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn finds_executables_only() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), "astyle", 0o755);
        install(dir.path(), "colordiff", 0o644);
        let path_var = env::join_paths([dir.path()]).unwrap();

        assert_eq!(
            search_path("astyle", &path_var),
            Some(dir.path().join("astyle"))
        );
        assert_eq!(search_path("colordiff", &path_var), None);
        assert_eq!(search_path("missing", &path_var), None);
    }

    #[test]
    fn missing_formatter_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), "colordiff", 0o755);
        let path_var = env::join_paths([dir.path()]).unwrap();

        let err = Toolchain::detect_in(&path_var, PathBuf::from("opts")).unwrap_err();
        assert!(matches!(err, StyleError::ToolNotFound("astyle")));
    }

    #[test]
    fn diff_falls_back_without_colordiff() {
        let with = tempfile::tempdir().unwrap();
        install(with.path(), "astyle", 0o755);
        install(with.path(), "diff", 0o755);
        let without = tempfile::tempdir().unwrap();
        install(without.path(), "colordiff", 0o755);

        let only_astyle = env::join_paths([with.path()]).unwrap();
        let both = env::join_paths([with.path(), without.path()]).unwrap();

        let tools = Toolchain::detect_in(&only_astyle, PathBuf::from("opts")).unwrap();
        assert_eq!(tools.diff.flavor(), DiffFlavor::Diff);
        assert_eq!(tools.diff.program(), with.path().join("diff"));
        let tools = Toolchain::detect_in(&both, PathBuf::from("opts")).unwrap();
        assert_eq!(tools.diff.flavor(), DiffFlavor::ColorDiff);
        assert_eq!(tools.diff.program(), without.path().join("colordiff"));
    }

    #[test]
    fn detected_formatter_keeps_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), "astyle", 0o755);
        let path_var = env::join_paths([dir.path()]).unwrap();

        let tools = Toolchain::detect_in(&path_var, PathBuf::from("opts")).unwrap();
        assert_eq!(tools.formatter.program(), dir.path().join("astyle"));
    }
}
