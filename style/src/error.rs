//! Style wrapper errors.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure of a style operation.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A required external program is not on `PATH`.
    #[error("{0} can not be found in the path")]
    ToolNotFound(&'static str),

    /// The file to work on does not exist.
    #[error("{} could not be found", .0.display())]
    FileNotFound(PathBuf),

    /// The external program could not be started.
    #[error("there was a problem invoking the {tool} command")]
    Spawn {
        /// Program name.
        tool: &'static str,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The external program ran but reported failure.
    #[error("{tool} command returned error ({status})")]
    ToolFailed {
        /// Program name.
        tool: &'static str,
        /// Exit status.
        status: ExitStatus,
    },

    /// A formatter backup from an earlier run is in the way.
    #[error("{} already exists; remove or rename it before running the formatter", .0.display())]
    StaleBackup(PathBuf),

    /// Restoring, removing or reading a file failed.
    #[error("{action} {}", .path.display())]
    Io {
        /// What was being done, e.g. "failed to restore".
        action: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}
