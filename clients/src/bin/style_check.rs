//! `style-check` — astyle wrapper.
//!
//! Checks a C source file for style violations (showing a diff and leaving
//! the file untouched), reformats it in place, or checks the comments above
//! its functions. Selected modes run in that order.
//!
//! **Usage:**
//! ```
//! style-check [-s|--check-style] [-r|--reformat-style] [-c|--check-comments] [--keep-original] <file_name>
//! ```
//!
//! Exits 1 if astyle is not on `PATH`.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use xmacro_style::{FunctionCommentChecker, Modes, StyleChecker, Toolchain};

/// Astyle wrapper script.
#[derive(Parser)]
#[command(name = "style-check", version, about = "Astyle wrapper script")]
struct Args {
    /// Checks for style violations.
    #[arg(short = 's', long)]
    check_style: bool,

    /// Reformats style.
    #[arg(short = 'r', long)]
    reformat_style: bool,

    /// Checks the style of comments above functions.
    #[arg(short = 'c', long)]
    check_comments: bool,

    /// Keep the `.orig` backup after reformatting.
    #[arg(long)]
    keep_original: bool,

    /// The name of the file to work on.
    file_name: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    xmacro_clients::init_logging();

    let tools = match Toolchain::detect(xmacro_clients::astyle_options()) {
        Ok(tools) => tools,
        Err(e) => {
            error!("{e}. Quitting ...");
            return ExitCode::FAILURE;
        }
    };

    let file = absolute(&args.file_name);
    let checker = StyleChecker::new(tools.formatter, tools.diff, FunctionCommentChecker);
    checker.run(
        &file,
        Modes {
            check_style: args.check_style,
            reformat_style: args.reformat_style,
            check_comments: args.check_comments,
            keep_original: args.keep_original,
        },
    );

    ExitCode::SUCCESS
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
