//! Locate a project's environment file and load it into the process
//! environment.
//!
//! Loading happens in two steps:
//!
//! 1. [`EnvLocator`] walks up from a start directory, bounded by the
//!    directory in `RENV_ROOT`, looking for `.env` (or `.env.<selector>`
//!    when `RENV` names an environment other than `development`).
//! 2. [`apply`] reads that file line by line and sets each `key=value`
//!    assignment through an [`EnvSink`].
//!
//! [`find_env`] and [`load_env`] run each step against the real process
//! environment; [`autoload`] runs both from the working directory.
//!
//! ```rust,no_run
//! # fn main() -> renv::RenvResult<()> {
//! let cwd = std::env::current_dir().expect("working directory");
//! let path = renv::find_env(&cwd)?;
//! renv::load_env(&path)?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

mod apply;
mod autoload;
mod error;
mod locate;
mod parse;
mod sink;

pub use apply::{apply, apply_str};
pub use autoload::{AutoloadOutcome, autoload, autoload_with};
pub use error::{RenvError, RenvResult};
pub use locate::{
    DEFAULT_BASE_NAME, DEFAULT_BOUNDARY_VAR, DEFAULT_SELECTOR, DEFAULT_SELECTOR_VAR, EnvLocator,
    EnvLocatorBuilder,
};
pub use parse::{EnvEntry, Entries, entries, parse_line};
pub use sink::{EnvSink, MemoryEnv, ProcessEnv, can_store};

/// Finds the environment file for `start_dir` using the default locator and
/// the process environment.
///
/// # Errors
///
/// Returns [`RenvError::NotFound`] when no file exists between `start_dir`
/// and the boundary, or [`RenvError::Io`] for other filesystem failures.
pub fn find_env(start_dir: impl AsRef<Path>) -> RenvResult<PathBuf> {
    EnvLocator::default().locate(start_dir, &ProcessEnv)
}

/// Applies the environment file at `path` to the process environment.
///
/// # Errors
///
/// Returns [`RenvError::Io`] if the file cannot be read and
/// [`RenvError::MalformedLine`] at the first malformed line.
pub fn load_env(path: impl AsRef<Path>) -> RenvResult<()> {
    apply(path, &mut ProcessEnv)
}
