//! Startup helper that loads the project's environment file, if any.
//!
//! Call [`autoload`] at the top of `main` (or from a test harness) before
//! reading configuration from the environment:
//!
//! ```rust,no_run
//! fn main() -> Result<(), renv::RenvError> {
//!     renv::autoload()?;
//!     // std::env::var("DATABASE_URL") now sees values from `.env`.
//!     Ok(())
//! }
//! ```
//!
//! A missing file is logged as a warning and is not an error. Every other
//! failure is returned so the caller can abort startup.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{EnvLocator, EnvSink, ProcessEnv, RenvError, RenvResult, apply};

/// What [`autoload`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum AutoloadOutcome {
    /// The file at this path was applied.
    Loaded(PathBuf),
    /// No environment file was found; nothing was applied.
    NotFound {
        /// Target file name that was searched for.
        file_name: String,
    },
}

impl AutoloadOutcome {
    /// Path of the applied file, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Loaded(path) => Some(path),
            Self::NotFound { .. } => None,
        }
    }
}

/// Locates the environment file from the current working directory and
/// applies it to the process environment.
///
/// # Errors
///
/// Returns [`RenvError::Io`] if the working directory cannot be read or a
/// filesystem operation fails, and [`RenvError::MalformedLine`] if the
/// located file is malformed. A missing file is not an error.
pub fn autoload() -> RenvResult<AutoloadOutcome> {
    let cwd = std::env::current_dir().map_err(|e| RenvError::io(Path::new("."), e))?;
    autoload_with(&EnvLocator::default(), cwd, &mut ProcessEnv)
}

/// Runs the autoload policy with an explicit locator, start directory and
/// sink.
///
/// # Errors
///
/// As for [`autoload`].
pub fn autoload_with<P, S>(
    locator: &EnvLocator,
    start_dir: P,
    sink: &mut S,
) -> RenvResult<AutoloadOutcome>
where
    P: AsRef<Path>,
    S: EnvSink + ?Sized,
{
    match locator.locate(start_dir, &*sink) {
        Ok(path) => {
            apply(&path, sink)?;
            info!(path = %path.display(), "loaded environment file");
            Ok(AutoloadOutcome::Loaded(path))
        }
        Err(RenvError::NotFound { file_name }) => {
            warn!("{file_name} not found in project; continuing without it");
            Ok(AutoloadOutcome::NotFound { file_name })
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests;
