//! Primary error enum for environment file discovery and loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating or applying an environment file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenvError {
    /// No environment file exists between the start directory and the
    /// search boundary.
    #[error("{file_name} not found in project")]
    NotFound {
        /// Target file name the locator searched for, such as `.env.test`.
        file_name: String,
    },

    /// Filesystem failure other than a missing file.
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        /// Path being inspected or read when the failure occurred.
        path: PathBuf,
        /// Underlying error reported by the operating system.
        #[source]
        source: std::io::Error,
    },

    /// A non-empty, non-comment line is not of the form `key=value`.
    #[error("Environment line {line} is malformed - must be of format key=value")]
    MalformedLine {
        /// The offending line, as it appeared in the file.
        line: String,
        /// One-based line number within the file.
        line_number: usize,
    },
}
