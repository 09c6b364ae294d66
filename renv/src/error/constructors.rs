//! Constructors and classification helpers for `RenvError`.

use std::io;
use std::path::Path;

use super::RenvError;

impl RenvError {
    /// Construct a [`RenvError::NotFound`] for the given target file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use renv::RenvError;
    ///
    /// let err = RenvError::not_found(".env.test");
    /// assert_eq!(err.to_string(), ".env.test not found in project");
    /// ```
    #[must_use]
    pub fn not_found(file_name: impl Into<String>) -> Self {
        Self::NotFound {
            file_name: file_name.into(),
        }
    }

    /// Construct a [`RenvError::Io`] for `path`.
    #[must_use]
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct a [`RenvError::MalformedLine`].
    #[must_use]
    pub fn malformed_line(line: impl Into<String>, line_number: usize) -> Self {
        Self::MalformedLine {
            line: line.into(),
            line_number,
        }
    }

    /// Returns `true` when no environment file was found.
    ///
    /// Callers commonly treat this case as a warning rather than a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the underlying [`io::Error`] for [`RenvError::Io`].
    #[must_use]
    pub const fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
