//! Line-oriented parser for environment files.
//!
//! The accepted format is deliberately small:
//!
//! ```text
//! # full-line comments start with a hash
//! DATABASE_URL=postgres://localhost/dev
//!   PORT = 8080
//! ```
//!
//! Empty lines and lines beginning with `#` are skipped. Every other line is
//! split on its first `=` and both halves are trimmed. There is no quoting,
//! interpolation, `export` prefix or trailing comment support.

use std::iter::{Enumerate, FusedIterator};
use std::str::Lines;

use tracing::trace;

use crate::{RenvError, RenvResult, can_store};

/// A single `key=value` assignment read from an environment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvEntry<'a> {
    /// Variable name, trimmed.
    pub key: &'a str,
    /// Variable value, trimmed. May be empty.
    pub value: &'a str,
    /// One-based line number the entry was read from.
    pub line_number: usize,
}

/// Parses one line of an environment file.
///
/// Returns `Ok(None)` for blank and comment lines, and for assignments no
/// environment can hold: an empty key after trimming, or a NUL byte in the
/// key or value. Those lines are skipped and parsing continues.
///
/// # Errors
///
/// Returns [`RenvError::MalformedLine`] when the line has no `=`.
///
/// # Examples
///
/// ```
/// use renv::parse_line;
///
/// # fn main() -> renv::RenvResult<()> {
/// let entry = parse_line("  MYVAR = Donkey  ", 1)?.expect("assignment");
/// assert_eq!((entry.key, entry.value), ("MYVAR", "Donkey"));
/// assert!(parse_line("#MYVAR=Donkey", 2)?.is_none());
/// # Ok(())
/// # }
/// ```
pub fn parse_line(line: &str, line_number: usize) -> RenvResult<Option<EnvEntry<'_>>> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let Some((raw_key, raw_value)) = line.split_once('=') else {
        return Err(RenvError::malformed_line(line, line_number));
    };
    let key = raw_key.trim();
    let value = raw_value.trim();
    if !can_store(key, value) {
        trace!(line = line_number, "skipping assignment that cannot be stored");
        return Ok(None);
    }
    Ok(Some(EnvEntry {
        key,
        value,
        line_number,
    }))
}

/// Iterator over the assignments in an environment file's contents.
///
/// Yields entries in file order. After the first malformed line is reported
/// the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    lines: Enumerate<Lines<'a>>,
    failed: bool,
}

/// Parses `contents` lazily into [`EnvEntry`] values.
///
/// Lines are split on `\n`; a trailing `\r` is dropped so CRLF files parse
/// the same as LF files.
///
/// # Examples
///
/// ```
/// let keys: Vec<_> = renv::entries("A=1\n# B=2\nC=3\n")
///     .map(|entry| entry.map(|e| e.key))
///     .collect::<Result<_, _>>()
///     .expect("well-formed");
/// assert_eq!(keys, ["A", "C"]);
/// ```
#[must_use]
pub fn entries(contents: &str) -> Entries<'_> {
    Entries {
        lines: contents.lines().enumerate(),
        failed: false,
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = RenvResult<EnvEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for (index, line) in self.lines.by_ref() {
            match parse_line(line, index + 1) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl FusedIterator for Entries<'_> {}
