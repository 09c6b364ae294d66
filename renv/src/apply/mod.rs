//! Applying environment files to an [`EnvSink`].

use std::path::Path;

use tracing::{debug, trace};

use crate::{EnvSink, RenvError, RenvResult, entries};

/// Reads the environment file at `path` and writes each entry to `sink`.
///
/// Entries are written one at a time in file order, so a later duplicate
/// key overwrites an earlier one and variables set before a malformed line
/// stay set.
///
/// # Errors
///
/// Returns [`RenvError::Io`] if the file cannot be read as UTF-8 text and
/// [`RenvError::MalformedLine`] at the first line that is not a comment,
/// blank, or `key=value`.
pub fn apply<P, S>(path: P, sink: &mut S) -> RenvResult<()>
where
    P: AsRef<Path>,
    S: EnvSink + ?Sized,
{
    let file = path.as_ref();
    let contents = std::fs::read_to_string(file).map_err(|e| RenvError::io(file, e))?;
    let applied = apply_str(&contents, sink)?;
    debug!(path = %file.display(), applied, "applied environment file");
    Ok(())
}

/// Applies already-read environment file `contents` to `sink`.
///
/// Returns the number of assignments written.
///
/// # Errors
///
/// Returns [`RenvError::MalformedLine`] at the first malformed line; the
/// assignments before it have already been written.
///
/// # Examples
///
/// ```
/// use renv::{EnvSink, MemoryEnv, apply_str};
///
/// # fn main() -> renv::RenvResult<()> {
/// let mut env = MemoryEnv::new();
/// let applied = apply_str("FOO=test\n#BAR=var\n", &mut env)?;
/// assert_eq!(applied, 1);
/// assert_eq!(env.get("FOO").as_deref(), Some("test"));
/// assert_eq!(env.get("BAR"), None);
/// # Ok(())
/// # }
/// ```
pub fn apply_str<S>(contents: &str, sink: &mut S) -> RenvResult<usize>
where
    S: EnvSink + ?Sized,
{
    let mut applied = 0;
    for parsed in entries(contents) {
        let entry = parsed?;
        trace!(key = entry.key, line = entry.line_number, "setting variable");
        sink.set(entry.key, entry.value);
        applied += 1;
    }
    Ok(applied)
}
