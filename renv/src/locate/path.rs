//! Path normalisation for the upward search.

use std::io;
use std::path::{Path, PathBuf};

use crate::{RenvError, RenvResult};

/// Canonicalise `p` using platform-specific rules.
///
/// On Windows [`dunce`](https://docs.rs/dunce/latest/dunce/) avoids UNC
/// prefixes, which would otherwise defeat prefix comparisons against a
/// boundary written by hand.
///
/// # Errors
///
/// Returns [`RenvError::Io`] if canonicalisation fails.
fn canonicalise(p: &Path) -> RenvResult<PathBuf> {
    #[cfg(windows)]
    {
        dunce::canonicalize(p).map_err(|e| RenvError::io(p, e))
    }
    #[cfg(not(windows))]
    {
        std::fs::canonicalize(p).map_err(|e| RenvError::io(p, e))
    }
}

/// Resolves `dir` to an absolute path for the upward search.
///
/// The deepest existing ancestor is canonicalised and the missing
/// components are appended back, so a start directory or boundary that does
/// not exist yet still compares correctly against canonical paths.
///
/// # Errors
///
/// Returns [`RenvError::Io`] for failures other than a missing directory.
pub(super) fn normalise(dir: &Path) -> RenvResult<PathBuf> {
    let absolute = std::path::absolute(dir).map_err(|e| RenvError::io(dir, e))?;
    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    loop {
        match canonicalise(existing) {
            Ok(canonical) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(canonical, |resolved, part| resolved.join(part)));
            }
            Err(RenvError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Ok(absolute.clone());
                };
                missing.push(name);
                existing = parent;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Normalises the configured boundary, if any.
///
/// # Errors
///
/// Returns [`RenvError::Io`] for failures other than a missing directory.
pub(super) fn resolve_boundary(boundary: Option<&Path>) -> RenvResult<Option<PathBuf>> {
    boundary.map(normalise).transpose()
}
