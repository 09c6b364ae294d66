//! Upward search for the environment file belonging to a project.
//!
//! [`EnvLocator`] computes a target file name from the selector variable
//! (`.env` or `.env.<selector>`) and walks from a start directory towards
//! the search boundary, returning the first regular file with that name.
//!
//! The walk never ascends past the boundary. The start directory is always
//! inspected, the boundary directory itself is eligible, and a start
//! directory outside the boundary is checked alone. Without a boundary only
//! the start directory is inspected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::{EnvSink, RenvError, RenvResult};

mod builder;
mod path;

pub use builder::EnvLocatorBuilder;

use path::{normalise, resolve_boundary};

/// Default base file name.
pub const DEFAULT_BASE_NAME: &str = ".env";
/// Default name of the variable selecting the environment.
pub const DEFAULT_SELECTOR_VAR: &str = "RENV";
/// Selector value that maps to the base file name.
pub const DEFAULT_SELECTOR: &str = "development";
/// Default name of the variable holding the search boundary.
pub const DEFAULT_BOUNDARY_VAR: &str = "RENV_ROOT";

/// Locates environment files by walking up the directory tree.
///
/// # Examples
///
/// ```rust,no_run
/// use renv::{EnvLocator, ProcessEnv};
///
/// # fn run() -> renv::RenvResult<()> {
/// let locator = EnvLocator::builder()
///     .boundary("/srv/workspace")
///     .build();
/// let path = locator.locate("/srv/workspace/app/src", &ProcessEnv)?;
/// println!("using {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EnvLocator {
    base_name: String,
    selector_var: String,
    default_selector: String,
    boundary_var: String,
    boundary: Option<PathBuf>,
}

impl Default for EnvLocator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EnvLocator {
    /// Creates a builder initialised with the default names.
    #[must_use]
    pub fn builder() -> EnvLocatorBuilder {
        EnvLocatorBuilder::new()
    }

    /// Computes the file name to search for from the selector variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use renv::{EnvLocator, MemoryEnv};
    ///
    /// let locator = EnvLocator::default();
    /// assert_eq!(locator.target_file_name(&MemoryEnv::new()), ".env");
    /// let env = MemoryEnv::from_iter([("RENV", "development")]);
    /// assert_eq!(locator.target_file_name(&env), ".env");
    /// let env = MemoryEnv::from_iter([("RENV", "test")]);
    /// assert_eq!(locator.target_file_name(&env), ".env.test");
    /// ```
    #[must_use]
    pub fn target_file_name<S: EnvSink + ?Sized>(&self, env: &S) -> String {
        match env.get(&self.selector_var) {
            Some(selector) if !selector.is_empty() && selector != self.default_selector => {
                format!("{}.{selector}", self.base_name)
            }
            _ => self.base_name.clone(),
        }
    }

    /// Finds the environment file for `start_dir`.
    ///
    /// The selector and boundary variables are read from `env`. The returned
    /// path is canonical.
    ///
    /// # Errors
    ///
    /// Returns [`RenvError::NotFound`] when no matching file exists between
    /// `start_dir` and the boundary, and [`RenvError::Io`] for any other
    /// filesystem failure. A start directory that does not exist is not an
    /// error: the search continues from its nearest ancestor.
    pub fn locate<P, S>(&self, start_dir: P, env: &S) -> RenvResult<PathBuf>
    where
        P: AsRef<Path>,
        S: EnvSink + ?Sized,
    {
        let file_name = self.target_file_name(env);
        let boundary = resolve_boundary(self.boundary_source(env).as_deref())?;
        let mut current = normalise(start_dir.as_ref())?;
        debug!(
            file_name = %file_name,
            start = %current.display(),
            boundary = ?boundary.as_deref().map(Path::display),
            "searching for environment file"
        );

        loop {
            let candidate = current.join(&file_name);
            if is_regular_file(&candidate)? {
                debug!(path = %candidate.display(), "found environment file");
                return Ok(candidate);
            }
            let Some(parent) = next_search_dir(&current, boundary.as_deref()) else {
                return Err(RenvError::not_found(file_name));
            };
            current = parent;
        }
    }

    fn boundary_source<S: EnvSink + ?Sized>(&self, env: &S) -> Option<PathBuf> {
        self.boundary
            .clone()
            .or_else(|| env.get(&self.boundary_var).map(PathBuf::from))
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Returns whether `candidate` is an existing regular file.
///
/// Missing entries and non-files report `false`; any other failure is
/// surfaced.
fn is_regular_file(candidate: &Path) -> RenvResult<bool> {
    trace!(candidate = %candidate.display(), "checking candidate");
    match fs::metadata(candidate) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(RenvError::io(candidate, err)),
    }
}

/// Returns the next directory to inspect, or `None` when `current` is the
/// boundary, lies outside it, or has no parent.
fn next_search_dir(current: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let root = boundary?;
    if current == root || !current.starts_with(root) {
        return None;
    }
    current.parent().map(Path::to_path_buf)
}
