//! Builder for [`EnvLocator`].
//!
//! The builder lets applications rename the environment file and the
//! variables the locator consults, or pin the search boundary to a fixed
//! directory instead of reading it from the environment.

use std::path::PathBuf;

use super::{
    DEFAULT_BASE_NAME, DEFAULT_BOUNDARY_VAR, DEFAULT_SELECTOR, DEFAULT_SELECTOR_VAR, EnvLocator,
};

/// Builder for [`EnvLocator`].
///
/// # Examples
///
/// ```rust
/// use renv::{EnvLocator, MemoryEnv};
///
/// let locator = EnvLocator::builder()
///     .base_name(".settings")
///     .selector_var("APP_ENV")
///     .default_selector("dev")
///     .build();
/// let env = MemoryEnv::from_iter([("APP_ENV", "staging")]);
/// assert_eq!(locator.target_file_name(&env), ".settings.staging");
/// ```
#[derive(Debug, Clone)]
pub struct EnvLocatorBuilder {
    base_name: String,
    selector_var: String,
    default_selector: String,
    boundary_var: String,
    boundary: Option<PathBuf>,
}

impl Default for EnvLocatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLocatorBuilder {
    /// Creates a builder using `.env`, `RENV`, `development` and `RENV_ROOT`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_name: String::from(DEFAULT_BASE_NAME),
            selector_var: String::from(DEFAULT_SELECTOR_VAR),
            default_selector: String::from(DEFAULT_SELECTOR),
            boundary_var: String::from(DEFAULT_BOUNDARY_VAR),
            boundary: None,
        }
    }

    /// Overrides the base file name the selector suffix is appended to.
    #[must_use]
    pub fn base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Sets the environment variable holding the selector.
    #[must_use]
    pub fn selector_var(mut self, var: impl Into<String>) -> Self {
        self.selector_var = var.into();
        self
    }

    /// Sets the selector value that maps to the bare base file name.
    #[must_use]
    pub fn default_selector(mut self, selector: impl Into<String>) -> Self {
        self.default_selector = selector.into();
        self
    }

    /// Sets the environment variable holding the search boundary.
    #[must_use]
    pub fn boundary_var(mut self, var: impl Into<String>) -> Self {
        self.boundary_var = var.into();
        self
    }

    /// Pins the search boundary, ignoring the boundary variable.
    ///
    /// An empty path disables ascension, so only the start directory is
    /// inspected.
    #[must_use]
    pub fn boundary(mut self, dir: impl Into<PathBuf>) -> Self {
        self.boundary = Some(dir.into());
        self
    }

    /// Reverts to reading the boundary from the boundary variable.
    #[must_use]
    pub fn clear_boundary(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Consumes the builder and returns the configured [`EnvLocator`].
    #[must_use]
    pub fn build(self) -> EnvLocator {
        EnvLocator {
            base_name: self.base_name,
            selector_var: self.selector_var,
            default_selector: self.default_selector,
            boundary_var: self.boundary_var,
            boundary: self.boundary,
        }
    }
}
