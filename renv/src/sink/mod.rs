//! Environment sinks: where parsed entries are written and control
//! variables are read from.
//!
//! [`ProcessEnv`] targets the real process environment. [`MemoryEnv`] keeps
//! everything in an ordered map so callers can locate and parse files
//! without touching global state.

use std::collections::BTreeMap;

use tracing::trace;

/// Get/set access to a table of environment variables.
pub trait EnvSink {
    /// Returns the value of `key`, or `None` when unset or not valid UTF-8.
    fn get(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`, overwriting any existing value.
    ///
    /// Sinks backed by the process environment ignore assignments that
    /// [`can_store`] rejects.
    fn set(&mut self, key: &str, value: &str);
}

/// Returns whether an operating system environment can hold `key=value`.
///
/// The key must be non-empty and free of `=` and NUL; the value must be
/// free of NUL.
///
/// # Examples
///
/// ```
/// assert!(renv::can_store("PORT", "8080"));
/// assert!(!renv::can_store("", "orphan"));
/// assert!(!renv::can_store("A=B", "x"));
/// ```
#[must_use]
pub fn can_store(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0']) && !value.contains('\0')
}

impl<S: EnvSink + ?Sized> EnvSink for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

/// The environment of the current process.
///
/// Writes go straight to [`std::env::set_var`]. The process environment is
/// shared by every thread and nothing here serialises access: callers that
/// load files while other threads read or write the environment must
/// coordinate externally.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if !can_store(key, value) {
            trace!(key, "ignoring assignment the process environment cannot hold");
            return;
        }
        // SAFETY: `can_store` rules out the inputs `set_var` rejects.
        // Concurrent access is the caller's responsibility, as documented on
        // `ProcessEnv`.
        unsafe { std::env::set_var(key, value) };
    }
}

/// In-memory environment backed by an ordered map.
///
/// # Examples
///
/// ```
/// use renv::{EnvSink, MemoryEnv};
///
/// let mut env = MemoryEnv::from_iter([("RENV", "test")]);
/// env.set("FOO", "bar");
/// assert_eq!(env.get("RENV").as_deref(), Some("test"));
/// assert_eq!(env.get("FOO").as_deref(), Some("bar"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    /// Creates an empty environment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Returns every variable in key order.
    #[must_use]
    pub const fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Number of variables currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` when no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSink for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_owned(), value.to_owned());
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
