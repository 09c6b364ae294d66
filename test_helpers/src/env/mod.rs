//! Guards for mutating process environment variables in tests.
//!
//! Loading an environment file writes straight into the process
//! environment, so tests that exercise `ProcessEnv` share one global table.
//! Every mutation made through this module takes a process-wide re-entrant
//! lock, and each returns an [`EnvVarGuard`] that puts the previous value
//! back (or removes the variable) when dropped.
//!
//! Guards for the same key restore in LIFO order. Hold an [`EnvScope`] when
//! a test needs the environment to itself for its whole duration, for
//! example while calling code that sets variables without a guard.
//!
//! # Examples
//!
//! ```
//! use renv_test_helpers::env;
//!
//! let _selector = env::set_var("RENV", "test");
//! assert_eq!(std::env::var("RENV").as_deref(), Ok("test"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

/// Variables that steer environment file discovery.
pub const CONTROL_VARS: [&str; 2] = ["RENV", "RENV_ROOT"];

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the global environment lock for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvLock {
    /// Sets `key` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        set_var(key, value)
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        remove_var(key)
    }
}

/// Keeps the environment lock and a set of guards alive together.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvLock,
}

impl EnvScope {
    /// Takes the lock, then runs `builder` to create the scope's guards.
    ///
    /// # Examples
    /// ```
    /// use renv_test_helpers::env;
    ///
    /// let _scope = env::EnvScope::new_with(|lock| vec![lock.remove_var("RENV")]);
    /// assert!(std::env::var("RENV").is_err());
    /// ```
    pub fn new_with<F>(builder: F) -> Self
    where
        F: FnOnce(&EnvLock) -> Vec<EnvVarGuard>,
    {
        let lock = lock();
        let guards = builder(&lock);
        Self {
            guards,
            _lock: lock,
        }
    }

    /// Adds another guard to the scope.
    pub fn push(&mut self, guard: EnvVarGuard) {
        self.guards.push(guard);
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse creation order while the lock is still held.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

fn mutate<K, F>(key: K, mutator: F) -> EnvVarGuard
where
    K: Into<String>,
    F: FnOnce(&str),
{
    let key_string = key.into();
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key_string);
    mutator(&key_string);
    EnvVarGuard {
        key: key_string,
        original,
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use renv_test_helpers::env;
///
/// let _g = env::set_var("RENV_HELPER_DOC", "bar");
/// assert_eq!(std::env::var("RENV_HELPER_DOC").as_deref(), Ok("bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key, |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key, |k| unsafe { env::remove_var(k) })
}

/// Acquires the global environment lock.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Runs `f` while holding the global environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_MUTEX.lock();
    f()
}

/// Takes the lock and clears the discovery control variables.
///
/// Tests that load files into the real environment should also remove the
/// keys those files set, by pushing [`remove_var`] guards onto the scope,
/// so the values do not leak into later tests.
///
/// # Examples
/// ```
/// use renv_test_helpers::env;
///
/// let mut scope = env::isolated();
/// scope.push(env::remove_var("MYVAR"));
/// assert!(std::env::var("RENV").is_err());
/// assert!(std::env::var("RENV_ROOT").is_err());
/// ```
pub fn isolated() -> EnvScope {
    EnvScope::new_with(|lock| CONTROL_VARS.iter().map(|key| lock.remove_var(*key)).collect())
}
