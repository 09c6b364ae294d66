//! Temporary project trees for exercising environment file discovery.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory tree, removed when dropped.
///
/// The root is canonicalised on creation, so paths built from it compare
/// equal to the canonical paths the locator returns.
///
/// # Examples
///
/// ```
/// use renv_test_helpers::ProjectTree;
///
/// # fn main() -> anyhow::Result<()> {
/// let tree = ProjectTree::new()?;
/// let env_file = tree.write("service/.env", "PORT=8080\n")?;
/// let start = tree.mkdir("service/src/handlers")?;
/// assert!(start.starts_with(tree.root()));
/// assert!(env_file.as_std_path().is_file());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ProjectTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ProjectTree {
    /// Creates an empty tree in the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its canonical
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create project tree")?;
        let canonical = canonicalize(dir.path()).context("canonicalise project tree")?;
        let root = Utf8PathBuf::from_path_buf(canonical)
            .map_err(|path| anyhow!("project tree is not valid UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Canonical root of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `rel` inside the tree, without touching the filesystem.
    #[must_use]
    pub fn path(&self, rel: &str) -> Utf8PathBuf {
        self.root.join(rel)
    }

    /// Creates `rel` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn mkdir(&self, rel: &str) -> Result<Utf8PathBuf> {
        let dir = self.path(rel);
        std::fs::create_dir_all(&dir).with_context(|| format!("create {dir}"))?;
        Ok(dir)
    }

    /// Writes `contents` to `rel`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the file cannot be written.
    pub fn write(&self, rel: &str, contents: &str) -> Result<Utf8PathBuf> {
        let file = self.path(rel);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&file, contents).with_context(|| format!("write {file}"))?;
        Ok(file)
    }
}

fn canonicalize(path: &std::path::Path) -> std::io::Result<std::path::PathBuf> {
    #[cfg(windows)]
    {
        dunce::canonicalize(path)
    }
    #[cfg(not(windows))]
    {
        std::fs::canonicalize(path)
    }
}
