//! Temporary directories holding configuration files.
//!
//! # Examples
//!
//! ```
//! use zdcf_test_helpers::files::FixtureDir;
//!
//! let dir = FixtureDir::new()?;
//! let path = dir.write("base.zpl", "version = 0.1\n")?;
//! assert!(path.starts_with(dir.path()));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed when dropped.
#[derive(Debug)]
pub struct FixtureDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl FixtureDir {
    /// Create a fresh, empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create fixture directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("non-UTF-8 temporary path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Directory root.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `name` inside the directory and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}
