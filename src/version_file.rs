//! The plain-text version file consumed by packaging metadata.
//!
//! Writes go through the [`FileWriter`] trait so the update step can be
//! exercised against an in-memory store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Narrow file access used by the version-file update step
pub trait FileWriter {
    /// Current contents of `path`, or `None` if the file does not exist
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the whole contents of `path` with `content`
    fn overwrite(&self, path: &Path, content: &str) -> Result<()>;
}

/// [`FileWriter`] backed by the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileWriter;

impl FileWriter for FsFileWriter {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn overwrite(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }
}

/// In-memory [`FileWriter`] for tests
#[derive(Debug, Default)]
pub struct MemoryFileWriter {
    files: RefCell<HashMap<PathBuf, String>>,
    writes: RefCell<usize>,
}

impl MemoryFileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without counting it as a write
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Number of `overwrite` calls made so far
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl FileWriter for MemoryFileWriter {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.contents(path))
    }

    fn overwrite(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

/// Result of bringing the version file in line with the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionFileUpdate {
    /// The file already held this version; nothing was written
    Unchanged { version: String },
    /// The file was (re)written; `previous` is `None` when it did not exist
    Updated {
        previous: Option<String>,
        current: String,
    },
}

impl VersionFileUpdate {
    pub fn version(&self) -> &str {
        match self {
            VersionFileUpdate::Unchanged { version } => version,
            VersionFileUpdate::Updated { current, .. } => current,
        }
    }
}

/// Overwrite the version file at `path` with `version` plus a trailing newline.
///
/// The file is only rewritten when its trimmed contents differ from `version`,
/// so repeated runs on an unchanged changelog leave it untouched.
pub fn update_version_file<W: FileWriter + ?Sized>(
    writer: &W,
    path: &Path,
    version: &str,
) -> Result<VersionFileUpdate> {
    let previous = writer
        .read(path)?
        .map(|content| content.trim().to_string());

    if previous.as_deref() == Some(version) {
        tracing::debug!(path = %path.display(), version, "version file already current");
        return Ok(VersionFileUpdate::Unchanged {
            version: version.to_string(),
        });
    }

    writer.overwrite(path, &format!("{}\n", version))?;
    tracing::info!(
        path = %path.display(),
        previous = previous.as_deref().unwrap_or("<none>"),
        current = version,
        "version file updated"
    );

    Ok(VersionFileUpdate::Updated {
        previous,
        current: version.to_string(),
    })
}
