// prbump: PR Branch Version Bump Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Where the updater reads and writes file content.
//!
//! ```text
//! FileSource (read)  <-- CommitSnapshot   branch head via Gateway (dry-run)
//!     ^
//! FileStore (write)  <-- WorkTreeFiles    checked-out tree, atomic writes
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BumpError, FsError};
use crate::git::{Gateway, TreeEntry};

/// Content of one path as seen by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFile {
    Missing,
    NotRegular,
    Text(String),
}

/// Read access to repository-relative paths.
pub trait FileSource {
    /// # Errors
    ///
    /// Returns an `FsError` if the path exists but cannot be read as UTF-8.
    fn read(&self, path: &str) -> Result<SourceFile, FsError>;
}

/// A source that can also be written back.
pub trait FileStore: FileSource {
    /// Replace the content of `path`.
    ///
    /// # Errors
    ///
    /// Returns an `FsError` if the write fails; the original is left intact.
    fn write(&mut self, path: &str, content: &str) -> Result<(), FsError>;
}

fn io_error(path: &Path, source: std::io::Error) -> FsError {
    FsError::IoError {
        path: path.display().to_string(),
        source,
    }
}

fn decode(path: &str, bytes: Vec<u8>) -> Result<SourceFile, FsError> {
    String::from_utf8(bytes)
        .map(SourceFile::Text)
        .map_err(|_| FsError::InvalidUtf8 {
            path: path.to_string(),
        })
}

/// Files in the checked-out work tree.
#[derive(Debug, Clone)]
pub struct WorkTreeFiles {
    root: PathBuf,
}

impl WorkTreeFiles {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSource for WorkTreeFiles {
    fn read(&self, path: &str) -> Result<SourceFile, FsError> {
        let full = self.root.join(path);
        let metadata = match std::fs::symlink_metadata(&full) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SourceFile::Missing),
            Err(e) => return Err(io_error(&full, e)),
        };
        if !metadata.is_file() {
            return Ok(SourceFile::NotRegular);
        }

        let bytes = std::fs::read(&full).map_err(|e| io_error(&full, e))?;
        decode(path, bytes)
    }
}

impl FileStore for WorkTreeFiles {
    fn write(&mut self, path: &str, content: &str) -> Result<(), FsError> {
        let full = self.root.join(path);
        let dir = full
            .parent()
            .ok_or_else(|| FsError::NotFound(full.display().to_string()))?;
        let permissions = std::fs::metadata(&full)
            .map_err(|e| io_error(&full, e))?
            .permissions();

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| io_error(temp.path(), e))?;
        std::fs::set_permissions(temp.path(), permissions).map_err(|e| io_error(temp.path(), e))?;
        temp.persist(&full).map_err(|e| io_error(&full, e.error))?;
        Ok(())
    }
}

/// Files as committed at one revision, read through the gateway.
pub struct CommitSnapshot<'a, G: Gateway + ?Sized> {
    gateway: &'a G,
    commit: &'a str,
}

impl<'a, G: Gateway + ?Sized> CommitSnapshot<'a, G> {
    pub const fn new(gateway: &'a G, commit: &'a str) -> Self {
        Self { gateway, commit }
    }
}

impl<G: Gateway + ?Sized> FileSource for CommitSnapshot<'_, G> {
    fn read(&self, path: &str) -> Result<SourceFile, FsError> {
        match self.gateway.read_file_at(self.commit, path) {
            Ok(TreeEntry::File(bytes)) => decode(path, bytes),
            Ok(TreeEntry::NotRegular) => Ok(SourceFile::NotRegular),
            Ok(TreeEntry::Absent) => Ok(SourceFile::Missing),
            Err(e) => Err(FsError::IoError {
                path: format!("{}:{path}", self.commit),
                source: into_io(e),
            }),
        }
    }
}

fn into_io(err: BumpError) -> std::io::Error {
    match err {
        BumpError::Io(e) => *e,
        other => std::io::Error::other(other.to_string()),
    }
}
