//! File system access for bundling.
//!
//! The pipeline talks to the disk only through [`FileSystem`], so tests can
//! observe every copy and delete. [`LocalFileSystem`] is the real
//! implementation: recursive copies preserve symlinks (framework bundles on
//! macOS are full of them) and deletes are idempotent.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    future::Future,
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name of the entry
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is itself a directory
    pub is_dir: bool,
}

/// File system primitives the pipeline depends on.
pub trait FileSystem {
    /// Recursively copies directory `from` to `to`.
    ///
    /// Fails if `from` is not a directory or `to` already exists.
    fn copy_dir(&self, from: &Path, to: &Path) -> impl Future<Output = Result<()>> + Send;

    /// Recursively deletes `path`. A missing path is not an error.
    fn remove_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

    /// Lists the immediate children of directory `path`.
    fn list_dir(&self, path: &Path) -> impl Future<Output = Result<Vec<DirEntry>>> + Send;

    /// Creates `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    async fn copy_dir(&self, from: &Path, to: &Path) -> Result<()> {
        copy_dir(from, to).await
    }

    async fn remove_all(&self, path: &Path) -> Result<()> {
        remove_all(path).await
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut reader = fs::read_dir(path)
            .await
            .fs_context("reading directory", path)?;
        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .fs_context("reading directory entry in", path)?
        {
            let file_type = entry
                .file_type()
                .await
                .fs_context("reading file type of", entry.path())?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_dir: file_type.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .await
            .fs_context("creating directory", path)
    }
}

/// Deletes `path` (file or directory tree). Missing paths are ignored.
pub async fn remove_all(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("reading metadata of", path),
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing", path),
    }
}

/// Deletes `path` without failing the caller.
///
/// Used for pre-existing outputs, thinned copies and intermediate build
/// directories; a failure is logged and swallowed.
pub async fn remove_best_effort<F: FileSystem>(fs: &F, path: &Path, what: &str) {
    match fs.remove_all(path).await {
        Ok(()) => log::debug!("Removed {}: {}", what, path.display()),
        Err(e) => log::warn!("Could not remove {} {}: {}", what, path.display(), e),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist,
/// or if the destination path already exists.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::Fs {
            context: "copying (not a directory)",
            path: from.to_path_buf(),
            error: io::Error::from(io::ErrorKind::NotFound),
        });
    }
    if to.exists() {
        return Err(Error::Fs {
            context: "copying to existing destination",
            path: to.to_path_buf(),
            error: io::Error::from(io::ErrorKind::AlreadyExists),
        });
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target =
                    std::fs::read_link(entry.path()).fs_context("reading link", entry.path())?;
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("creating link", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying", entry.path())?;
            }
        }

        Ok(())
    })
    .await?
}
