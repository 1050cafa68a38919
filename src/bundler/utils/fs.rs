//! File system utilities for staging.
//!
//! Provides file and tree copies that create missing directories and merge into existing
//! ones, idempotent removal, and a drop guard for temporary files.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
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

/// Copies one file, keeping permissions and modification time.
///
/// Parent directories of `to` must exist.
fn copy_with_metadata(from: &Path, to: &Path) -> Result<()> {
    std::fs::copy(from, to).fs_context("copying file", from)?;

    // Setting file times needs write access on Windows. Best-effort: read-only copies
    // keep the copy time.
    let kept = std::fs::metadata(from)
        .and_then(|m| m.modified())
        .and_then(|modified| {
            std::fs::File::options()
                .write(true)
                .open(to)?
                .set_modified(modified)
        });
    if let Err(e) = kept {
        log::debug!("Could not keep modification time of {}: {}", to.display(), e);
    }
    Ok(())
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::MissingSource {
            path: from.to_path_buf(),
        });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();
    tokio::task::spawn_blocking(move || copy_with_metadata(&from, &to))
        .await
        .map_err(|e| Error::GenericError(format!("File copy task panicked: {}", e)))?
}

/// Recursively copies a directory into another, creating the destination as necessary.
///
/// Existing content at the destination is kept; files present in both are overwritten.
/// Symlinks are recreated rather than followed.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::MissingSource {
            path: from.to_path_buf(),
        });
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&to).fs_context("creating destination directory", &to)?;

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target =
                    std::fs::read_link(entry.path()).fs_context("reading link", entry.path())?;
                if dest_path.symlink_metadata().is_ok() {
                    std::fs::remove_file(&dest_path)
                        .fs_context("replacing existing link", &dest_path)?;
                }
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("creating link", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)
                    .fs_context("creating directory", &dest_path)?;
            } else {
                copy_with_metadata(entry.path(), &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Deletes a file when dropped.
///
/// Used for intermediate artifacts that must not outlive the stage producing them,
/// whether the stage succeeds or fails.
#[derive(Debug)]
pub struct ScopedFile {
    path: PathBuf,
}

impl ScopedFile {
    /// Takes ownership of the file at `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the guarded path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn copy_file_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        std::fs::write(&src, "hello").unwrap();

        let dest = tmp.path().join("a/b/c.txt");
        copy_file(&src, &dest).await.unwrap();
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "hello");
    }

    #[tokio::test]
    async fn copy_file_keeps_modification_time() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        std::fs::write(&src, "hello").unwrap();
        let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        std::fs::File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(old)
            .unwrap();

        let dest = tmp.path().join("dest.txt");
        copy_file(&src, &dest).await.unwrap();
        assert_eq!(std::fs::metadata(dest).unwrap().modified().unwrap(), old);
    }

    #[tokio::test]
    async fn copy_dir_keeps_modification_time_and_content() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        let file = src.join("nested/data.bin");
        std::fs::write(&file, [1u8, 2, 3]).unwrap();
        let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(2_000_000);
        std::fs::File::options()
            .write(true)
            .open(&file)
            .unwrap()
            .set_modified(old)
            .unwrap();

        let dest = tmp.path().join("dest");
        copy_dir(&src, &dest).await.unwrap();

        let copied = dest.join("nested/data.bin");
        assert_eq!(std::fs::read(&copied).unwrap(), [1u8, 2, 3]);
        assert_eq!(std::fs::metadata(copied).unwrap().modified().unwrap(), old);
    }

    #[tokio::test]
    async fn copy_dir_merges_into_existing_tree() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("nested/new.txt"), "new").unwrap();
        std::fs::write(src.join("shared.txt"), "from source").unwrap();

        let dest = tmp.path().join("dest");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("existing.txt"), "kept").unwrap();
        std::fs::write(dest.join("shared.txt"), "old").unwrap();

        copy_dir(&src, &dest).await.unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("existing.txt")).unwrap(), "kept");
        assert_eq!(
            std::fs::read_to_string(dest.join("shared.txt")).unwrap(),
            "from source"
        );
        assert_eq!(std::fs::read_to_string(dest.join("nested/new.txt")).unwrap(), "new");
    }

    #[tokio::test]
    async fn copy_of_missing_source_is_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = copy_dir(&tmp.path().join("nope"), &tmp.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingSource { .. }));
    }

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("gone");
        std::fs::create_dir_all(dir.join("inner")).unwrap();
        remove_dir_all(&dir).await.unwrap();
        assert!(!dir.exists());
        remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn scoped_file_is_removed_on_drop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("archive.tar");
        std::fs::write(&path, "data").unwrap();
        {
            let guard = ScopedFile::new(&path);
            assert_eq!(guard.path(), path);
        }
        assert!(!path.exists());

        // A guard over a file that never appeared is fine.
        drop(ScopedFile::new(tmp.path().join("never.tar")));
    }
}
