//! Image directory listing.
//!
//! The resolver never touches the filesystem directly for discovery; it asks a
//! [`DirectoryLister`] for the filenames in the image directory. [`FsLister`]
//! reads the real directory, [`MemoryLister`] serves a fixed list (handy when
//! the files come from an asset manifest rather than a directory).
//!
//! Only regular files directly inside the directory are listed. Names are
//! returned in byte-lexical order, which is the order variant rules follow
//! by default. Entries that cannot be inspected (dangling symlinks, loops,
//! permission errors) are skipped; only an unreadable directory fails.

use crate::imaging::is_supported_image;
use crate::naming::looks_like_base;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Source of the filenames in an image directory.
pub trait DirectoryLister: Sync {
    fn list(&self, dir: &Path) -> Result<Vec<String>, ScanError>;
}

/// Lists a directory on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> Result<Vec<String>, ScanError> {
        if !dir.is_dir() {
            return Err(ScanError::NotADirectory(dir.to_path_buf()));
        }
        let mut names = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    debug!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            // Non-UTF-8 names cannot match a base image given as &str.
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// Serves a fixed set of filenames regardless of the directory asked for.
#[derive(Debug, Default, Clone)]
pub struct MemoryLister {
    files: Vec<String>,
}

impl MemoryLister {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = files.into_iter().map(Into::into).collect();
        files.sort();
        Self { files }
    }
}

impl DirectoryLister for MemoryLister {
    fn list(&self, _dir: &Path) -> Result<Vec<String>, ScanError> {
        Ok(self.files.clone())
    }
}

/// Every readable image in `dir` that can act as a base image
/// (`hero.jpg`, not `hero.2x.jpg`).
pub fn find_base_images(
    lister: &(impl DirectoryLister + ?Sized),
    dir: &Path,
) -> Result<Vec<String>, ScanError> {
    Ok(lister
        .list(dir)?
        .into_iter()
        .filter(|name| looks_like_base(name) && is_supported_image(name))
        .collect())
}
