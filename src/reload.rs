//! Poll-based hot reload for the 2-D pattern file.
//!
//! One [`Reloader::poll`] call per frame: when the file's modification
//! timestamp differs from the remembered one, the file is re-parsed and the
//! whole set sequence replaced in one step. A missing file or an unchanged
//! timestamp is a no-op, so reload latency is bounded by the poll cadence.
//! File access goes through [`FileProvider`] so the machine is testable
//! without a real file system.

use std::{
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use crate::{model::PolylineSet, parse::parse_sets};

/// File-system surface the reloader depends on.
pub trait FileProvider {
    fn exists(&self, path: &Path) -> bool;
    fn modified(&self, path: &Path) -> Option<SystemTime>;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Real file system.
pub struct SystemFiles;

impl FileProvider for SystemFiles {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Holds the current polyline-set generation and the timestamp it was built
/// from.
pub struct Reloader {
    path: PathBuf,
    last_modified: Option<SystemTime>,
    sets: Vec<PolylineSet>,
}

impl Reloader {
    /// Parse the file once and remember its timestamp. A missing file is not
    /// an error: the reloader starts empty and picks the file up when it
    /// appears.
    pub fn load(path: impl Into<PathBuf>, files: &dyn FileProvider) -> Self {
        let path = path.into();
        let mut reloader = Self {
            last_modified: None,
            sets: Vec::new(),
            path,
        };
        if files.exists(&reloader.path) {
            if reloader.reparse(files) {
                reloader.last_modified = files.modified(&reloader.path);
            }
        } else {
            tracing::warn!(path = %reloader.path.display(), "input file not found");
        }
        reloader
    }

    /// Current generation; borrow only for the duration of one frame.
    pub fn sets(&self) -> &[PolylineSet] {
        &self.sets
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One poll tick. Returns `true` when a re-parse happened.
    pub fn poll(&mut self, files: &dyn FileProvider) -> bool {
        if !files.exists(&self.path) {
            return false;
        }
        let modified = files.modified(&self.path);
        if modified == self.last_modified {
            return false;
        }
        if self.reparse(files) {
            self.last_modified = modified;
            tracing::debug!(
                path = %self.path.display(),
                sets = self.sets.len(),
                "reloaded pattern file"
            );
            true
        } else {
            false
        }
    }

    /// Build the next generation fully before replacing the old one. A read
    /// error (file vanished between stat and read) keeps the previous
    /// generation and timestamp.
    fn reparse(&mut self, files: &dyn FileProvider) -> bool {
        match files.read_to_string(&self.path) {
            Ok(text) => {
                self.sets = parse_sets(&text);
                true
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read input file");
                false
            }
        }
    }
}
