// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading directory listings from disk.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::listing::Entry;

/// Failure while reading a listing from disk.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// Walking the tree or reading an entry's metadata failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    /// The walk produced no entries at all.
    #[error("nothing to list at {}", .0.display())]
    Empty(PathBuf),
}

/// Read the file or directory at `path` into an [`Entry`].
///
/// Names are base names; a path without one (such as `.`) keeps the path
/// itself. Directory contents are sorted by name and entries whose name starts
/// with `.` are skipped, along with everything below them. Symbolic links are
/// listed as files and never followed.
pub fn read_listing(path: impl AsRef<Path>) -> Result<Entry, ListingError> {
    let path = path.as_ref();
    let walker = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    // Directories still being filled, outermost first; index equals depth.
    let mut open: Vec<(String, Vec<Entry>)> = Vec::new();
    let mut files = 0_usize;
    for item in walker {
        let item = item?;
        while open.len() > item.depth() {
            if let Some(done) = close(&mut open) {
                return Ok(done);
            }
        }
        let name = item.file_name().to_string_lossy().into_owned();
        if item.file_type().is_dir() {
            trace!(path = %item.path().display(), "entering directory");
            open.push((name, Vec::new()));
            continue;
        }
        let file = Entry::file(name, item.metadata()?.len());
        files += 1;
        match open.last_mut() {
            Some((_, entries)) => entries.push(file),
            None => return Ok(file),
        }
    }

    while !open.is_empty() {
        if let Some(done) = close(&mut open) {
            debug!(path = %path.display(), files, "read listing");
            return Ok(done);
        }
    }
    Err(ListingError::Empty(path.to_path_buf()))
}

/// Finish the innermost open directory; returns it once the outermost one closes.
fn close(open: &mut Vec<(String, Vec<Entry>)>) -> Option<Entry> {
    let (name, entries) = open.pop()?;
    let dir = Entry::directory(name, entries);
    match open.last_mut() {
        Some((_, parent)) => {
            parent.push(dir);
            None
        }
        None => Some(dir),
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
