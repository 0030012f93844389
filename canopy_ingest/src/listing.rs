// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directory listings and the file trees built from them.

use canopy_size_tree::{ColourSource, NodeId, NodeSpec, Precondition, SizeTree, TreeError};
use tracing::debug;

/// One entry of a directory listing.
///
/// Entries are expected to arrive already sorted by name with hidden entries
/// removed; [`build_directory_tree`] keeps whatever order it is given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// A regular file and its size as reported by the filesystem.
    File {
        /// Base name of the file.
        name: String,
        /// Size in bytes.
        size: u64,
    },
    /// A directory and its contents.
    Directory {
        /// Base name of the directory.
        name: String,
        /// Contained entries, in display order.
        entries: Vec<Entry>,
    },
}

impl Entry {
    /// A file entry.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self::File {
            name: name.into(),
            size,
        }
    }

    /// A directory entry.
    pub fn directory(name: impl Into<String>, entries: Vec<Self>) -> Self {
        Self::Directory {
            name: name.into(),
            entries,
        }
    }

    /// The entry's base name.
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }
}

/// Build a file tree from `entry` and return its root.
///
/// Files become [`NodeKind::File`](canopy_size_tree::NodeKind::File) nodes one
/// unit larger than their reported size, so empty files still get a tile.
/// Directories become [`NodeKind::Directory`](canopy_size_tree::NodeKind::Directory)
/// nodes, which add one unit to their contents. A bare file yields a single
/// file root.
///
/// On error, every node built so far is discarded again.
pub fn build_directory_tree<C: ColourSource>(
    tree: &mut SizeTree<C>,
    entry: &Entry,
) -> Result<NodeId, TreeError> {
    let root = build_entry(tree, entry)?;
    debug!(?root, name = entry.name(), size = tree.size(root), "built directory tree");
    Ok(root)
}

fn build_entry<C: ColourSource>(
    tree: &mut SizeTree<C>,
    entry: &Entry,
) -> Result<NodeId, TreeError> {
    match entry {
        Entry::File { name, size } => {
            let size = size.checked_add(1).ok_or(Precondition::SizeOverflow)?;
            tree.insert(NodeSpec::file(name.as_str(), size), &[])
        }
        Entry::Directory { name, entries } => {
            let mut children = Vec::with_capacity(entries.len());
            for child in entries {
                match build_entry(tree, child) {
                    Ok(id) => children.push(id),
                    Err(err) => return Err(abandon(tree, &children, err)),
                }
            }
            tree.insert(NodeSpec::directory(name.as_str()), &children)
                .map_err(|err| abandon(tree, &children, err))
        }
    }
}

/// Discard partially built subtrees and hand back the error that stopped the build.
pub(crate) fn abandon<C: ColourSource>(
    tree: &mut SizeTree<C>,
    built: &[NodeId],
    err: TreeError,
) -> TreeError {
    for &id in built {
        // Freshly built roots; discarding them cannot fail.
        let _ = tree.discard(id);
    }
    err
}
