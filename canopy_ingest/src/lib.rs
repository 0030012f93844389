// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_ingest --heading-base-level=0

//! Canopy Ingest: build [`canopy_size_tree`] trees from external data.
//!
//! Two sources are supported:
//!
//! - **Directory listings.** An [`Entry`] describes a file or a directory and
//!   its contents; [`build_directory_tree`] turns it into file and directory
//!   nodes. With the `fs` feature, [`read_listing`] produces an [`Entry`] from
//!   disk.
//! - **Move sequences.** [`MoveTrie::from_games`] merges games that share an
//!   opening into a prefix trie, and [`build_move_tree`] turns the trie into a
//!   tree of positions sized by the number of games that reached them.
//!   [`move_sequence`] recovers the moves leading to a position.
//!
//! Builders either return a complete root or leave the tree as they found it.
//!
//! ## Example
//!
//! ```rust
//! use canopy_ingest::{Entry, build_directory_tree};
//! use canopy_size_tree::SizeTree;
//!
//! let listing = Entry::directory(
//!     "docs",
//!     vec![Entry::file("a.md", 9), Entry::directory("empty", vec![])],
//! );
//! let mut tree = SizeTree::new();
//! let root = build_directory_tree(&mut tree, &listing).unwrap();
//! // 1 for the directory, 10 for the file, 1 for the empty directory.
//! assert_eq!(tree.size(root), Some(12));
//! ```
//!
//! ## Features
//!
//! - `fs`: read listings from disk with `walkdir`.

mod chess;
#[cfg(feature = "fs")]
mod fs;
mod listing;
mod moves;

pub use chess::{ROOT_LABEL, build_move_tree, move_sequence};
#[cfg(feature = "fs")]
pub use fs::{ListingError, read_listing};
pub use listing::{Entry, build_directory_tree};
pub use moves::{MoveTrie, TrieEdge};
