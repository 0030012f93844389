// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_size_tree --heading-base-level=0

//! Canopy Size Tree: weighted trees that drive proportional treemaps.
//!
//! Every node carries a positive size: its own contribution plus everything
//! below it. A [`SizeTree`] keeps those sizes consistent while you navigate
//! and edit, and partitions a rectangle among a node's children in proportion
//! to their sizes.
//!
//! - Nodes live in an arena and are addressed by generational [`NodeId`]s.
//! - A subset of the tree, the *displayed tree*, is controlled by expanding
//!   and collapsing nodes; its leaves are what a renderer draws.
//! - Nodes can be moved between parents and resized; sizes propagate to every
//!   ancestor and the affected tree is laid out again.
//!
//! ## Node kinds
//!
//! [`NodeKind`] selects which edits a node accepts (see [`Capabilities`]) and
//! how it is labelled:
//! - [`NodeKind::Generic`]: accepts everything.
//! - [`NodeKind::File`]: can be moved and resized but never contains anything.
//! - [`NodeKind::Directory`]: can be moved and contain nodes; its size is
//!   always one more than its children's.
//! - [`NodeKind::ChessMove`]: a position in a game tree; fixed in place.
//!
//! ## API overview
//!
//! - [`SizeTree::insert`] builds a node over existing roots from a [`NodeSpec`].
//! - [`SizeTree::layout`] assigns [`TileRect`]s to a whole subtree.
//! - [`SizeTree::rectangles`] lists the displayed leaves as [`Tile`]s, and
//!   [`SizeTree::node_at`] hit-tests a point against them.
//! - [`SizeTree::expand`], [`SizeTree::expand_all`], [`SizeTree::collapse`],
//!   and [`SizeTree::collapse_all`] drive the displayed tree.
//! - [`SizeTree::move_node`] and [`SizeTree::change_size`] edit the structure.
//! - [`SizeTree::path_string`] and [`SizeTree::display`] produce text labels.
//! - [`SizeTree::check_invariants`] validates a subtree.
//!
//! Failed operations return a [`TreeError`] and leave the tree untouched.
//!
//! ## Colours
//!
//! New nodes draw their colour from the tree's [`ColourSource`]. The default,
//! [`SeededColours`], is a seeded generator, so two trees built the same way
//! get the same colours.
//!
//! ## Example
//!
//! ```rust
//! use canopy_size_tree::{NodeSpec, SizeTree, TileRect};
//! use kurbo::Point;
//!
//! let mut tree = SizeTree::new();
//! let s1 = tree.insert(NodeSpec::generic("C1", 5), &[]).unwrap();
//! let s2 = tree.insert(NodeSpec::generic("C2", 15), &[]).unwrap();
//! let t3 = tree.insert(NodeSpec::generic("C", 1), &[s1, s2]).unwrap();
//! tree.layout(t3, TileRect::new(0, 0, 100, 200)).unwrap();
//!
//! tree.move_node(s2, s1).unwrap();
//! assert_eq!(tree.size(s1), Some(20));
//! assert_eq!(tree.size(t3), Some(21));
//! assert_eq!(tree.rect(s2), Some(TileRect::new(0, 0, 100, 200)));
//! assert_eq!(tree.node_at(t3, Point::new(0.0, 0.0)), Some(s2));
//! ```

mod colour;
mod error;
mod invariants;
mod label;
mod layout;
mod mutation;
mod tree;
mod types;
mod visibility;

pub use colour::{ColourSource, FixedColour, SeededColours};
pub use error::{InvariantViolation, Precondition, TreeError};
pub use label::TreeDisplay;
pub use tree::{NodeSpec, SizeTree};
pub use types::{Capabilities, Colour, NodeId, NodeKind, Operation, Tile, TileRect};
