// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the size tree: node identifiers, kinds, colours, and tile geometry.

use core::fmt;

/// Identifier for a node in a [`SizeTree`](crate::SizeTree) (generational).
///
/// A `NodeId` stays valid until the tree it belongs to is discarded. Slots are
/// reused afterwards, but with a bumped generation, so an old id never aliases a
/// newer node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// An RGB fill colour. Each channel is in `0..=255` by construction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Colour {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Colour {
    /// Create a colour from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Integer, axis-aligned rectangle with a top-left origin.
///
/// Layout works in whole units so that sibling tiles share edges exactly.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TileRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl TileRect {
    /// Create a rectangle from its origin and extents.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square units.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether `point` lies inside the rectangle or on its border.
    pub fn contains_inclusive(&self, point: kurbo::Point) -> bool {
        let r = self.to_kurbo();
        point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
    }

    /// Whether the interiors of `self` and `other` overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let a = self.to_kurbo();
        let b = other.to_kurbo();
        a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
    }

    /// Convert to a [`kurbo::Rect`] in the same coordinate space.
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }
}

impl fmt::Display for TileRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}

bitflags::bitflags! {
    /// Structural operations a node kind permits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// The node may be moved under another node.
        const MOVABLE    = 0b0000_0001;
        /// The node's size may be changed directly.
        const RESIZABLE  = 0b0000_0010;
        /// Other nodes may be moved into this node.
        const CONTAINER  = 0b0000_0100;
    }
}

/// The variant of a node.
///
/// Kinds share all tree machinery; they differ in which edits they accept and
/// in how their labels are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A plain weighted node.
    Generic,
    /// A file in a filesystem listing. Never has children.
    File,
    /// A directory in a filesystem listing. Its size is always one more than
    /// the sum of its children.
    Directory,
    /// A position in a game reached by a sequence of moves.
    ChessMove {
        /// True when white makes the next move from this position.
        white_to_play: bool,
    },
}

impl NodeKind {
    /// Operations this kind supports.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Generic => Capabilities::all(),
            Self::File => Capabilities::MOVABLE.union(Capabilities::RESIZABLE),
            Self::Directory => Capabilities::MOVABLE.union(Capabilities::CONTAINER),
            Self::ChessMove { .. } => Capabilities::CONTAINER,
        }
    }

    /// Separator placed between names in a path string.
    pub fn separator(self) -> &'static str {
        match self {
            Self::Generic | Self::ChessMove { .. } => " | ",
            Self::File | Self::Directory => std::path::MAIN_SEPARATOR_STR,
        }
    }

    /// Short lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::File => "file",
            Self::Directory => "directory",
            Self::ChessMove { .. } => "chess move",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural edit named in [`TreeError::Unsupported`](crate::TreeError::Unsupported).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [`SizeTree::move_node`](crate::SizeTree::move_node) on the moved node.
    Move,
    /// [`SizeTree::move_node`](crate::SizeTree::move_node) into the destination.
    MoveInto,
    /// [`SizeTree::change_size`](crate::SizeTree::change_size).
    ChangeSize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Move => "moving",
            Self::MoveInto => "moving into",
            Self::ChangeSize => "resizing",
        })
    }
}

/// A displayed leaf's rectangle and fill, as handed to a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// The displayed leaf.
    pub node: NodeId,
    /// Its laid-out rectangle.
    pub rect: TileRect,
    /// Its fill colour.
    pub colour: Colour,
}
