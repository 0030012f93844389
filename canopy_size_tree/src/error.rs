// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types returned by tree operations and invariant checks.

use crate::types::{NodeId, NodeKind, Operation, TileRect};

/// Failure of a [`SizeTree`](crate::SizeTree) operation.
///
/// An operation that returns an error has not modified the tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// The node's kind does not support the requested edit.
    #[error("{operation} is not supported for {kind} nodes")]
    Unsupported {
        /// The rejected edit.
        operation: Operation,
        /// Kind of the node that rejected it.
        kind: NodeKind,
    },
    /// The caller broke a documented precondition.
    #[error("precondition violated: {0}")]
    Precondition(#[from] Precondition),
}

impl TreeError {
    pub(crate) fn unsupported(operation: Operation, kind: NodeKind) -> Self {
        Self::Unsupported { operation, kind }
    }
}

/// Preconditions checked before a tree is modified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Precondition {
    /// The id does not refer to a live node.
    #[error("{0:?} does not refer to a live node")]
    StaleNode(NodeId),
    /// The node is neither a root nor the child of an expanded node.
    #[error("{0:?} is not part of the displayed tree")]
    NotDisplayed(NodeId),
    /// The node is not a leaf of the displayed tree.
    #[error("{0:?} is not a displayed leaf")]
    NotDisplayedLeaf(NodeId),
    /// A node cannot be moved into itself.
    #[error("{0:?} cannot be moved into itself")]
    SameNode(NodeId),
    /// The tree containing this root has never been laid out.
    #[error("the tree rooted at {0:?} has not been laid out")]
    NotLaidOut(NodeId),
    /// A layout rectangle whose far edge does not fit in `u32`.
    #[error("rectangle {0} extends past the coordinate range")]
    RectOutOfRange(TileRect),
    /// Resize factors must be finite and non-zero.
    #[error("resize factor {0} must be finite and non-zero")]
    InvalidFactor(f64),
    /// Moving the node would leave its old parent with a size of zero.
    #[error("moving the node would leave {0:?} with a size of zero")]
    WouldEmptyParent(NodeId),
    /// A size computation exceeded `u64::MAX`.
    #[error("node sizes would overflow")]
    SizeOverflow,
    /// Only roots can be discarded.
    #[error("{0:?} is not a root")]
    NotRoot(NodeId),
    /// Node names must not be empty.
    #[error("node names must not be empty")]
    EmptyName,
    /// A node without children needs a positive own size.
    #[error("node `{0}` would have a size of zero")]
    ZeroSize(String),
    /// Children handed to a new node must not have a parent yet.
    #[error("{0:?} already has a parent")]
    ChildNotRoot(NodeId),
    /// The same child was listed twice.
    #[error("{0:?} was listed as a child more than once")]
    DuplicateChild(NodeId),
    /// File nodes cannot own children.
    #[error("file `{0}` cannot have children")]
    FileWithChildren(String),
    /// Directory nodes contribute exactly one unit of their own.
    #[error("directory `{0}` must have an own size of 1")]
    DirectoryOwnSize(String),
}

/// A broken representation invariant found by
/// [`SizeTree::check_invariants`](crate::SizeTree::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// The subtree root handed to the check is not live.
    #[error("{0:?} does not refer to a live node")]
    StaleRoot(NodeId),
    /// A node with size zero.
    #[error("{0:?} has size zero")]
    ZeroSize(NodeId),
    /// A node with an empty name.
    #[error("{0:?} has an empty name")]
    EmptyName(NodeId),
    /// A node smaller than the sum of its children.
    #[error("{node:?} has size {size} but its children sum to {children}")]
    SmallerThanChildren {
        /// Offending node.
        node: NodeId,
        /// Its size.
        size: u64,
        /// Sum of its children's sizes.
        children: u64,
    },
    /// A child whose parent link points elsewhere.
    #[error("{child:?} is listed under {parent:?} but does not point back to it")]
    BrokenParentLink {
        /// Listed parent.
        parent: NodeId,
        /// Listed child.
        child: NodeId,
    },
    /// A child id that is not live.
    #[error("{0:?} is listed as a child but is not live")]
    DanglingChild(NodeId),
    /// An expanded node under a collapsed parent.
    #[error("{0:?} is expanded but its parent is not")]
    ExpandedUnderCollapsed(NodeId),
    /// An expanded node with no children.
    #[error("{0:?} is expanded but has no children")]
    ExpandedLeaf(NodeId),
    /// A directory whose size is not one more than its children's sum.
    #[error("directory {0:?} does not account for exactly one unit of its own")]
    DirectorySize(NodeId),
    /// A file with children.
    #[error("file {0:?} has children")]
    FileWithChildren(NodeId),
}
