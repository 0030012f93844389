// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The displayed tree: expanding and collapsing nodes.
//!
//! A node is *displayed* when it is a root or its parent is expanded. A
//! displayed node that is not itself expanded is a *displayed leaf*; those are
//! the nodes a renderer draws.

use tracing::trace;

use crate::colour::ColourSource;
use crate::error::{Precondition, TreeError};
use crate::tree::SizeTree;
use crate::types::NodeId;

impl<C: ColourSource> SizeTree<C> {
    /// Whether `id` is part of the displayed tree.
    pub fn is_displayed(&self, id: NodeId) -> bool {
        self.live(id)
            .is_ok_and(|n| n.parent.is_none_or(|p| self.node(p).expanded))
    }

    /// Whether `id` is a leaf of the displayed tree.
    pub fn is_displayed_leaf(&self, id: NodeId) -> bool {
        self.is_displayed(id) && !self.node(id).expanded
    }

    /// Expand `id` and return its first child.
    ///
    /// A node without children cannot be expanded; it is returned unchanged.
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        self.require_displayed(id)?;
        let node = self.node_mut(id);
        let Some(&first) = node.children.first() else {
            return Ok(id);
        };
        node.expanded = true;
        trace!(?id, "expanded");
        Ok(first)
    }

    /// Expand `id` and every node below it.
    ///
    /// Returns the last node reached when walking children in order: the
    /// deepest node along the chain of last children, or `id` itself when it
    /// has no children.
    pub fn expand_all(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        self.require_displayed(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current);
            if !node.children.is_empty() {
                node.expanded = true;
                stack.extend_from_slice(&node.children);
            }
        }
        let mut last = id;
        while let Some(&child) = self.node(last).children.last() {
            last = child;
        }
        trace!(?id, ?last, "expanded subtree");
        Ok(last)
    }

    /// Remove `id` from the displayed tree by collapsing its parent.
    ///
    /// The parent and everything below it become unexpanded, so the parent is
    /// the new displayed leaf and is returned. Collapsing a root does nothing
    /// and returns the root.
    pub fn collapse(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        self.require_displayed_leaf(id)?;
        Ok(self.collapse_unchecked(id))
    }

    /// Collapse the whole displayed tree containing `id` down to its root.
    pub fn collapse_all(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        self.require_displayed_leaf(id)?;
        let mut current = id;
        loop {
            let next = self.collapse_unchecked(current);
            if next == current {
                return Ok(current);
            }
            current = next;
        }
    }

    fn collapse_unchecked(&mut self, id: NodeId) -> NodeId {
        let Some(parent) = self.node(id).parent else {
            return id;
        };
        self.unexpand_subtree(parent);
        trace!(?id, ?parent, "collapsed");
        parent
    }

    /// Clear `expanded` on `id` and all of its descendants.
    pub(crate) fn unexpand_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current);
            if !node.children.is_empty() {
                node.expanded = false;
                stack.extend_from_slice(&node.children);
            }
        }
    }

    pub(crate) fn require_displayed(&self, id: NodeId) -> Result<(), Precondition> {
        self.live(id)?;
        if self.is_displayed(id) {
            Ok(())
        } else {
            Err(Precondition::NotDisplayed(id))
        }
    }

    pub(crate) fn require_displayed_leaf(&self, id: NodeId) -> Result<(), Precondition> {
        self.live(id)?;
        if self.is_displayed_leaf(id) {
            Ok(())
        } else {
            Err(Precondition::NotDisplayedLeaf(id))
        }
    }
}
