// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural edits: moving nodes and changing their size.
//!
//! Both edits validate everything up front and only then touch the tree, so a
//! failed edit leaves sizes, links, flags, and rectangles exactly as they were.
//! A successful edit re-runs layout over the affected root with the root's
//! current rectangle.

use tracing::debug;

use crate::colour::ColourSource;
use crate::error::{Precondition, TreeError};
use crate::tree::{Ancestors, SizeTree};
use crate::types::{Capabilities, NodeId, Operation};

impl<C: ColourSource> SizeTree<C> {
    /// Move `id` to become the last child of `destination`.
    ///
    /// Both nodes must be distinct displayed leaves, and the destination's tree
    /// must have been laid out. The moved node's size is subtracted from its old
    /// ancestors and added to its new ones; if the old parent is left without
    /// children it is collapsed. The destination becomes expanded.
    ///
    /// Chess moves cannot be moved, and nothing can be moved into a file.
    pub fn move_node(&mut self, id: NodeId, destination: NodeId) -> Result<(), TreeError> {
        let kind = self.live(id)?.kind;
        let destination_kind = self.live(destination)?.kind;
        if !kind.capabilities().contains(Capabilities::MOVABLE) {
            return Err(TreeError::unsupported(Operation::Move, kind));
        }
        if !destination_kind
            .capabilities()
            .contains(Capabilities::CONTAINER)
        {
            return Err(TreeError::unsupported(
                Operation::MoveInto,
                destination_kind,
            ));
        }
        if id == destination {
            return Err(Precondition::SameNode(id).into());
        }
        self.require_displayed_leaf(id)?;
        self.require_displayed_leaf(destination)?;

        let old_chain = self.ancestors(id);
        let mut new_chain = Ancestors::new();
        new_chain.push(destination);
        new_chain.extend(self.ancestors(destination));
        let new_root = *new_chain.last().unwrap_or(&destination);
        if self.node(new_root).rect.is_none() {
            return Err(Precondition::NotLaidOut(new_root).into());
        }

        let size = self.node(id).size;
        if let Some(&old_parent) = old_chain.first()
            && self.node(old_parent).size == size
        {
            return Err(Precondition::WouldEmptyParent(old_parent).into());
        }
        for &ancestor in new_chain.iter().filter(|a| !old_chain.contains(*a)) {
            self.node(ancestor)
                .size
                .checked_add(size)
                .ok_or(Precondition::SizeOverflow)?;
        }

        self.node_mut(destination).children.push(id);
        if let Some(&old_parent) = old_chain.first() {
            let parent = self.node_mut(old_parent);
            parent.children.retain(|&c| c != id);
            if parent.children.is_empty() {
                parent.expanded = false;
            }
        }
        for &ancestor in &old_chain {
            self.node_mut(ancestor).size -= size;
        }
        self.node_mut(id).parent = Some(destination);
        self.node_mut(destination).expanded = true;
        for &ancestor in &new_chain {
            self.node_mut(ancestor).size += size;
        }

        self.relayout_root(new_root);
        if let Some(&old_root) = old_chain.last()
            && old_root != new_root
        {
            self.relayout_root(old_root);
        }
        debug!(?id, ?destination, size, "moved node");
        Ok(())
    }

    /// Grow or shrink `id` by `factor` of its current size.
    ///
    /// The change is `floor(factor * size)` for negative factors and
    /// `ceil(factor * size)` otherwise. A leaf never drops below 1 and a node
    /// with children never drops below the sum of its children. The difference
    /// is applied to every ancestor, then the tree is laid out again.
    ///
    /// `id` must be a displayed leaf of a laid-out tree and `factor` must be
    /// finite and non-zero. Directories and chess moves cannot be resized.
    pub fn change_size(&mut self, id: NodeId, factor: f64) -> Result<(), TreeError> {
        if !factor.is_finite() || factor == 0.0 {
            return Err(Precondition::InvalidFactor(factor).into());
        }
        let kind = self.live(id)?.kind;
        if !kind.capabilities().contains(Capabilities::RESIZABLE) {
            return Err(TreeError::unsupported(Operation::ChangeSize, kind));
        }
        self.require_displayed_leaf(id)?;
        let ancestors = self.ancestors(id);
        let root = *ancestors.last().unwrap_or(&id);
        if self.node(root).rect.is_none() {
            return Err(Precondition::NotLaidOut(root).into());
        }

        let node = self.node(id);
        let old = node.size;
        let floor = if node.children.is_empty() {
            1
        } else {
            node.children.iter().map(|&c| self.node(c).size).sum()
        };
        let new = resized(old, factor, floor).ok_or(Precondition::SizeOverflow)?;
        if new > old {
            let grow = new - old;
            for &ancestor in &ancestors {
                self.node(ancestor)
                    .size
                    .checked_add(grow)
                    .ok_or(Precondition::SizeOverflow)?;
            }
        }

        self.node_mut(id).size = new;
        for &ancestor in &ancestors {
            let a = self.node_mut(ancestor);
            a.size = a.size - old + new;
        }
        self.relayout_root(root);
        debug!(?id, old, new, "resized node");
        Ok(())
    }
}

/// New size after scaling `size` by `factor`, clamped below at `floor`.
///
/// Returns `None` when the result does not fit in a `u64`.
fn resized(size: u64, factor: f64, floor: u64) -> Option<u64> {
    #[allow(clippy::cast_precision_loss, reason = "sizes are weights, not counts.")]
    let product = factor * size as f64;
    let delta = if factor < 0.0 {
        product.floor()
    } else {
        product.ceil()
    };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts saturate; out-of-range results are rejected below."
    )]
    let delta = delta as i128;
    let candidate = i128::from(size).saturating_add(delta);
    u64::try_from(candidate.max(i128::from(floor))).ok()
}
