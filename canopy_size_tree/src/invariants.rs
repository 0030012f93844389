// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural validation of a subtree.

use crate::colour::ColourSource;
use crate::error::InvariantViolation;
use crate::tree::SizeTree;
use crate::types::{NodeId, NodeKind};

impl<C: ColourSource> SizeTree<C> {
    /// Check every representation invariant over the subtree rooted at `root`.
    ///
    /// Every public operation preserves these invariants, so a failure here
    /// means a bug in this crate. Returns the first violation found in
    /// pre-order.
    pub fn check_invariants(&self, root: NodeId) -> Result<(), InvariantViolation> {
        let top = self.live(root).map_err(|_| InvariantViolation::StaleRoot(root))?;
        if top.expanded
            && let Some(parent) = top.parent
            && !self.node(parent).expanded
        {
            return Err(InvariantViolation::ExpandedUnderCollapsed(root));
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.size == 0 {
                return Err(InvariantViolation::ZeroSize(id));
            }
            if node.name.is_empty() {
                return Err(InvariantViolation::EmptyName(id));
            }
            if node.children.is_empty() && node.expanded {
                return Err(InvariantViolation::ExpandedLeaf(id));
            }

            let mut children = 0_u64;
            for &child in &node.children {
                let Ok(c) = self.live(child) else {
                    return Err(InvariantViolation::DanglingChild(child));
                };
                if c.parent != Some(id) {
                    return Err(InvariantViolation::BrokenParentLink { parent: id, child });
                }
                if c.expanded && !node.expanded {
                    return Err(InvariantViolation::ExpandedUnderCollapsed(child));
                }
                children = children.saturating_add(c.size);
            }
            if node.size < children {
                return Err(InvariantViolation::SmallerThanChildren {
                    node: id,
                    size: node.size,
                    children,
                });
            }
            match node.kind {
                NodeKind::Directory if node.size != children.saturating_add(1) => {
                    return Err(InvariantViolation::DirectorySize(id));
                }
                NodeKind::File if !node.children.is_empty() => {
                    return Err(InvariantViolation::FileWithChildren(id));
                }
                _ => {}
            }
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeSpec;

    fn small(tree: &mut SizeTree) -> (NodeId, NodeId, NodeId) {
        let a = tree.insert(NodeSpec::generic("a", 2), &[]).unwrap();
        let b = tree.insert(NodeSpec::file("b", 3), &[]).unwrap();
        let dir = tree.insert(NodeSpec::directory("dir"), &[a, b]).unwrap();
        (a, b, dir)
    }

    #[test]
    fn fresh_trees_are_valid() {
        let mut tree = SizeTree::new();
        let (a, _, dir) = small(&mut tree);
        assert_eq!(tree.check_invariants(dir), Ok(()));
        assert_eq!(tree.check_invariants(a), Ok(()));
    }

    #[test]
    fn detects_size_and_kind_violations() {
        let mut tree = SizeTree::new();
        let (a, b, dir) = small(&mut tree);

        tree.node_mut(dir).size = 7;
        assert_eq!(
            tree.check_invariants(dir),
            Err(InvariantViolation::DirectorySize(dir))
        );
        tree.node_mut(dir).size = 4;
        assert_eq!(
            tree.check_invariants(dir),
            Err(InvariantViolation::SmallerThanChildren {
                node: dir,
                size: 4,
                children: 5
            })
        );
        tree.node_mut(dir).size = 6;
        tree.node_mut(a).size = 0;
        assert_eq!(
            tree.check_invariants(a),
            Err(InvariantViolation::ZeroSize(a))
        );
        tree.node_mut(a).size = 2;
        tree.node_mut(b).children.push(a);
        assert_eq!(
            tree.check_invariants(b),
            Err(InvariantViolation::BrokenParentLink { parent: b, child: a })
        );
    }

    #[test]
    fn detects_expansion_violations() {
        let mut tree = SizeTree::new();
        let (a, _, dir) = small(&mut tree);

        tree.node_mut(a).expanded = true;
        assert_eq!(
            tree.check_invariants(dir),
            Err(InvariantViolation::ExpandedLeaf(a))
        );
        tree.node_mut(a).expanded = false;

        let top = tree.insert(NodeSpec::generic("top", 1), &[dir]).unwrap();
        tree.node_mut(top).expanded = false;
        assert_eq!(
            tree.check_invariants(top),
            Err(InvariantViolation::ExpandedUnderCollapsed(dir))
        );
        assert_eq!(
            tree.check_invariants(dir),
            Err(InvariantViolation::ExpandedUnderCollapsed(dir))
        );
    }

    #[test]
    fn stale_roots_are_reported() {
        let mut tree = SizeTree::new();
        let (_, _, dir) = small(&mut tree);
        tree.discard(dir).unwrap();
        assert_eq!(
            tree.check_invariants(dir),
            Err(InvariantViolation::StaleRoot(dir))
        );
    }
}
