// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proportional slice layout and the queries that read its results.

use kurbo::Point;
use tracing::trace;

use crate::colour::ColourSource;
use crate::error::{Precondition, TreeError};
use crate::tree::SizeTree;
use crate::types::{NodeId, Tile, TileRect};

impl<C: ColourSource> SizeTree<C> {
    /// Lay out the subtree rooted at `id` inside `rect`.
    ///
    /// Every node in the subtree receives a rectangle, whether or not it is
    /// currently displayed:
    /// - a node with one child passes its rectangle down unchanged;
    /// - a node with several children slices its rectangle along the longer
    ///   side (width when `width > height`, height otherwise), giving each
    ///   child `floor(child.size * extent / total)` of it in order, where
    ///   `total` is the sum of the children's sizes. The last child takes
    ///   whatever remains, so the slices always tile the parent exactly.
    ///
    /// `rect` must not extend past `u32::MAX` on either axis.
    pub fn layout(&mut self, id: NodeId, rect: TileRect) -> Result<(), TreeError> {
        self.live(id)?;
        if rect.x.checked_add(rect.width).is_none() || rect.y.checked_add(rect.height).is_none() {
            return Err(Precondition::RectOutOfRange(rect).into());
        }
        trace!(?id, %rect, "layout");
        self.layout_subtree(id, rect);
        Ok(())
    }

    /// Re-run layout over the tree rooted at `root` with its current rectangle.
    pub(crate) fn relayout_root(&mut self, root: NodeId) {
        if let Some(rect) = self.node(root).rect {
            self.layout_subtree(root, rect);
        }
    }

    fn layout_subtree(&mut self, root: NodeId, rect: TileRect) {
        let mut stack = vec![(root, rect)];

        while let Some((id, rect)) = stack.pop() {
            self.node_mut(id).rect = Some(rect);
            let children = self.node(id).children.as_slice();
            let Some((&last, init)) = children.split_last() else {
                continue;
            };
            if init.is_empty() {
                stack.push((last, rect));
                continue;
            }

            let total: u128 = children
                .iter()
                .map(|&c| u128::from(self.node(c).size))
                .sum();
            let split_width = rect.width > rect.height;
            let (origin, extent) = if split_width {
                (rect.x, rect.width)
            } else {
                (rect.y, rect.height)
            };
            let slice = |start: u32, len: u32| {
                if split_width {
                    TileRect::new(start, rect.y, len, rect.height)
                } else {
                    TileRect::new(rect.x, start, rect.width, len)
                }
            };

            let mut cursor = origin;
            for &child in init {
                let share = proportional_share(self.node(child).size, total, extent);
                stack.push((child, slice(cursor, share)));
                cursor += share;
            }
            stack.push((last, slice(cursor, origin + extent - cursor)));
        }
    }

    /// Rectangles and colours of the displayed leaves below `id`, in natural order.
    ///
    /// Returns nothing when `id` is not part of the displayed tree. Leaves that
    /// have never been laid out are skipped.
    pub fn rectangles(&self, id: NodeId) -> Vec<Tile> {
        let mut out = Vec::new();
        if !self.is_displayed(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.expanded {
                stack.extend(node.children.iter().rev().copied());
            } else if let Some(rect) = node.rect {
                out.push(Tile {
                    node: id,
                    rect,
                    colour: node.colour,
                });
            }
        }
        out
    }

    /// The displayed leaf below `id` whose rectangle contains `point`.
    ///
    /// Rectangle borders count as inside; when `point` sits on an edge shared
    /// by several leaves, the first one in natural order wins. Returns `None`
    /// when `point` is outside `id`'s rectangle, or `id` is not displayed.
    pub fn node_at(&self, id: NodeId, point: Point) -> Option<NodeId> {
        if !self.is_displayed(id) {
            return None;
        }
        self.node_at_inner(id, point)
    }

    fn node_at_inner(&self, id: NodeId, point: Point) -> Option<NodeId> {
        let node = self.node(id);
        if !node.rect?.contains_inclusive(point) {
            return None;
        }
        if !node.expanded {
            return Some(id);
        }
        node.children
            .iter()
            .find_map(|&child| self.node_at_inner(child, point))
    }
}

/// `floor(size * extent / total)`, which never exceeds `extent` when `size <= total`.
fn proportional_share(size: u64, total: u128, extent: u32) -> u32 {
    let share = u128::from(size) * u128::from(extent) / total;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "a child's share is bounded by the parent's extent."
    )]
    let share = share as u32;
    share
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeSpec;
    use proptest::prelude::*;

    #[test]
    fn single_child_inherits_rect() {
        let mut tree = SizeTree::new();
        let b = tree.insert(NodeSpec::generic("B", 5), &[]).unwrap();
        let a = tree.insert(NodeSpec::generic("A", 1), &[b]).unwrap();
        tree.layout(a, TileRect::new(0, 0, 100, 200)).unwrap();
        assert_eq!(tree.rect(a), Some(TileRect::new(0, 0, 100, 200)));
        assert_eq!(tree.rect(b), Some(TileRect::new(0, 0, 100, 200)));
        assert_eq!(tree.rectangles(a)[0].rect, TileRect::new(0, 0, 100, 200));
    }

    #[test]
    fn slices_along_longer_side_with_remainder_to_last() {
        let mut tree = SizeTree::new();
        let j = tree.insert(NodeSpec::generic("j", 10), &[]).unwrap();
        let k = tree.insert(NodeSpec::generic("k", 5), &[]).unwrap();
        let e = tree.insert(NodeSpec::generic("e", 5), &[j, k]).unwrap();
        let f = tree.insert(NodeSpec::generic("f", 5), &[]).unwrap();
        let b = tree.insert(NodeSpec::generic("b", 5), &[e, f]).unwrap();
        let g = tree.insert(NodeSpec::generic("g", 4), &[]).unwrap();
        let h = tree.insert(NodeSpec::generic("h", 4), &[]).unwrap();
        let i = tree.insert(NodeSpec::generic("i", 2), &[]).unwrap();
        let c = tree.insert(NodeSpec::generic("c", 5), &[g, h, i]).unwrap();
        let d = tree.insert(NodeSpec::generic("d", 10), &[]).unwrap();
        let a = tree.insert(NodeSpec::generic("a", 5), &[b, c, d]).unwrap();
        tree.layout(a, TileRect::new(0, 0, 55, 30)).unwrap();

        // Children of `a` weigh 30, 15 and 10; the 55-wide rect is split by width.
        assert_eq!(tree.rect(b), Some(TileRect::new(0, 0, 30, 30)));
        assert_eq!(tree.rect(c), Some(TileRect::new(30, 0, 15, 30)));
        assert_eq!(tree.rect(d), Some(TileRect::new(45, 0, 10, 30)));
        // `b` is square, so it splits by height: 20/25 of 30 rows, then the rest.
        assert_eq!(tree.rect(e), Some(TileRect::new(0, 0, 30, 24)));
        assert_eq!(tree.rect(f), Some(TileRect::new(0, 24, 30, 6)));
        assert_eq!(tree.rect(j), Some(TileRect::new(0, 0, 20, 24)));
        assert_eq!(tree.rect(k), Some(TileRect::new(20, 0, 10, 24)));
        // `c` is taller than wide: 4/10 and 4/10 of 30 rows, remainder to `i`.
        assert_eq!(tree.rect(g), Some(TileRect::new(30, 0, 15, 12)));
        assert_eq!(tree.rect(h), Some(TileRect::new(30, 12, 15, 12)));
        assert_eq!(tree.rect(i), Some(TileRect::new(30, 24, 15, 6)));
    }

    #[test]
    fn rectangles_follow_displayed_leaves() {
        let mut tree = SizeTree::new();
        let s1 = tree.insert(NodeSpec::generic("C1", 5), &[]).unwrap();
        let s2 = tree.insert(NodeSpec::generic("C2", 15), &[]).unwrap();
        let t = tree.insert(NodeSpec::generic("C", 1), &[s1, s2]).unwrap();
        tree.layout(t, TileRect::new(0, 0, 100, 200)).unwrap();

        let tiles = tree.rectangles(t);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].node, s1);
        assert_eq!(tiles[0].rect, TileRect::new(0, 0, 100, 50));
        assert_eq!(tiles[0].colour, tree.colour(s1).unwrap());
        assert_eq!(tiles[1].rect, TileRect::new(0, 50, 100, 150));

        tree.collapse(s1).unwrap();
        let tiles = tree.rectangles(t);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].node, t);
        assert!(tree.rectangles(s1).is_empty(), "s1 is no longer displayed");
    }

    #[test]
    fn node_at_prefers_first_on_shared_edge() {
        let mut tree = SizeTree::new();
        let s1 = tree.insert(NodeSpec::generic("C1", 5), &[]).unwrap();
        let s2 = tree.insert(NodeSpec::generic("C2", 15), &[]).unwrap();
        let t = tree.insert(NodeSpec::generic("C", 1), &[s1, s2]).unwrap();
        tree.layout(t, TileRect::new(0, 0, 100, 200)).unwrap();

        assert_eq!(tree.node_at(t, Point::new(0.0, 0.0)), Some(s1));
        assert_eq!(tree.node_at(t, Point::new(10.0, 50.0)), Some(s1));
        assert_eq!(tree.node_at(t, Point::new(100.0, 100.0)), Some(s2));
        assert_eq!(tree.node_at(t, Point::new(500.0, 500.0)), None);
        assert_eq!(tree.node_at(s1, Point::new(10.0, 10.0)), Some(s1));
    }

    #[test]
    fn layout_rejects_rect_past_u32_max() {
        let mut tree = SizeTree::new();
        let a = tree.insert(NodeSpec::generic("a", 1), &[]).unwrap();
        let rect = TileRect::new(u32::MAX, 0, 1, 1);
        assert_eq!(
            tree.layout(a, rect),
            Err(Precondition::RectOutOfRange(rect).into())
        );
        assert_eq!(tree.rect(a), None);
    }

    /// Builds a tree of the given shape: each entry is a list of leaf sizes
    /// grouped under one intermediate node, all under a single root.
    fn build(tree: &mut SizeTree, groups: &[Vec<u64>]) -> NodeId {
        let mids: Vec<NodeId> = groups
            .iter()
            .enumerate()
            .map(|(g, sizes)| {
                let leaves: Vec<NodeId> = sizes
                    .iter()
                    .enumerate()
                    .map(|(i, &s)| {
                        tree.insert(NodeSpec::generic(format!("l{g}.{i}"), s), &[])
                            .unwrap()
                    })
                    .collect();
                tree.insert(NodeSpec::generic(format!("m{g}"), 0), &leaves)
                    .unwrap()
            })
            .collect();
        tree.insert(NodeSpec::generic("root", 1), &mids).unwrap()
    }

    proptest! {
        /// Displayed leaves tile the root rectangle exactly, however skewed the sizes.
        #[test]
        fn prop_leaves_tile_root(
            groups in prop::collection::vec(
                prop::collection::vec(
                    prop_oneof![1_u64..4, 1_000_000_u64..1_000_000_000],
                    1..6,
                ),
                1..6,
            ),
            x in 0_u32..50,
            y in 0_u32..50,
            width in 0_u32..400,
            height in 0_u32..400,
        ) {
            let mut tree = SizeTree::new();
            let root = build(&mut tree, &groups);
            let rect = TileRect::new(x, y, width, height);
            tree.layout(root, rect).unwrap();

            let tiles = tree.rectangles(root);
            let area: u64 = tiles.iter().map(|t| t.rect.area()).sum();
            prop_assert_eq!(area, rect.area());
            for (i, a) in tiles.iter().enumerate() {
                let inner = a.rect;
                prop_assert!(inner.x >= rect.x && inner.x + inner.width <= rect.x + rect.width);
                prop_assert!(inner.y >= rect.y && inner.y + inner.height <= rect.y + rect.height);
                for b in &tiles[i + 1..] {
                    prop_assert!(!a.rect.overlaps(&b.rect));
                }
            }
        }
    }
}
