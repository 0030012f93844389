// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text labels: path strings and indented tree dumps.

use core::fmt;

use crate::colour::ColourSource;
use crate::tree::{Node, SizeTree};
use crate::types::{NodeId, NodeKind, TileRect};

impl<C: ColourSource> SizeTree<C> {
    /// The names from the root down to `id`, joined by `id`'s separator and
    /// followed by its kind's suffix.
    ///
    /// ```rust
    /// use canopy_size_tree::{NodeSpec, SizeTree};
    ///
    /// let mut tree = SizeTree::new();
    /// let d1 = tree.insert(NodeSpec::generic("C1", 5), &[]).unwrap();
    /// let d2 = tree.insert(NodeSpec::generic("C2", 1), &[d1]).unwrap();
    /// let d3 = tree.insert(NodeSpec::generic("C", 1), &[d2]).unwrap();
    /// assert_eq!(tree.path_string(d3).as_deref(), Some("C(7) None"));
    /// assert_eq!(tree.path_string(d1).as_deref(), Some("C | C2 | C1(5) None"));
    /// ```
    pub fn path_string(&self, id: NodeId) -> Option<String> {
        let node = self.live(id).ok()?;
        let separator = node.kind.separator();
        let mut names: Vec<&str> = self
            .ancestors(id)
            .iter()
            .map(|&a| self.node(a).name.as_str())
            .collect();
        names.reverse();
        names.push(&node.name);
        let mut out = names.join(separator);
        out.push_str(&suffix(node));
        Some(out)
    }

    /// A [`Display`](fmt::Display) dump of the subtree rooted at `id`.
    ///
    /// One line per node, indented four spaces per level: the name, the
    /// node's separator when it has children, then its size and rectangle.
    ///
    /// ```rust
    /// use canopy_size_tree::{NodeSpec, SizeTree};
    ///
    /// let mut tree = SizeTree::new();
    /// let d1 = tree.insert(NodeSpec::generic("C1", 5), &[]).unwrap();
    /// let d2 = tree.insert(NodeSpec::generic("C2", 1), &[d1]).unwrap();
    /// let d3 = tree.insert(NodeSpec::generic("C", 1), &[d2]).unwrap();
    /// assert_eq!(
    ///     tree.display(d3).unwrap().to_string(),
    ///     "C | (7) None\n    C2 | (6) None\n        C1(5) None",
    /// );
    /// ```
    pub fn display(&self, id: NodeId) -> Option<TreeDisplay<'_, C>> {
        self.live(id).ok()?;
        Some(TreeDisplay { tree: self, root: id })
    }
}

/// Indented dump of a subtree, returned by [`SizeTree::display`].
pub struct TreeDisplay<'a, C: ColourSource> {
    tree: &'a SizeTree<C>,
    root: NodeId,
}

impl<C: ColourSource> fmt::Debug for TreeDisplay<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeDisplay")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<C: ColourSource> fmt::Display for TreeDisplay<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0_usize)];
        let mut first = true;
        while let Some((id, depth)) = stack.pop() {
            let node = self.tree.node(id);
            if !first {
                f.write_str("\n")?;
            }
            first = false;
            for _ in 0..depth {
                f.write_str("    ")?;
            }
            f.write_str(&node.name)?;
            if !node.children.is_empty() {
                f.write_str(node.kind.separator())?;
            }
            write!(f, "({}) {}", node.size, RectLabel(node.rect))?;
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        Ok(())
    }
}

fn suffix(node: &Node) -> String {
    match node.kind {
        NodeKind::Generic => format!("({}) {}", node.size, RectLabel(node.rect)),
        NodeKind::File => " (file)".into(),
        NodeKind::Directory => " (directory)".into(),
        NodeKind::ChessMove { .. } if node.children.is_empty() => " (end)".into(),
        NodeKind::ChessMove {
            white_to_play: true,
        } => " (white to play)".into(),
        NodeKind::ChessMove {
            white_to_play: false,
        } => " (black to play)".into(),
    }
}

/// `(x, y, w, h)`, or `None` before the first layout.
struct RectLabel(Option<TileRect>);

impl fmt::Display for RectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rect) => fmt::Display::fmt(&rect, f),
            None => f.write_str("None"),
        }
    }
}
