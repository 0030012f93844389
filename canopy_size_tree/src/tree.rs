// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree storage: node slots, construction, discarding, and accessors.

use smallvec::SmallVec;
use tracing::debug;

use crate::colour::{ColourSource, SeededColours};
use crate::error::{Precondition, TreeError};
use crate::types::{Colour, NodeId, NodeKind, TileRect};

/// Ancestor chains are short for realistic trees; keep them off the heap.
pub(crate) type Ancestors = SmallVec<[NodeId; 16]>;

/// A forest of weighted nodes.
///
/// Nodes are stored in slots and addressed by [`NodeId`]. Each node owns its
/// children (by id) and keeps a non-owning link to its parent. A tree may hold
/// several independent roots; nodes can be moved between them with
/// [`SizeTree::move_node`].
///
/// The type parameter `C` supplies colours for new nodes. It defaults to
/// [`SeededColours`], so a fresh [`SizeTree::new`] always hands out the same
/// colour sequence.
///
/// ## Example
///
/// ```rust
/// use canopy_size_tree::{NodeSpec, SizeTree, TileRect};
///
/// let mut tree = SizeTree::new();
/// let small = tree.insert(NodeSpec::generic("C1", 5), &[]).unwrap();
/// let large = tree.insert(NodeSpec::generic("C2", 15), &[]).unwrap();
/// let root = tree.insert(NodeSpec::generic("C", 1), &[small, large]).unwrap();
/// assert_eq!(tree.size(root), Some(21));
///
/// tree.layout(root, TileRect::new(0, 0, 100, 200)).unwrap();
/// assert_eq!(tree.rect(small), Some(TileRect::new(0, 0, 100, 50)));
/// assert_eq!(tree.rect(large), Some(TileRect::new(0, 50, 100, 150)));
/// ```
pub struct SizeTree<C: ColourSource = SeededColours> {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    colours: C,
}

impl<C: ColourSource> core::fmt::Debug for SizeTree<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.len();
        f.debug_struct("SizeTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<C> Default for SizeTree<C>
where
    C: ColourSource + Default,
{
    fn default() -> Self {
        Self::with_colour_source(C::default())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) size: u64,
    pub(crate) colour: Colour,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) expanded: bool,
    pub(crate) rect: Option<TileRect>,
}

/// Description of a node to insert with [`SizeTree::insert`].
///
/// `own_size` is the node's contribution on top of its children; the node's
/// size is `own_size` plus the sizes of the children it is built with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpec {
    name: String,
    kind: NodeKind,
    own_size: u64,
    colour: Option<Colour>,
}

impl NodeSpec {
    /// A [`NodeKind::Generic`] node.
    pub fn generic(name: impl Into<String>, own_size: u64) -> Self {
        Self::new(name, NodeKind::Generic, own_size)
    }

    /// A [`NodeKind::File`] node of the given size.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self::new(name, NodeKind::File, size)
    }

    /// A [`NodeKind::Directory`] node. Directories contribute one unit of their own.
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Directory, 1)
    }

    /// A [`NodeKind::ChessMove`] node; `games_ended` is its own size.
    pub fn chess_move(name: impl Into<String>, games_ended: u64, white_to_play: bool) -> Self {
        Self::new(name, NodeKind::ChessMove { white_to_play }, games_ended)
    }

    /// Use `colour` instead of drawing one from the tree's colour source.
    #[must_use]
    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    fn new(name: impl Into<String>, kind: NodeKind, own_size: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            own_size,
            colour: None,
        }
    }
}

impl SizeTree {
    /// Create an empty tree using the default seeded colour source.
    pub fn new() -> Self {
        Self::with_colour_source(SeededColours::default())
    }
}

impl<C: ColourSource> SizeTree<C> {
    /// Create an empty tree that draws node colours from `colours`.
    pub fn with_colour_source(colours: C) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            colours,
        }
    }

    /// Insert a new root built from `spec`, adopting `children` in order.
    ///
    /// Every child must be a live root; ownership moves to the new node. The
    /// new node's size is its own size plus the children's sizes, and it starts
    /// expanded exactly when it has children. Its rectangle is unset until the
    /// next [`SizeTree::layout`].
    pub fn insert(&mut self, spec: NodeSpec, children: &[NodeId]) -> Result<NodeId, TreeError> {
        let NodeSpec {
            name,
            kind,
            own_size,
            colour,
        } = spec;
        if name.is_empty() {
            return Err(Precondition::EmptyName.into());
        }
        match kind {
            NodeKind::File if !children.is_empty() => {
                return Err(Precondition::FileWithChildren(name).into());
            }
            NodeKind::Directory if own_size != 1 => {
                return Err(Precondition::DirectoryOwnSize(name).into());
            }
            _ => {}
        }

        let mut size = own_size;
        for (i, &child) in children.iter().enumerate() {
            let node = self.live(child)?;
            if node.parent.is_some() {
                return Err(Precondition::ChildNotRoot(child).into());
            }
            if children[..i].contains(&child) {
                return Err(Precondition::DuplicateChild(child).into());
            }
            size = size
                .checked_add(node.size)
                .ok_or(Precondition::SizeOverflow)?;
        }
        if size == 0 {
            return Err(Precondition::ZeroSize(name).into());
        }

        let colour = colour.unwrap_or_else(|| self.colours.next_colour());
        let id = self.alloc(|generation| Node {
            generation,
            name,
            kind,
            size,
            colour,
            parent: None,
            children: children.to_vec(),
            expanded: !children.is_empty(),
            rect: None,
        });
        for &child in children {
            self.node_mut(child).parent = Some(id);
        }
        Ok(id)
    }

    /// Remove the tree rooted at `root`, freeing every node in it.
    ///
    /// Ids of the removed nodes become stale; their slots are reused by later
    /// insertions with a new generation.
    pub fn discard(&mut self, root: NodeId) -> Result<(), TreeError> {
        if self.live(root)?.parent.is_some() {
            return Err(Precondition::NotRoot(root).into());
        }
        let mut stack = vec![root];
        let mut removed = 0_usize;
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes[id.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(id.idx());
                removed += 1;
            }
        }
        debug!(?root, removed, "discarded tree");
        Ok(())
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot is occupied and the slot's generation
    /// matches the id's generation.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.generation())
    }

    /// Number of live nodes across all roots.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The node's label, or `None` for stale ids.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    /// The node's size: its own contribution plus all of its descendants.
    pub fn size(&self, id: NodeId) -> Option<u64> {
        self.get(id).map(|n| n.size)
    }

    /// The node's fill colour.
    pub fn colour(&self, id: NodeId) -> Option<Colour> {
        self.get(id).map(|n| n.colour)
    }

    /// The node's rectangle as of the last layout, if any.
    pub fn rect(&self, id: NodeId) -> Option<TileRect> {
        self.get(id).and_then(|n| n.rect)
    }

    /// The node's kind.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    /// Whether the node is expanded in the displayed tree.
    pub fn is_expanded(&self, id: NodeId) -> Option<bool> {
        self.get(id).map(|n| n.expanded)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id).map(|_| id)?;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        Some(current)
    }

    /// Iterate all live roots in slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Some(n) if n.parent.is_none() => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "slot indices are stored as u32."
                )]
                Some(NodeId::new(i as u32, n.generation))
            }
            _ => None,
        })
    }

    /// Iterate the subtree rooted at `id` in pre-order (natural order).
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.get(id).map(|_| id).into_iter().collect();
        core::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.node(next).children.iter().rev().copied());
            Some(next)
        })
    }

    // --- internals ---

    fn alloc(&mut self, make: impl FnOnce(u32) -> Node) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(make(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(make(generation)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slot indices are stored as u32."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    /// Look up a live node or report the id as stale.
    pub(crate) fn live(&self, id: NodeId) -> Result<&Node, Precondition> {
        self.get(id).ok_or(Precondition::StaleNode(id))
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    /// Strict ancestors of `id`, nearest first.
    pub(crate) fn ancestors(&self, id: NodeId) -> Ancestors {
        let mut out = Ancestors::new();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            out.push(parent);
            current = self.node(parent).parent;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::FixedColour;

    #[test]
    fn insert_aggregates_sizes_and_links_parents() {
        let mut tree = SizeTree::new();
        let b = tree.insert(NodeSpec::generic("B", 5), &[]).unwrap();
        assert_eq!(tree.size(b), Some(5));
        assert_eq!(tree.rect(b), None);
        assert_eq!(tree.is_expanded(b), Some(false));

        let a = tree.insert(NodeSpec::generic("A", 1), &[b]).unwrap();
        assert_eq!(tree.size(a), Some(6));
        assert_eq!(tree.parent_of(b), Some(a));
        assert_eq!(tree.children_of(a), &[b]);
        assert_eq!(tree.is_expanded(a), Some(true));
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn insert_rejects_bad_input_without_side_effects() {
        let mut tree = SizeTree::new();
        let leaf = tree.insert(NodeSpec::generic("leaf", 2), &[]).unwrap();
        let parent = tree.insert(NodeSpec::generic("p", 0), &[leaf]).unwrap();

        assert_eq!(
            tree.insert(NodeSpec::generic("", 1), &[]),
            Err(Precondition::EmptyName.into())
        );
        assert_eq!(
            tree.insert(NodeSpec::generic("z", 0), &[]),
            Err(Precondition::ZeroSize("z".into()).into())
        );
        assert_eq!(
            tree.insert(NodeSpec::generic("q", 1), &[leaf]),
            Err(Precondition::ChildNotRoot(leaf).into())
        );
        assert_eq!(
            tree.insert(NodeSpec::generic("q", 1), &[parent, parent]),
            Err(Precondition::DuplicateChild(parent).into())
        );
        assert_eq!(
            tree.insert(NodeSpec::file("f", 1), &[parent]),
            Err(Precondition::FileWithChildren("f".into()).into())
        );
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.parent_of(parent), None);
    }

    #[test]
    fn explicit_colour_wins_over_source() {
        let mut tree = SizeTree::with_colour_source(FixedColour(Colour::new(1, 2, 3)));
        let a = tree.insert(NodeSpec::generic("a", 1), &[]).unwrap();
        let b = tree
            .insert(
                NodeSpec::generic("b", 1).with_colour(Colour::new(9, 9, 9)),
                &[],
            )
            .unwrap();
        assert_eq!(tree.colour(a), Some(Colour::new(1, 2, 3)));
        assert_eq!(tree.colour(b), Some(Colour::new(9, 9, 9)));
    }

    #[test]
    fn discard_frees_slots_and_bumps_generations() {
        let mut tree = SizeTree::new();
        let leaf = tree.insert(NodeSpec::generic("leaf", 2), &[]).unwrap();
        let root = tree.insert(NodeSpec::generic("root", 1), &[leaf]).unwrap();

        assert_eq!(
            tree.discard(leaf),
            Err(Precondition::NotRoot(leaf).into())
        );
        tree.discard(root).unwrap();
        assert!(!tree.is_alive(root));
        assert!(!tree.is_alive(leaf));
        assert!(tree.is_empty());

        let again = tree.insert(NodeSpec::generic("again", 1), &[]).unwrap();
        assert!(tree.is_alive(again));
        assert!(again != root && again != leaf, "reused slot must get a new id");
        assert_eq!(tree.size(leaf), None);
        assert_eq!(
            tree.discard(root),
            Err(Precondition::StaleNode(root).into())
        );
    }

    #[test]
    fn descendants_are_pre_order() {
        let mut tree = SizeTree::new();
        let c1 = tree.insert(NodeSpec::generic("c1", 1), &[]).unwrap();
        let c2 = tree.insert(NodeSpec::generic("c2", 1), &[]).unwrap();
        let b = tree.insert(NodeSpec::generic("b", 1), &[c1, c2]).unwrap();
        let d = tree.insert(NodeSpec::generic("d", 1), &[]).unwrap();
        let a = tree.insert(NodeSpec::generic("a", 1), &[b, d]).unwrap();
        assert_eq!(
            tree.descendants(a).collect::<Vec<_>>(),
            vec![a, b, c1, c2, d]
        );
        assert_eq!(tree.root_of(c2), Some(a));
        assert_eq!(tree.ancestors(c2).as_slice(), &[b, a]);
    }

    #[test]
    fn directory_own_size_is_fixed() {
        let mut tree = SizeTree::new();
        let mut spec = NodeSpec::directory("d");
        spec.own_size = 3;
        assert_eq!(
            tree.insert(spec, &[]),
            Err(Precondition::DirectoryOwnSize("d".into()).into())
        );
        let d = tree.insert(NodeSpec::directory("d"), &[]).unwrap();
        assert_eq!(tree.size(d), Some(1));
    }
}
