// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Game trees: one node per position reached in a set of games.

use canopy_size_tree::{ColourSource, NodeId, NodeKind, NodeSpec, SizeTree, TreeError};
use tracing::debug;

use crate::listing::abandon;
use crate::moves::MoveTrie;

/// Label of the starting position.
pub const ROOT_LABEL: &str = "-";

/// Build a game tree from `trie` and return its root.
///
/// The root is the starting position, labelled [`ROOT_LABEL`], with white to
/// play. Every trie edge becomes a [`NodeKind::ChessMove`] node labelled by its
/// move, whose own size is the number of games that ended there; the side to
/// play alternates with depth. A node's size is therefore the number of games
/// that passed through its position.
///
/// An empty trie is rejected: its root would have size zero.
pub fn build_move_tree<C: ColourSource>(
    tree: &mut SizeTree<C>,
    trie: &MoveTrie,
) -> Result<NodeId, TreeError> {
    let children = build_edges(tree, trie, false)?;
    let root = tree
        .insert(NodeSpec::chess_move(ROOT_LABEL, 0, true), &children)
        .map_err(|err| abandon(tree, &children, err))?;
    debug!(?root, games = trie.games(), "built move tree");
    Ok(root)
}

fn build_edges<C: ColourSource>(
    tree: &mut SizeTree<C>,
    trie: &MoveTrie,
    white_to_play: bool,
) -> Result<Vec<NodeId>, TreeError> {
    let mut built = Vec::with_capacity(trie.edges().len());
    for edge in trie.edges() {
        let node = build_edges(tree, edge.child(), !white_to_play).and_then(|children| {
            tree.insert(
                NodeSpec::chess_move(edge.token(), edge.terminal_count(), white_to_play),
                &children,
            )
            .map_err(|err| abandon(tree, &children, err))
        });
        match node {
            Ok(id) => built.push(id),
            Err(err) => return Err(abandon(tree, &built, err)),
        }
    }
    Ok(built)
}

/// The moves leading from the starting position to `id`, first move first.
///
/// The root yields an empty sequence. Returns `None` if `id` is stale or not
/// part of a game tree.
pub fn move_sequence<C: ColourSource>(tree: &SizeTree<C>, id: NodeId) -> Option<Vec<&str>> {
    let mut moves = Vec::new();
    let mut current = id;
    while let Some(parent) = tree.parent_of(current) {
        if !matches!(tree.kind(current)?, NodeKind::ChessMove { .. }) {
            return None;
        }
        moves.push(tree.name(current)?);
        current = parent;
    }
    if !matches!(tree.kind(current)?, NodeKind::ChessMove { .. }) {
        return None;
    }
    moves.reverse();
    Some(moves)
}
