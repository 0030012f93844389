// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefix tries over move sequences.

use hashbrown::HashMap;

/// A prefix trie of move sequences.
///
/// Games that share an opening share a branch. Each edge records how many of
/// the input games ended exactly after its move. Edges keep the order in which
/// their move first appeared in the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveTrie {
    edges: Vec<TrieEdge>,
}

/// One move in a [`MoveTrie`] and the continuations that follow it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieEdge {
    token: String,
    terminal_count: u64,
    child: MoveTrie,
}

impl TrieEdge {
    /// The move, as given in the input.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Number of games that ended right after this move.
    pub fn terminal_count(&self) -> u64 {
        self.terminal_count
    }

    /// Moves that were played after this one.
    pub fn child(&self) -> &MoveTrie {
        &self.child
    }
}

impl MoveTrie {
    /// Merge `games` into a trie.
    ///
    /// Tokens are opaque and compared by exact text. Empty games carry no
    /// moves and are ignored, so `[]` and `[[]]` both give an empty trie.
    ///
    /// ```rust
    /// use canopy_ingest::MoveTrie;
    ///
    /// let trie = MoveTrie::from_games(&[
    ///     vec!["a", "b", "c"],
    ///     vec!["a", "b"],
    ///     vec!["d", "e"],
    ///     vec!["d", "e"],
    /// ]);
    /// let tokens: Vec<_> = trie.edges().iter().map(|e| e.token()).collect();
    /// assert_eq!(tokens, ["a", "d"]);
    /// assert_eq!(trie.games(), 4);
    /// ```
    pub fn from_games<G, T>(games: &[G]) -> Self
    where
        G: AsRef<[T]>,
        T: AsRef<str>,
    {
        Self::build(games.iter().map(AsRef::as_ref).collect())
    }

    fn build<T: AsRef<str>>(sequences: Vec<&[T]>) -> Self {
        // Groups in first-appearance order: (token, games ending here, remainders).
        let mut groups: Vec<(&str, u64, Vec<&[T]>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for sequence in sequences {
            let Some((first, rest)) = sequence.split_first() else {
                continue;
            };
            let token = first.as_ref();
            let slot = *index.entry(token).or_insert_with(|| {
                groups.push((token, 0, Vec::new()));
                groups.len() - 1
            });
            let group = &mut groups[slot];
            if rest.is_empty() {
                group.1 += 1;
            } else {
                group.2.push(rest);
            }
        }

        let edges = groups
            .into_iter()
            .map(|(token, terminal_count, rest)| TrieEdge {
                token: token.to_owned(),
                terminal_count,
                child: Self::build(rest),
            })
            .collect();
        Self { edges }
    }

    /// Top-level moves in first-appearance order.
    pub fn edges(&self) -> &[TrieEdge] {
        &self.edges
    }

    /// Returns true if no game contributed a move.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of non-empty games merged into the trie.
    pub fn games(&self) -> u64 {
        self.edges
            .iter()
            .map(|e| e.terminal_count + e.child.games())
            .sum()
    }

    /// Follow `moves` from the top of the trie.
    pub fn get<T: AsRef<str>>(&self, moves: &[T]) -> Option<&TrieEdge> {
        let (first, rest) = moves.split_first()?;
        let edge = self.edges.iter().find(|e| e.token == first.as_ref())?;
        if rest.is_empty() {
            Some(edge)
        } else {
            edge.child.get(rest)
        }
    }
}
