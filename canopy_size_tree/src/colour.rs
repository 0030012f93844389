// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colour sources used when nodes are constructed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Colour;

/// Supplies a colour for each node that is inserted without an explicit one.
///
/// A [`SizeTree`](crate::SizeTree) owns its colour source, so the colours a tree
/// receives depend only on the source's state and the order of insertions.
pub trait ColourSource {
    /// Produce the next colour.
    fn next_colour(&mut self) -> Colour;
}

/// Pseudo-random colours from a seeded generator.
#[derive(Clone, Debug)]
pub struct SeededColours {
    rng: StdRng,
}

impl SeededColours {
    /// Seed used by [`SeededColours::default`].
    pub const DEFAULT_SEED: u64 = 0x00ca_9097;

    /// Create a source whose sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededColours {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl ColourSource for SeededColours {
    fn next_colour(&mut self) -> Colour {
        Colour::new(self.rng.random(), self.rng.random(), self.rng.random())
    }
}

/// Gives every node the same colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedColour(pub Colour);

impl ColourSource for FixedColour {
    fn next_colour(&mut self) -> Colour {
        self.0
    }
}

impl<F: FnMut() -> Colour> ColourSource for F {
    fn next_colour(&mut self) -> Colour {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededColours::new(7);
        let mut b = SeededColours::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_colour(), b.next_colour());
        }
    }

    #[test]
    fn closures_are_sources() {
        let mut n = 0_u8;
        let mut source = || {
            n += 1;
            Colour::new(n, n, n)
        };
        assert_eq!(source.next_colour(), Colour::new(1, 1, 1));
        assert_eq!(source.next_colour(), Colour::new(2, 2, 2));
    }
}
