//! Board module - geometry checks and the settled stack ("ground")
//!
//! The ground is a set of settled blocks, not a grid: garbage pushes the stack
//! upwards and may temporarily leave blocks above row 1, which a fixed array could
//! not represent. A `BTreeSet` keeps the no-duplicate invariant structural and gives
//! deterministic iteration order for snapshots.
//!
//! Coordinates: (x, y) with x in 1..=10 (left to right), y in 1..=20 (top to bottom).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Block, BOARD_HEIGHT, BOARD_WIDTH};

/// Check if a position is inside the playfield.
#[inline(always)]
pub fn in_bounds(x: i32, y: i32) -> bool {
    (1..=BOARD_WIDTH).contains(&x) && (1..=BOARD_HEIGHT).contains(&y)
}

/// The settled stack of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ground {
    blocks: BTreeSet<Block>,
}

impl Ground {
    /// Create an empty ground
    pub fn new() -> Self {
        Self {
            blocks: BTreeSet::new(),
        }
    }

    /// Build a ground from any block iterator. Duplicates collapse.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
    }

    /// Build a ground where each listed row is completely filled.
    pub fn with_full_rows(rows: &[i32]) -> Self {
        Self::from_blocks(
            rows.iter()
                .flat_map(|&y| (1..=BOARD_WIDTH).map(move |x| Block::new(x, y))),
        )
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter()
    }

    pub fn contains(&self, block: &Block) -> bool {
        self.blocks.contains(block)
    }

    /// Check if position is occupied by a settled block
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.blocks.contains(&Block::new(x, y))
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        in_bounds(x, y) && !self.is_occupied(x, y)
    }

    /// Number of settled blocks on row `y`.
    pub fn row_count(&self, y: i32) -> usize {
        self.blocks.iter().filter(|b| b.y == y).count()
    }

    /// Union the given blocks into a new ground (lock and garbage insertion).
    pub fn insert_blocks(&self, blocks: impl IntoIterator<Item = Block>) -> Self {
        let mut next = self.blocks.clone();
        next.extend(blocks);
        Self { blocks: next }
    }

    /// Map every block through `f` into a new ground.
    pub fn map_blocks(&self, f: impl Fn(Block) -> Block) -> Self {
        Self::from_blocks(self.blocks.iter().copied().map(f))
    }

    /// Smallest row index holding a block, if any.
    pub fn top_row(&self) -> Option<i32> {
        self.blocks.iter().map(|b| b.y).min()
    }
}

impl FromIterator<Block> for Ground {
    fn from_iter<T: IntoIterator<Item = Block>>(iter: T) -> Self {
        Self::from_blocks(iter)
    }
}

/// Union helper kept as a free function for callers working with raw block lists.
pub fn insert_block_to_ground(ground: &Ground, blocks: &[Block]) -> Ground {
    ground.insert_blocks(blocks.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(in_bounds(1, 1));
        assert!(in_bounds(10, 20));
        assert!(!in_bounds(0, 5));
        assert!(!in_bounds(11, 5));
        assert!(!in_bounds(5, 0));
        assert!(!in_bounds(5, 21));
        assert!(!in_bounds(-3, -3));
    }

    #[test]
    fn test_duplicates_collapse() {
        let ground = Ground::from_blocks([Block::new(2, 5), Block::new(2, 5), Block::new(3, 5)]);
        assert_eq!(ground.len(), 2);
        assert_eq!(ground.row_count(5), 2);
    }

    #[test]
    fn test_is_valid() {
        let ground = Ground::from_blocks([Block::new(4, 10)]);
        assert!(!ground.is_valid(4, 10));
        assert!(ground.is_valid(5, 10));
        assert!(!ground.is_valid(0, 10));
    }
}
