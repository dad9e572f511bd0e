//! Line-clear engine - full-row detection and gravity compaction
//!
//! A surviving block drops by the number of cleared rows strictly below it.
//! Computing that count directly (instead of shifting once per cleared row)
//! keeps simultaneous multi-row clears from double-shifting.

use arrayvec::ArrayVec;

use crate::board::Ground;
use crate::types::{Block, BOARD_HEIGHT, BOARD_WIDTH};

/// Row indices `0..=H` are counted, so at most `H + 1` rows can be reported.
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize + 1;

pub type ClearedRows = ArrayVec<i32, MAX_CLEARED_ROWS>;

/// Result of one clear pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearResult {
    pub ground: Ground,
    /// Cleared row indices, ascending.
    pub cleared_rows: ClearedRows,
}

impl ClearResult {
    pub fn lines_cleared(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Rows in `0..=H` holding exactly `W` blocks, ascending.
pub fn detect_full_rows(ground: &Ground) -> ClearedRows {
    let mut counts = [0usize; MAX_CLEARED_ROWS];
    for b in ground.iter() {
        if (0..=BOARD_HEIGHT).contains(&b.y) {
            counts[b.y as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == BOARD_WIDTH as usize)
        .map(|(y, _)| y as i32)
        .collect()
}

/// Remove full rows and compact the stack above them.
pub fn clear(ground: &Ground) -> ClearResult {
    let cleared_rows = detect_full_rows(ground);
    if cleared_rows.is_empty() {
        return ClearResult {
            ground: ground.clone(),
            cleared_rows,
        };
    }

    let ground = ground
        .iter()
        .filter(|b| !cleared_rows.contains(&b.y))
        .map(|b| {
            let below = cleared_rows.iter().filter(|&&row| row > b.y).count() as i32;
            Block::new(b.x, b.y + below)
        })
        .collect();

    ClearResult {
        ground,
        cleared_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_full_rows_returns_input() {
        let ground = Ground::from_blocks((1..BOARD_WIDTH).map(|x| Block::new(x, 20)));
        let result = clear(&ground);
        assert_eq!(result.ground, ground);
        assert!(result.cleared_rows.is_empty());
    }

    #[test]
    fn test_single_row_clear_shifts_above() {
        let mut blocks: Vec<Block> = (1..=BOARD_WIDTH).map(|x| Block::new(x, 20)).collect();
        blocks.push(Block::new(4, 19));
        let result = clear(&Ground::from_blocks(blocks));

        assert_eq!(result.cleared_rows.as_slice(), &[20]);
        assert_eq!(result.ground, Ground::from_blocks([Block::new(4, 20)]));
    }

    #[test]
    fn test_split_clear_shifts_by_rows_below() {
        // Rows 15 and 19 full; a block on 17 sits above one cleared row,
        // a block on 10 above two.
        let mut ground = Ground::with_full_rows(&[15, 19]);
        ground = ground.insert_blocks([Block::new(2, 17), Block::new(7, 10), Block::new(3, 20)]);

        let result = clear(&ground);
        assert_eq!(result.cleared_rows.as_slice(), &[15, 19]);
        assert_eq!(
            result.ground,
            Ground::from_blocks([Block::new(2, 18), Block::new(7, 12), Block::new(3, 20)])
        );
    }

    #[test]
    fn test_row_zero_is_counted() {
        let ground = Ground::with_full_rows(&[0]);
        assert_eq!(detect_full_rows(&ground).as_slice(), &[0]);
    }
}
