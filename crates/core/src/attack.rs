//! Attack engine - attack magnitude and garbage rows
//!
//! The engine only computes how hard a clear hits and what the garbage looks
//! like. Pushing garbage onto an opponent is the room's job.

use tracing::debug;

use crate::board::Ground;
use crate::rng::RandomSource;
use crate::types::{Block, BOARD_HEIGHT, BOARD_WIDTH};

/// Combo thresholds; each one reached adds one attack row.
pub const COMBO_ATTACK_STEPS: [u32; 4] = [2, 4, 6, 8];

/// Levels per extra attack row.
pub const LEVEL_ATTACK_DIVISOR: u32 = 3;

pub fn combo_attack_bonus(combo: u32) -> u32 {
    COMBO_ATTACK_STEPS.iter().filter(|&&step| combo >= step).count() as u32
}

/// Garbage rows sent for a clear.
///
/// A single line at low level without a chain sends nothing.
///
/// ```
/// use tetris_arena_core::attack::calculate_attack_power;
///
/// assert_eq!(calculate_attack_power(4, 5, 6), 7);
/// assert_eq!(calculate_attack_power(1, 1, 1), 0);
/// ```
pub fn calculate_attack_power(lines_cleared: u32, level: u32, combo: u32) -> u32 {
    let base = lines_cleared.saturating_sub(1);
    let level_bonus = level / LEVEL_ATTACK_DIVISOR;
    let combo_bonus = combo_attack_bonus(combo);

    debug!(base, level_bonus, combo_bonus, "attack computed");

    base + level_bonus + combo_bonus
}

/// Pick `holes` distinct columns in `1..=W` with a partial Fisher-Yates pass.
fn pick_holes(holes: u32, rng: &mut dyn RandomSource) -> Vec<i32> {
    let mut columns: Vec<i32> = (1..=BOARD_WIDTH).collect();
    let take = (holes as usize).min(columns.len());

    for i in 0..take {
        let remaining = (columns.len() - i) as u32;
        let j = i + rng.next_range(remaining) as usize;
        columns.swap(i, j);
    }

    columns.truncate(take);
    columns
}

/// `count` garbage rows from `start_row` upwards (`start_row`, `start_row - 1`, ...).
/// Every row is filled except `holes` distinct random columns; holes are drawn
/// independently per row.
pub fn generate_garbage_lines(
    count: u32,
    start_row: i32,
    holes: u32,
    rng: &mut dyn RandomSource,
) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(count as usize * BOARD_WIDTH as usize);

    for i in 0..count as i32 {
        let y = start_row - i;
        let gaps = pick_holes(holes, rng);
        blocks.extend(
            (1..=BOARD_WIDTH)
                .filter(|x| !gaps.contains(x))
                .map(|x| Block::new(x, y)),
        );
    }

    blocks
}

/// Lift the whole stack by `count` rows and fill the freed bottom rows with
/// garbage. Lifted blocks may leave the board through the top; the game-over
/// check is what catches that.
pub fn add_garbage_lines(
    ground: &Ground,
    count: u32,
    holes: u32,
    rng: &mut dyn RandomSource,
) -> Ground {
    if count == 0 {
        return ground.clone();
    }

    let lifted = ground.map_blocks(|b| b.offset(0, -(count as i32)));
    let garbage = generate_garbage_lines(count, BOARD_HEIGHT, holes, rng);

    debug!(count, holes, lifted_blocks = lifted.len(), "garbage applied");

    lifted.insert_blocks(garbage)
}

/// Starting board: `rows` garbage rows at the bottom.
pub fn initial_ground(rows: u32, holes: u32, rng: &mut dyn RandomSource) -> Ground {
    add_garbage_lines(&Ground::new(), rows, holes, rng)
}
