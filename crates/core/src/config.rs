//! Rules configuration - balancing constants for a room
//!
//! Defaults match the live game. `from_env` lets an operator retune a server
//! without a rebuild.

use std::env;

use serde::{Deserialize, Serialize};

use crate::types::BOARD_WIDTH;

/// Ticks between gravity steps.
pub const ACTION_INIT_TIME: u32 = 3;

/// A clear later than this after the previous one restarts the combo.
pub const COMBO_TIMEOUT_MS: u64 = 3_000;

/// Holes per garbage row.
pub const GARBAGE_HOLE_COUNT: u32 = 1;

/// Rows of garbage a fresh board starts with.
pub const INITIAL_GARBAGE_ROWS: u32 = 2;

/// `exp_to_next_level` once the threshold table is exhausted.
pub const MAX_LEVEL_SENTINEL: u64 = 999_999;

/// Total experience needed to leave level `i` (index 0 is never consulted,
/// players start at level 1).
pub const EXP_LEVEL_THRESHOLDS: [u64; 15] = [
    0, 500, 1_200, 2_000, 3_000, 4_200, 5_600, 7_200, 9_000, 11_000, 13_500, 16_500, 20_000,
    24_000, 28_500,
];

/// Cumulative thresholds on a single `[0, 1)` draw, checked rarest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuckyThresholds {
    pub diamond: f64,
    pub star: f64,
    pub gift: f64,
}

impl Default for LuckyThresholds {
    fn default() -> Self {
        Self {
            diamond: 0.01,
            star: 0.05,
            gift: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub action_init_time: u32,
    pub combo_timeout_ms: u64,
    pub garbage_hole_count: u32,
    pub initial_garbage_rows: u32,
    pub lucky: LuckyThresholds,
    pub level_thresholds: Vec<u64>,
    pub max_level_sentinel: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            action_init_time: ACTION_INIT_TIME,
            combo_timeout_ms: COMBO_TIMEOUT_MS,
            garbage_hole_count: GARBAGE_HOLE_COUNT,
            initial_garbage_rows: INITIAL_GARBAGE_ROWS,
            lucky: LuckyThresholds::default(),
            level_thresholds: EXP_LEVEL_THRESHOLDS.to_vec(),
            max_level_sentinel: MAX_LEVEL_SENTINEL,
        }
    }
}

impl RulesConfig {
    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let action_init_time = env::var("ARENA_ACTION_INIT_TIME")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.action_init_time);

        let combo_timeout_ms = env::var("ARENA_COMBO_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.combo_timeout_ms);

        let garbage_hole_count = env::var("ARENA_GARBAGE_HOLES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.garbage_hole_count);

        let initial_garbage_rows = env::var("ARENA_INITIAL_GARBAGE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.initial_garbage_rows);

        Self {
            action_init_time,
            combo_timeout_ms,
            garbage_hole_count,
            initial_garbage_rows,
            ..defaults
        }
        .normalized()
    }

    /// Clamp values that would break engine invariants. A garbage row needs at
    /// least one hole (a full row would clear on arrival) and at least one block.
    pub fn normalized(mut self) -> Self {
        self.garbage_hole_count = self.garbage_hole_count.clamp(1, BOARD_WIDTH as u32 - 1);
        self
    }
}
