//! Player snapshot - the unit every transition consumes and produces
//!
//! A `PlayerState` is never mutated in place by the engine: each transition
//! borrows the previous snapshot and returns a new one, so a broadcaster holding
//! the old value never sees a half-applied tick.

use serde::{Deserialize, Serialize};

use crate::attack::initial_ground;
use crate::board::Ground;
use crate::pieces::Piece;
use crate::progression::check_level_up;
use crate::tick::TickContext;
use crate::types::{LuckyEvent, PlayerStatus};

/// Level every player starts on.
pub const START_LEVEL: u32 = 1;

/// Per-tick clear result relayed to clients for display and animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearOutcome {
    pub cleared_line_numbers: Vec<i32>,
    pub lines_cleared: u32,
    pub attack_power: u32,
    pub gained_exp: u64,
    pub lucky_event: Option<LuckyEvent>,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub user_name: String,
    /// Role tag assigned by the room (e.g. "host", "guest").
    pub who: String,
    pub state: PlayerStatus,
    pub piece: Piece,
    pub next: Piece,
    pub ground: Ground,
    /// Ticks left before the next gravity step.
    pub action_time: u32,
    pub level: u32,
    pub exp: u64,
    pub exp_to_next_level: u64,
    pub score: u64,
    pub combo: u32,
    pub last_clear_time: Option<u64>,
    /// Set only on the tick that cleared rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ClearOutcome>,
}

impl PlayerState {
    /// Fresh player: active and next piece drawn from the supplier, starting
    /// ground seeded with the configured number of garbage rows.
    pub fn new(user_name: impl Into<String>, who: impl Into<String>, ctx: &mut TickContext<'_>) -> Self {
        let piece = ctx.pieces.next_piece();
        let next = ctx.pieces.next_piece();
        let ground = initial_ground(
            ctx.rules.initial_garbage_rows,
            ctx.rules.garbage_hole_count,
            &mut *ctx.rng,
        );
        let levels = check_level_up(
            START_LEVEL,
            0,
            &ctx.rules.level_thresholds,
            ctx.rules.max_level_sentinel,
        );

        Self {
            user_name: user_name.into(),
            who: who.into(),
            state: PlayerStatus::Game,
            piece,
            next,
            ground,
            action_time: ctx.rules.action_init_time,
            level: START_LEVEL,
            exp: 0,
            exp_to_next_level: levels.exp_to_next_level,
            score: 0,
            combo: 0,
            last_clear_time: None,
            outcome: None,
        }
    }

    /// Bare snapshot with explicit pieces and ground; used by tests and replays.
    pub fn with_board(user_name: impl Into<String>, piece: Piece, next: Piece, ground: Ground) -> Self {
        Self {
            user_name: user_name.into(),
            who: String::new(),
            state: PlayerStatus::Game,
            piece,
            next,
            ground,
            action_time: 0,
            level: START_LEVEL,
            exp: 0,
            exp_to_next_level: crate::config::EXP_LEVEL_THRESHOLDS[START_LEVEL as usize],
            score: 0,
            combo: 0,
            last_clear_time: None,
            outcome: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerStatus::Game
    }
}
