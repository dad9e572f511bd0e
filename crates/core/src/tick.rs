//! Tick orchestrator - one deterministic transition per player per tick
//!
//! ```text
//! process_tick(player)
//!   LOSE | ELIMINATED      -> unchanged
//!   action_time > 0        -> action_time - 1
//!   otherwise              -> move_down -> clear -> (combo, exp, level, score, attack)
//! ```
//!
//! Randomness, time and new pieces come in through [`TickContext`]; nothing here
//! reads globals or performs I/O.

use tracing::{debug, info};

use crate::attack::{add_garbage_lines, calculate_attack_power};
use crate::board::Ground;
use crate::config::RulesConfig;
use crate::error::Result;
use crate::line_clear;
use crate::movement::{hard_drop, is_legal, move_down, move_left, move_right, rotate_apply};
use crate::pieces::PieceSource;
use crate::player::{ClearOutcome, PlayerState};
use crate::progression::{check_level_up, compute_exp, score_delta, update_combo};
use crate::rng::{Clock, RandomSource};
use crate::types::{Command, PlayerStatus};

/// Row whose occupation ends the game.
pub const TOP_ROW: i32 = 1;

/// Capabilities a transition may draw on.
pub struct TickContext<'a> {
    pub rules: &'a RulesConfig,
    pub rng: &'a mut dyn RandomSource,
    pub clock: &'a dyn Clock,
    pub pieces: &'a mut dyn PieceSource,
}

impl<'a> TickContext<'a> {
    pub fn new(
        rules: &'a RulesConfig,
        rng: &'a mut dyn RandomSource,
        clock: &'a dyn Clock,
        pieces: &'a mut dyn PieceSource,
    ) -> Self {
        Self {
            rules,
            rng,
            clock,
            pieces,
        }
    }
}

/// `LOSE` once any settled block reaches the top row. Blocks lifted above the
/// board by garbage count as well.
pub fn is_game_over(ground: &Ground) -> PlayerStatus {
    if ground.iter().any(|b| b.y <= TOP_ROW) {
        PlayerStatus::Lose
    } else {
        PlayerStatus::Game
    }
}

fn with_game_over_check(mut player: PlayerState) -> PlayerState {
    if player.state == PlayerStatus::Game {
        player.state = is_game_over(&player.ground);
        if player.state == PlayerStatus::Lose {
            info!(player = %player.user_name, "topped out");
        }
    }
    player
}

/// Advance one player by one tick.
pub fn process_tick(player: &PlayerState, ctx: &mut TickContext<'_>) -> PlayerState {
    if player.state.is_terminal() {
        return player.clone();
    }

    if player.action_time > 0 {
        return PlayerState {
            action_time: player.action_time - 1,
            outcome: None,
            ..player.clone()
        };
    }

    let moved = PlayerState {
        outcome: None,
        ..move_down(player, ctx)
    };

    let cleared = line_clear::clear(&moved.ground);
    if cleared.lines_cleared() == 0 {
        return with_game_over_check(moved);
    }

    let lines = cleared.lines_cleared();
    let now = ctx.clock.now_ms();
    let combo = update_combo(moved.combo, moved.last_clear_time, now, ctx.rules.combo_timeout_ms);
    let gain = compute_exp(lines, combo, &mut *ctx.rng, &ctx.rules.lucky);
    let exp = moved.exp + gain.exp;
    let levels = check_level_up(
        moved.level,
        exp,
        &ctx.rules.level_thresholds,
        ctx.rules.max_level_sentinel,
    );
    let score = moved.score + score_delta(lines, combo);
    let attack_power = calculate_attack_power(lines, levels.level, combo);

    if levels.leveled_up {
        info!(
            player = %moved.user_name,
            from = moved.level,
            to = levels.level,
            "level up"
        );
    }
    debug!(
        player = %moved.user_name,
        lines,
        combo,
        gained_exp = gain.exp,
        exp,
        score,
        attack_power,
        "rows cleared"
    );

    let outcome = ClearOutcome {
        cleared_line_numbers: cleared.cleared_rows.to_vec(),
        lines_cleared: lines,
        attack_power,
        gained_exp: gain.exp,
        lucky_event: gain.lucky_event,
        leveled_up: levels.leveled_up,
    };

    with_game_over_check(PlayerState {
        ground: cleared.ground,
        level: levels.level,
        exp,
        exp_to_next_level: levels.exp_to_next_level,
        score,
        combo,
        last_clear_time: Some(now),
        outcome: Some(outcome),
        ..moved
    })
}

/// Apply one player command. Terminal players ignore input.
///
/// `Drop` locks immediately but does not clear rows; the next gravity tick does.
pub fn apply_input(player: &PlayerState, command: Command, ctx: &mut TickContext<'_>) -> Result<PlayerState> {
    if player.state.is_terminal() {
        return Ok(player.clone());
    }

    let next = match command {
        Command::Left => move_left(player),
        Command::Right => move_right(player),
        Command::Rotate => rotate_apply(player),
        Command::Drop => with_game_over_check(hard_drop(player, ctx)?),
    };

    Ok(next)
}

/// Push `count` garbage rows under a player's stack and re-check for a top-out.
pub fn receive_garbage(player: &PlayerState, count: u32, ctx: &mut TickContext<'_>) -> PlayerState {
    if player.state.is_terminal() || count == 0 {
        return player.clone();
    }

    let ground = add_garbage_lines(
        &player.ground,
        count,
        ctx.rules.garbage_hole_count,
        &mut *ctx.rng,
    );
    if !is_legal(&player.piece, &ground) {
        debug!(player = %player.user_name, count, "garbage lifted into the falling piece");
    }

    with_game_over_check(PlayerState {
        ground,
        ..player.clone()
    })
}
