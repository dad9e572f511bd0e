//! Progression module - combo chains, experience, lucky events and leveling
//!
//! Experience is intentionally noisy: a uniform factor and an optional lucky
//! multiplier are applied on top of the line table. Each multiplication step is
//! truncated to an integer in the order base → random → combo → lucky, so clients
//! replaying the same draws see the same numbers.

use tracing::{debug, info};

use crate::config::LuckyThresholds;
use crate::rng::RandomSource;
use crate::types::{LuckyEvent, LuckyKind};

/// Experience per line count; larger clears fall back to `lines * 100`.
pub const BASE_EXP: [u64; 5] = [0, 100, 200, 300, 400];

/// Score points per cleared line.
pub const LINE_SCORE: u64 = 100;

/// Extra score per combo step past the first.
pub const COMBO_SCORE: u64 = 50;

/// Combo after a clear at `now`.
///
/// A player who never cleared has `prev_combo == 0` and no timestamp, giving 1.
/// Elapsed time equal to the timeout still chains; only strictly greater resets.
pub fn update_combo(prev_combo: u32, last_clear_time: Option<u64>, now: u64, timeout_ms: u64) -> u32 {
    match last_clear_time {
        Some(last) if now.saturating_sub(last) > timeout_ms => 1,
        _ => prev_combo + 1,
    }
}

/// One draw, compared against cumulative thresholds rarest first.
pub fn roll_lucky_event(rng: &mut dyn RandomSource, thresholds: &LuckyThresholds) -> Option<LuckyEvent> {
    let draw = rng.next_f64();

    let kind = if draw < thresholds.diamond {
        LuckyKind::Diamond
    } else if draw < thresholds.star {
        LuckyKind::Star
    } else if draw < thresholds.gift {
        LuckyKind::Gift
    } else {
        return None;
    };

    Some(LuckyEvent::from(kind))
}

/// Combo multiplier on experience.
pub fn combo_exp_multiplier(combo: u32) -> f64 {
    match combo {
        0..=1 => 1.0,
        2..=3 => 1.5,
        _ => 2.0,
    }
}

pub fn base_exp(lines_cleared: u32) -> u64 {
    BASE_EXP
        .get(lines_cleared as usize)
        .copied()
        .filter(|&exp| exp > 0)
        .unwrap_or(lines_cleared as u64 * 100)
}

/// Experience granted for a clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpGain {
    pub exp: u64,
    pub lucky_event: Option<LuckyEvent>,
}

/// Experience for a clear: base table, × uniform `[0.5, 1.5)`, × combo, × lucky.
///
/// Draw order is fixed: the random factor first, then the lucky roll.
pub fn compute_exp(
    lines_cleared: u32,
    combo: u32,
    rng: &mut dyn RandomSource,
    thresholds: &LuckyThresholds,
) -> ExpGain {
    let base = base_exp(lines_cleared);

    let random_factor = 0.5 + rng.next_f64();
    let randomized = (base as f64 * random_factor).floor() as u64;

    let combo_multiplier = combo_exp_multiplier(combo);
    let mut exp = (randomized as f64 * combo_multiplier).floor() as u64;

    let lucky_event = roll_lucky_event(rng, thresholds);
    if let Some(event) = lucky_event {
        exp = (exp as f64 * event.multiplier).floor() as u64;
        info!(kind = ?event.kind, multiplier = event.multiplier, "lucky event");
    }

    debug!(
        base,
        random_factor,
        combo_multiplier,
        exp,
        "experience computed"
    );

    ExpGain { exp, lucky_event }
}

/// Level after accumulating experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub exp_to_next_level: u64,
    pub leveled_up: bool,
}

/// Climb the threshold table while `total_exp` meets the next threshold.
/// Several levels can be gained at once.
pub fn check_level_up(level: u32, total_exp: u64, thresholds: &[u64], max_sentinel: u64) -> LevelUp {
    let mut new_level = level;
    let mut leveled_up = false;

    while (new_level as usize) < thresholds.len() && total_exp >= thresholds[new_level as usize] {
        new_level += 1;
        leveled_up = true;
    }

    let exp_to_next_level = thresholds
        .get(new_level as usize)
        .copied()
        .unwrap_or(max_sentinel);

    LevelUp {
        level: new_level,
        exp_to_next_level,
        leveled_up,
    }
}

/// Score for a clearing tick: 100 per line plus 50 per combo step past the first.
pub fn score_delta(lines_cleared: u32, combo: u32) -> u64 {
    let combo_bonus = if combo > 1 {
        (combo as u64 - 1) * COMBO_SCORE
    } else {
        0
    };
    lines_cleared as u64 * LINE_SCORE + combo_bonus
}
