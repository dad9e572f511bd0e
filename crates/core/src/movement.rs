//! Collision & movement engine
//!
//! Every move builds a candidate piece and admits it only through [`is_legal`].
//! Illegal candidates are dropped whole; nothing is ever partially applied.
//! Only downward movement can lock a piece.

use tracing::debug;

use crate::board::{in_bounds, Ground};
use crate::error::{EngineError, Result};
use crate::pieces::Piece;
use crate::player::PlayerState;
use crate::tick::TickContext;
use crate::types::{Block, BOARD_HEIGHT};

/// Shift every block of the piece by `(dx, dy)`.
pub fn translate(piece: &Piece, dx: i32, dy: i32) -> Piece {
    Piece {
        kind: piece.kind,
        blocks: piece.blocks.iter().map(|b| b.offset(dx, dy)).collect(),
    }
}

/// Rotate 90° about block 0. An empty piece comes back unchanged.
pub fn rotate(piece: &Piece) -> Piece {
    let Some(pivot) = piece.pivot() else {
        return piece.clone();
    };

    Piece {
        kind: piece.kind,
        blocks: piece
            .blocks
            .iter()
            .map(|b| {
                let rel_x = b.x - pivot.x;
                let rel_y = b.y - pivot.y;
                Block::new(pivot.x - rel_y, pivot.y + rel_x)
            })
            .collect(),
    }
}

/// True iff every block is inside the board and off the ground.
pub fn is_legal(candidate: &Piece, ground: &Ground) -> bool {
    candidate
        .blocks
        .iter()
        .all(|b| in_bounds(b.x, b.y) && !ground.contains(b))
}

/// Substitute `candidate` if legal, otherwise return the player unchanged.
fn try_substitute(player: &PlayerState, candidate: Piece) -> PlayerState {
    if player.piece.is_empty() || !is_legal(&candidate, &player.ground) {
        return player.clone();
    }
    PlayerState {
        piece: candidate,
        ..player.clone()
    }
}

pub fn move_left(player: &PlayerState) -> PlayerState {
    try_substitute(player, translate(&player.piece, -1, 0))
}

pub fn move_right(player: &PlayerState) -> PlayerState {
    try_substitute(player, translate(&player.piece, 1, 0))
}

pub fn rotate_apply(player: &PlayerState) -> PlayerState {
    try_substitute(player, rotate(&player.piece))
}

/// Settle the current piece into the ground, promote the held next piece and
/// request a fresh one from the supplier.
fn lock_and_promote(player: &PlayerState, ctx: &mut TickContext<'_>) -> PlayerState {
    let ground = player.ground.insert_blocks(player.piece.blocks.iter().copied());
    let next = ctx.pieces.next_piece();

    debug!(
        player = %player.user_name,
        kind = player.piece.kind.as_str(),
        ground_blocks = ground.len(),
        "piece locked"
    );

    PlayerState {
        ground,
        piece: player.next.clone(),
        next,
        action_time: ctx.rules.action_init_time,
        ..player.clone()
    }
}

/// One gravity step. On collision the piece locks; either way the gravity
/// countdown restarts.
pub fn move_down(player: &PlayerState, ctx: &mut TickContext<'_>) -> PlayerState {
    if player.piece.is_empty() {
        return PlayerState {
            action_time: ctx.rules.action_init_time,
            ..player.clone()
        };
    }

    let candidate = translate(&player.piece, 0, 1);
    if !is_legal(&candidate, &player.ground) {
        return lock_and_promote(player, ctx);
    }

    PlayerState {
        piece: candidate,
        action_time: ctx.rules.action_init_time,
        ..player.clone()
    }
}

/// Step cap for [`hard_drop`].
pub const HARD_DROP_STEPS: i32 = BOARD_HEIGHT + 1;

/// Drop the piece as far as it goes and lock it.
///
/// Each iteration moves one row down, so a well-formed piece collides within
/// [`HARD_DROP_STEPS`] steps. Running past that means the state is corrupt.
pub fn hard_drop(player: &PlayerState, ctx: &mut TickContext<'_>) -> Result<PlayerState> {
    let mut current = player.piece.clone();

    for _ in 0..HARD_DROP_STEPS {
        let candidate = translate(&current, 0, 1);
        if !is_legal(&candidate, &player.ground) {
            let dropped = PlayerState {
                piece: current,
                ..player.clone()
            };
            return Ok(lock_and_promote(&dropped, ctx));
        }
        current = candidate;
    }

    Err(EngineError::DropBoundExceeded {
        player: player.user_name.clone(),
        bound: HARD_DROP_STEPS,
    })
}
