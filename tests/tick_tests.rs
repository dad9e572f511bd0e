//! Tick orchestrator tests

use tetris_arena::core::board::Ground;
use tetris_arena::core::pieces::{Piece, PieceQueue};
use tetris_arena::core::rng::{ManualClock, ScriptedRng};
use tetris_arena::core::{apply_input, process_tick, receive_garbage, PlayerState, RulesConfig, TickContext};
use tetris_arena::types::{Block, Command, LuckyKind, PlayerStatus, BOARD_WIDTH};

struct Env {
    rules: RulesConfig,
    rng: ScriptedRng,
    clock: ManualClock,
    queue: PieceQueue,
}

impl Env {
    fn new(draws: Vec<f64>) -> Self {
        Self {
            rules: RulesConfig::default(),
            rng: ScriptedRng::new(draws).with_fallback(0.5),
            clock: ManualClock::new(1_000),
            queue: PieceQueue::new(21),
        }
    }

    fn ctx(&mut self) -> TickContext<'_> {
        TickContext::new(&self.rules, &mut self.rng, &self.clock, &mut self.queue)
    }
}

/// Rows `rows` full except column 10, with a vertical bar filling that gap.
fn ready_to_clear(rows: &[i32]) -> PlayerState {
    let ground = Ground::from_blocks(
        rows.iter()
            .flat_map(|&y| (1..BOARD_WIDTH).map(move |x| Block::new(x, y))),
    );
    let piece = Piece::new(
        tetris_arena::types::PieceKind::I,
        rows.iter().map(|&y| Block::new(BOARD_WIDTH, y)).collect(),
    );
    PlayerState::with_board("p", piece, Piece::spawn(tetris_arena::types::PieceKind::T), ground)
}

#[test]
fn test_new_player_starts_with_garbage() {
    let mut env = Env::new(vec![]);
    let player = PlayerState::new("alice", "host", &mut env.ctx());

    assert_eq!(player.state, PlayerStatus::Game);
    assert_eq!(player.level, 1);
    assert_eq!(player.exp_to_next_level, 500);
    assert_eq!(player.action_time, env.rules.action_init_time);
    assert_eq!(player.ground.row_count(20), BOARD_WIDTH as usize - 1);
    assert_eq!(player.ground.row_count(19), BOARD_WIDTH as usize - 1);
    assert_eq!(player.ground.len(), 2 * (BOARD_WIDTH as usize - 1));
}

#[test]
fn test_countdown_then_gravity() {
    let mut env = Env::new(vec![]);
    let mut player = PlayerState::new("alice", "host", &mut env.ctx());
    let start = player.piece.clone();

    for expected in (0..env.rules.action_init_time).rev() {
        player = process_tick(&player, &mut env.ctx());
        assert_eq!(player.action_time, expected);
        assert_eq!(player.piece, start);
    }

    player = process_tick(&player, &mut env.ctx());
    assert_ne!(player.piece, start);
    assert_eq!(player.action_time, env.rules.action_init_time);
}

#[test]
fn test_tetris_outcome_fields() {
    // random 0.5 -> factor 1.0; lucky 0.03 -> star x2
    let mut env = Env::new(vec![0.5, 0.03]);
    let player = ready_to_clear(&[17, 18, 19, 20]);
    let next = process_tick(&player, &mut env.ctx());

    let outcome = next.outcome.expect("outcome");
    assert_eq!(outcome.cleared_line_numbers, vec![17, 18, 19, 20]);
    assert_eq!(outcome.lines_cleared, 4);
    assert_eq!(outcome.gained_exp, 800);
    assert_eq!(outcome.lucky_event.map(|e| e.kind), Some(LuckyKind::Star));
    assert!(outcome.leveled_up);
    // level 2 after 800 exp: 3 + 0 + 0
    assert_eq!(outcome.attack_power, 3);

    assert_eq!(next.level, 2);
    assert_eq!(next.exp, 800);
    assert_eq!(next.exp_to_next_level, 1_200);
    assert_eq!(next.score, 400);
    assert!(next.ground.is_empty());
}

#[test]
fn test_combo_carries_across_clears() {
    let mut env = Env::new(vec![]);
    let mut player = ready_to_clear(&[20]);
    player.combo = 2;
    player.last_clear_time = Some(0);
    env.clock.set(3_000);

    let next = process_tick(&player, &mut env.ctx());
    assert_eq!(next.combo, 3);
    assert_eq!(next.score, 100 + 2 * 50);
    assert_eq!(next.last_clear_time, Some(3_000));
}

#[test]
fn test_combo_resets_after_gap() {
    let mut env = Env::new(vec![]);
    let mut player = ready_to_clear(&[20]);
    player.combo = 5;
    player.last_clear_time = Some(0);
    env.clock.set(3_001);

    let next = process_tick(&player, &mut env.ctx());
    assert_eq!(next.combo, 1);
}

#[test]
fn test_lock_at_top_loses() {
    let mut env = Env::new(vec![]);
    let ground = Ground::from_blocks([Block::new(5, 3)]);
    let player = PlayerState::with_board(
        "p",
        Piece::spawn(tetris_arena::types::PieceKind::O),
        Piece::spawn(tetris_arena::types::PieceKind::T),
        ground,
    );

    let next = process_tick(&player, &mut env.ctx());
    assert_eq!(next.state, PlayerStatus::Lose);

    // Absorbing from here on.
    let after = process_tick(&next, &mut env.ctx());
    assert_eq!(after, next);
    assert_eq!(apply_input(&next, Command::Left, &mut env.ctx()).unwrap(), next);
    assert_eq!(receive_garbage(&next, 3, &mut env.ctx()), next);
}

#[test]
fn test_inputs_do_not_touch_gravity_timer() {
    let mut env = Env::new(vec![]);
    let player = PlayerState::new("alice", "host", &mut env.ctx());
    let moved = apply_input(&player, Command::Right, &mut env.ctx()).unwrap();
    assert_eq!(moved.action_time, player.action_time);
    assert_eq!(moved.piece.blocks[0].x, player.piece.blocks[0].x + 1);
}
