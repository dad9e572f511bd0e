//! Room tests - two-phase ticks, garbage fan-out, elimination and winners

use tetris_arena::core::board::Ground;
use tetris_arena::core::config::LuckyThresholds;
use tetris_arena::core::pieces::{Piece, PieceQueue};
use tetris_arena::core::rng::{ManualClock, SimpleRng};
use tetris_arena::core::{PlayerState, RulesConfig};
use tetris_arena::room::{AttackEvent, Room};
use tetris_arena::types::{Block, PieceKind, PlayerStatus, BOARD_WIDTH};

type TestRoom = Room<SimpleRng, ManualClock, PieceQueue>;

fn room() -> TestRoom {
    // No lucky multipliers, so experience stays below level 2 and attack
    // power depends on lines and combo only.
    let rules = RulesConfig {
        action_init_time: 0,
        initial_garbage_rows: 0,
        lucky: LuckyThresholds {
            diamond: 0.0,
            star: 0.0,
            gift: 0.0,
        },
        ..RulesConfig::default()
    };
    Room::new("r", rules, 4, SimpleRng::new(77), ManualClock::new(0), PieceQueue::new(77))
}

/// Rows full except column 10, bar in the gap; clears on its first gravity tick.
fn clearing(name: &str, rows: &[i32]) -> PlayerState {
    let ground = Ground::from_blocks(
        rows.iter()
            .flat_map(|&y| (1..BOARD_WIDTH).map(move |x| Block::new(x, y))),
    );
    let piece = Piece::new(PieceKind::I, rows.iter().map(|&y| Block::new(BOARD_WIDTH, y)).collect());
    PlayerState::with_board(name, piece, Piece::spawn(PieceKind::T), ground)
}

fn idle(name: &str, ground: Ground) -> PlayerState {
    PlayerState::with_board(name, Piece::spawn(PieceKind::O), Piece::spawn(PieceKind::T), ground)
}

#[test]
fn test_attack_fans_out_to_every_opponent() {
    let mut room = room();
    room.seat(clearing("a", &[19, 20])).unwrap();
    room.seat(idle("b", Ground::new())).unwrap();
    room.seat(idle("c", Ground::new())).unwrap();

    let report = room.tick();
    assert_eq!(
        report.attacks,
        vec![
            AttackEvent { from: "a".into(), to: "b".into(), rows: 1 },
            AttackEvent { from: "a".into(), to: "c".into(), rows: 1 },
        ]
    );

    for name in ["b", "c"] {
        let p = room.player(name).unwrap();
        assert_eq!(p.ground.row_count(20), BOARD_WIDTH as usize - 1, "{name}");
        assert_eq!(p.state, PlayerStatus::Game);
    }
    assert!(room.player("a").unwrap().ground.is_empty());
}

#[test]
fn test_simultaneous_attacks_resolve_symmetrically() {
    let mut room = room();
    room.seat(clearing("a", &[19, 20])).unwrap();
    room.seat(clearing("b", &[19, 20])).unwrap();

    let report = room.tick();
    assert_eq!(report.attacks.len(), 2);

    // Each cleared its own rows before garbage arrived.
    for name in ["a", "b"] {
        let p = room.player(name).unwrap();
        assert_eq!(p.ground.len(), BOARD_WIDTH as usize - 1, "{name}");
        assert_eq!(p.ground.row_count(20), BOARD_WIDTH as usize - 1, "{name}");
    }
}

#[test]
fn test_garbage_top_out_eliminates_and_crowns_winner() {
    let mut room = room();
    room.seat(clearing("a", &[18, 19, 20])).unwrap();
    room.seat(idle("b", Ground::from_blocks([Block::new(1, 3)]))).unwrap();

    let report = room.tick();
    assert_eq!(report.attacks[0].rows, 2);
    assert_eq!(report.eliminated, vec!["b".to_string()]);
    assert_eq!(report.winner.as_deref(), Some("a"));
    assert!(report.finished);

    let b = room.player("b").unwrap();
    assert_eq!(b.state, PlayerStatus::Eliminated);
    assert!(b.ground.contains(&Block::new(1, 1)));

    // Finished rooms stop advancing.
    let again = room.tick();
    assert_eq!(again.tick, report.tick);
    assert!(again.attacks.is_empty());
}

#[test]
fn test_everyone_topping_out_together_stays_lose() {
    let mut room = room();
    room.seat(idle("a", Ground::from_blocks([Block::new(5, 3)]))).unwrap();
    room.seat(idle("b", Ground::from_blocks([Block::new(5, 3)]))).unwrap();

    let report = room.tick();
    assert!(report.finished);
    assert!(report.winner.is_none());
    assert!(report.eliminated.is_empty());
    assert!(report.players.iter().all(|p| p.state == PlayerStatus::Lose));
}

#[test]
fn test_single_player_room_finishes_on_loss() {
    let mut room = room();
    room.seat(idle("solo", Ground::from_blocks([Block::new(6, 3)]))).unwrap();

    let report = room.tick();
    assert!(report.finished);
    assert!(report.winner.is_none());
    assert_eq!(report.players[0].state, PlayerStatus::Lose);
}

#[test]
fn test_attacks_skip_players_already_out() {
    let mut room = room();
    room.seat(clearing("a", &[19, 20])).unwrap();
    room.seat(idle("b", Ground::new())).unwrap();
    let mut gone = idle("c", Ground::new());
    gone.state = PlayerStatus::Eliminated;
    room.seat(gone).unwrap();

    let report = room.tick();
    assert_eq!(report.attacks.len(), 1);
    assert_eq!(report.attacks[0].to, "b");
    assert!(room.player("c").unwrap().ground.is_empty());
}

#[test]
fn test_joined_players_draw_from_room() {
    let rules = RulesConfig::default();
    let mut room: TestRoom = Room::new("r", rules, 2, SimpleRng::new(1), ManualClock::new(0), PieceQueue::new(1));
    let a = room.join("a", "host").unwrap().clone();
    let b = room.join("b", "guest").unwrap().clone();

    assert_eq!(a.who, "host");
    assert_eq!(b.who, "guest");
    assert_eq!(a.ground.len(), 2 * (BOARD_WIDTH as usize - 1));
    // Consecutive draws from one 7-bag never repeat within the first bag.
    assert_ne!(a.piece.kind, b.piece.kind);
}

#[test]
fn test_zero_hole_config_still_sends_holed_garbage() {
    let rules = RulesConfig {
        garbage_hole_count: 0,
        ..room().rules().clone()
    };
    let mut room: TestRoom = Room::new("r", rules, 2, SimpleRng::new(5), ManualClock::new(0), PieceQueue::new(5));
    room.seat(clearing("a", &[19, 20])).unwrap();
    room.seat(idle("b", Ground::new())).unwrap();

    room.tick();
    let b = room.player("b").unwrap();
    assert_eq!(b.ground.row_count(20), BOARD_WIDTH as usize - 1);

    // The garbage row must not clear itself on the victim's next tick.
    room.tick();
    let b = room.player("b").unwrap();
    assert!(b.outcome.is_none());
    assert_eq!(b.score, 0);
    assert_eq!(b.ground.row_count(20), BOARD_WIDTH as usize - 1);
}
