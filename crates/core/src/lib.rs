//! Arena engine core - pure, deterministic per-player transitions
//!
//! This crate owns every rule of the multiplayer falling-block game: collision,
//! locking, line clears, combo chains, experience and leveling, and the size and
//! shape of garbage attacks. It never touches I/O, never reads the wall clock or a
//! global RNG on its own, and never mutates a player in place.
//!
//! # Module Structure
//!
//! - [`board`]: playfield bounds and the settled [`Ground`]
//! - [`pieces`]: spawn shapes, the [`PieceSource`] seam and the 7-bag [`PieceQueue`]
//! - [`rng`]: injected [`RandomSource`] and [`Clock`] implementations
//! - [`movement`]: translation, rotation about block 0, lock-and-promote, hard drop
//! - [`line_clear`]: full-row detection and compaction
//! - [`progression`]: combo, experience, lucky events, levels, score
//! - [`attack`]: attack power and garbage rows
//! - [`player`]: the [`PlayerState`] snapshot
//! - [`tick`]: [`process_tick`], [`apply_input`] and [`receive_garbage`]
//! - [`config`]: balancing constants and [`RulesConfig`]
//!
//! # Example
//!
//! ```
//! use tetris_arena_core::{process_tick, PieceQueue, PlayerState, RulesConfig, SimpleRng, TickContext};
//! use tetris_arena_core::rng::ManualClock;
//!
//! let rules = RulesConfig::default();
//! let mut rng = SimpleRng::new(7);
//! let clock = ManualClock::new(0);
//! let mut queue = PieceQueue::new(7);
//! let mut ctx = TickContext::new(&rules, &mut rng, &clock, &mut queue);
//!
//! let player = PlayerState::new("alice", "host", &mut ctx);
//! let after = process_tick(&player, &mut ctx);
//! assert_eq!(after.action_time, player.action_time - 1);
//! ```

pub mod attack;
pub mod board;
pub mod config;
pub mod error;
pub mod line_clear;
pub mod movement;
pub mod pieces;
pub mod player;
pub mod progression;
pub mod rng;
pub mod tick;

pub use tetris_arena_types as types;

// Re-export commonly used types for convenience
pub use attack::{add_garbage_lines, calculate_attack_power, generate_garbage_lines, initial_ground};
pub use board::{insert_block_to_ground, Ground};
pub use config::RulesConfig;
pub use error::{EngineError, Result};
pub use line_clear::{clear as clear_lines, ClearResult};
pub use movement::{hard_drop, move_down, move_left, move_right, rotate_apply};
pub use pieces::{Piece, PieceQueue, PieceSource};
pub use player::{ClearOutcome, PlayerState};
pub use progression::{check_level_up, compute_exp, update_combo};
pub use rng::{Clock, RandomSource, SimpleRng, StdRandom, SystemClock};
pub use tick::{apply_input, is_game_over, process_tick, receive_garbage, TickContext};
