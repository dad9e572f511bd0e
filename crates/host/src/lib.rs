//! Host module - runs a room behind a line-delimited JSON protocol
//!
//! One process hosts one room. Clients speak newline-terminated JSON objects
//! tagged by `type`:
//!
//! ## Client → Host
//!
//! - **join**: `{"type":"join","user_name":"alice","who":"host"}` (`who` optional)
//! - **input**: `{"type":"input","user_name":"alice","command":"left"}` where
//!   `command` is one of `left`, `right`, `rotate`, `drop`
//! - **leave**: `{"type":"leave","user_name":"alice"}`
//!
//! ## Host → Client
//!
//! - **joined** / **left**: membership acknowledgements
//! - **tick**: full room snapshot after every tick (players, attacks,
//!   eliminations, winner)
//! - **error**: `{"type":"error","code":"unknown_player","message":"..."}`
//!
//! Lines that fail to parse are answered with an `invalid_message` error; they
//! never stop the room.
//!
//! # Environment Variables
//!
//! - `ARENA_ROOM_ID`: room name in logs (default: "arena")
//! - `ARENA_TICK_MS`: tick interval in milliseconds (default: 100)
//! - `ARENA_SEED`: fixed seed for reproducible games
//! - `ARENA_MAX_PLAYERS`: room capacity (default: 4)
//! - `ARENA_MAX_TICKS`: stop after this many ticks
//! - `ARENA_ACTION_INIT_TIME`, `ARENA_COMBO_TIMEOUT_MS`, `ARENA_GARBAGE_HOLES`,
//!   `ARENA_INITIAL_GARBAGE`: rules overrides, see [`RulesConfig`](tetris_arena_core::RulesConfig)

pub mod config;
pub mod protocol;
pub mod runtime;

pub use tetris_arena_core as core;
pub use tetris_arena_room as room;
pub use tetris_arena_types as types;

pub use config::HostConfig;
pub use protocol::{encode_line, parse_message, ClientMessage, ErrorCode, ServerMessage};
pub use runtime::{handle_line, run_room, serve_room};
