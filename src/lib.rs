//! Tetris arena (workspace facade crate).
//!
//! Re-exports the `tetris_arena::{core,room,host,types}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use tetris_arena_core as core;
pub use tetris_arena_host as host;
pub use tetris_arena_room as room;
pub use tetris_arena_types as types;
