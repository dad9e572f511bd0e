//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the arena engine, the room
//! manager and the host protocol. Everything here is plain data: no randomness,
//! no clocks, no I/O.
//!
//! # Board Dimensions
//!
//! The playfield is 1-indexed, matching the wire format clients already use:
//!
//! - **Width**: 10 columns (x in 1..=10)
//! - **Height**: 20 rows (y in 1..=20, row 1 is the top)
//!
//! A settled block on row 1 means the stack touched the ceiling and the board is lost.
//!
//! # Examples
//!
//! ```
//! use tetris_arena_types::{Block, Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let b = Block::new(3, 10);
//! assert!(b.in_bounds());
//! assert!(!Block::new(0, 10).in_bounds());
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("drop"), Some(Command::Drop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: i32 = 20;

/// Column the spawn shapes are centred on.
pub const SPAWN_COLUMN: i32 = 5;

/// A single grid cell.
///
/// Coordinates are signed: garbage pushes the stack upwards and may leave blocks
/// above row 1 until the game-over check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Block {
    pub x: i32,
    pub y: i32,
}

impl Block {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the block lies inside the `W x H` playfield.
    pub fn in_bounds(&self) -> bool {
        (1..=BOARD_WIDTH).contains(&self.x) && (1..=BOARD_HEIGHT).contains(&self.y)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Tetromino piece kinds (the piece "type tag")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_arena_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Player movement commands delivered by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Rotate piece 90° about its pivot block
    Rotate,
    /// Drop piece to the lowest legal position and lock it
    Drop,
}

impl Command {
    /// Parse a command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_arena_types::Command;
    ///
    /// assert_eq!(Command::from_str("LEFT"), Some(Command::Left));
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "rotate" => Some(Command::Rotate),
            "drop" => Some(Command::Drop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Rotate => "rotate",
            Command::Drop => "drop",
        }
    }
}

/// Player lifecycle state
///
/// `Lose` and `Eliminated` are absorbing: once reached, the board never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerStatus {
    Game,
    Lose,
    Eliminated,
}

impl PlayerStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlayerStatus::Lose | PlayerStatus::Eliminated)
    }
}

/// Randomized experience bonus kinds, rarest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuckyKind {
    Diamond,
    Star,
    Gift,
}

impl LuckyKind {
    /// Experience multiplier applied when this event rolls.
    pub fn multiplier(&self) -> f64 {
        match self {
            LuckyKind::Diamond => 3.0,
            LuckyKind::Star => 2.0,
            LuckyKind::Gift => 1.5,
        }
    }
}

/// A rolled lucky event as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuckyEvent {
    pub kind: LuckyKind,
    pub multiplier: f64,
}

impl From<LuckyKind> for LuckyEvent {
    fn from(kind: LuckyKind) -> Self {
        Self {
            kind,
            multiplier: kind.multiplier(),
        }
    }
}
