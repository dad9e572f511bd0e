//! Pieces module - falling block groups and the default piece supplier
//!
//! A [`Piece`] is an ordered list of blocks; block 0 is the rotation pivot.
//! Where the next piece comes from is up to the caller: anything implementing
//! [`PieceSource`] works, including plain closures. [`PieceQueue`] is the stock
//! 7-bag supplier.

use serde::{Deserialize, Serialize};

use crate::rng::SimpleRng;
use crate::types::{Block, PieceKind, SPAWN_COLUMN};

/// A falling block group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub blocks: Vec<Block>,
}

impl Piece {
    pub fn new(kind: PieceKind, blocks: Vec<Block>) -> Self {
        Self { kind, blocks }
    }

    /// The piece in its spawn orientation at the top of the board.
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, spawn_blocks(kind).to_vec())
    }

    /// Rotation pivot (block 0), if the piece has any blocks.
    pub fn pivot(&self) -> Option<Block> {
        self.blocks.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Spawn layout per kind, pivot first, centred on [`SPAWN_COLUMN`] in rows 1-2.
pub fn spawn_blocks(kind: PieceKind) -> [Block; 4] {
    let c = SPAWN_COLUMN;
    let b = Block::new;
    match kind {
        PieceKind::I => [b(c, 1), b(c - 1, 1), b(c + 1, 1), b(c + 2, 1)],
        PieceKind::O => [b(c, 1), b(c + 1, 1), b(c, 2), b(c + 1, 2)],
        PieceKind::T => [b(c, 1), b(c - 1, 1), b(c + 1, 1), b(c, 2)],
        PieceKind::S => [b(c, 1), b(c + 1, 1), b(c - 1, 2), b(c, 2)],
        PieceKind::Z => [b(c, 1), b(c - 1, 1), b(c, 2), b(c + 1, 2)],
        PieceKind::J => [b(c, 1), b(c - 1, 1), b(c + 1, 1), b(c + 1, 2)],
        PieceKind::L => [b(c, 1), b(c - 1, 1), b(c + 1, 1), b(c - 1, 2)],
    }
}

/// Supplier of the next falling piece. Called exactly once per lock event.
pub trait PieceSource {
    fn next_piece(&mut self) -> Piece;
}

impl<F: FnMut() -> Piece> PieceSource for F {
    fn next_piece(&mut self) -> Piece {
        self()
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind from the queue
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Kinds left in the current bag.
    pub fn remaining_in_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for PieceQueue {
    fn next_piece(&mut self) -> Piece {
        Piece::spawn(self.draw())
    }
}
