use thiserror::Error;

/// Internal-consistency failures. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The hard-drop loop moved the piece more rows than the board has.
    /// Only reachable from corrupted state (e.g. an empty piece).
    #[error("hard drop for player {player:?} did not land within {bound} steps")]
    DropBoundExceeded { player: String, bound: i32 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
