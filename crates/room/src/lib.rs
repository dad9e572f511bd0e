//! Room manager - players sharing one clock, one RNG and each other's garbage
//!
//! The core computes every player's transition in isolation. A [`Room`] owns the
//! cross-player part of a game:
//!
//! - **Two-phase tick**: all players advance first, then the attacks they produced
//!   are summed per target and applied in one pass, so the outcome does not depend
//!   on which player was processed first.
//! - **Fan-out**: each attack hits every opponent still in `GAME` after phase 1.
//! - **Elimination**: a `LOSE` player becomes `ELIMINATED` while someone else is
//!   still playing. When everyone left tops out on the same tick they stay `LOSE`.
//! - **Winner**: the last player in `GAME` of a multi-player room.
//!
//! # Example
//!
//! ```
//! use tetris_arena_core::{PieceQueue, RulesConfig, SimpleRng};
//! use tetris_arena_core::rng::ManualClock;
//! use tetris_arena_room::Room;
//! use tetris_arena_types::Command;
//!
//! let mut room = Room::new("lobby", RulesConfig::default(), 4, SimpleRng::new(1), ManualClock::new(0), PieceQueue::new(1));
//! room.join("alice", "host").unwrap();
//! room.join("bob", "guest").unwrap();
//! room.apply_input("alice", Command::Left).unwrap();
//!
//! let report = room.tick();
//! assert_eq!(report.tick, 1);
//! assert_eq!(report.players.len(), 2);
//! assert!(!report.finished);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use tetris_arena_core::tick as engine;
use tetris_arena_core::{Clock, EngineError, PieceSource, PlayerState, RandomSource, RulesConfig, TickContext};
use tetris_arena_types::{Command, PlayerStatus};

pub use tetris_arena_core as core;
pub use tetris_arena_types as types;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("no player named {0:?} in this room")]
    UnknownPlayer(String),
    #[error("player {0:?} already joined")]
    DuplicatePlayer(String),
    #[error("room is full ({max} players)")]
    RoomFull { max: usize },
    #[error("room has finished")]
    Finished,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, RoomError>;

/// Garbage sent from one player to another on a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub from: String,
    pub to: String,
    pub rows: u32,
}

/// Everything a broadcaster needs after one room tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub players: Vec<PlayerState>,
    pub attacks: Vec<AttackEvent>,
    pub eliminated: Vec<String>,
    pub winner: Option<String>,
    pub finished: bool,
}

pub struct Room<R, C, P> {
    id: String,
    rules: RulesConfig,
    max_players: usize,
    rng: R,
    clock: C,
    pieces: P,
    players: Vec<PlayerState>,
    tick: u64,
    winner: Option<String>,
    finished: bool,
}

impl<R, C, P> Room<R, C, P>
where
    R: RandomSource,
    C: Clock,
    P: PieceSource,
{
    pub fn new(
        id: impl Into<String>,
        rules: RulesConfig,
        max_players: usize,
        rng: R,
        clock: C,
        pieces: P,
    ) -> Self {
        Self {
            id: id.into(),
            rules: rules.normalized(),
            max_players: max_players.max(1),
            rng,
            clock,
            pieces,
            players: Vec::new(),
            tick: 0,
            winner: None,
            finished: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, user_name: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.user_name == user_name)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Engine capabilities plus the player list, borrowed disjointly.
    fn parts(&mut self) -> (TickContext<'_>, &mut Vec<PlayerState>) {
        (
            TickContext::new(&self.rules, &mut self.rng, &self.clock, &mut self.pieces),
            &mut self.players,
        )
    }

    fn index_of(&self, user_name: &str) -> Result<usize> {
        self.players
            .iter()
            .position(|p| p.user_name == user_name)
            .ok_or_else(|| RoomError::UnknownPlayer(user_name.to_string()))
    }

    fn check_can_seat(&self, user_name: &str) -> Result<()> {
        if self.finished {
            return Err(RoomError::Finished);
        }
        if self.player(user_name).is_some() {
            return Err(RoomError::DuplicatePlayer(user_name.to_string()));
        }
        if self.players.len() >= self.max_players {
            return Err(RoomError::RoomFull {
                max: self.max_players,
            });
        }
        Ok(())
    }

    /// Add a fresh player with pieces and starting garbage drawn from the room.
    pub fn join(&mut self, user_name: &str, who: &str) -> Result<&PlayerState> {
        self.check_can_seat(user_name)?;

        let (mut ctx, players) = self.parts();
        let player = PlayerState::new(user_name, who, &mut ctx);
        players.push(player);

        info!(room = %self.id, player = user_name, who, "player joined");
        Ok(&self.players[self.players.len() - 1])
    }

    /// Add a prepared snapshot, e.g. when restoring a saved game or a replay.
    pub fn seat(&mut self, player: PlayerState) -> Result<&PlayerState> {
        self.check_can_seat(&player.user_name)?;

        info!(room = %self.id, player = %player.user_name, "player seated");
        self.players.push(player);
        Ok(&self.players[self.players.len() - 1])
    }

    pub fn leave(&mut self, user_name: &str) -> Result<PlayerState> {
        let idx = self.index_of(user_name)?;
        let player = self.players.remove(idx);
        info!(room = %self.id, player = user_name, "player left");
        Ok(player)
    }

    /// Route one command to a player. Ignored once the room has finished.
    pub fn apply_input(&mut self, user_name: &str, command: Command) -> Result<&PlayerState> {
        let idx = self.index_of(user_name)?;
        if self.finished {
            return Ok(&self.players[idx]);
        }

        let (mut ctx, players) = self.parts();
        let next = engine::apply_input(&players[idx], command, &mut ctx)?;
        players[idx] = next;

        Ok(&self.players[idx])
    }

    /// Advance the whole room by one tick.
    pub fn tick(&mut self) -> TickReport {
        if self.finished {
            return self.report(Vec::new(), Vec::new());
        }
        self.tick += 1;

        let (mut ctx, players) = self.parts();

        // Phase 1: independent transitions.
        let mut next: Vec<PlayerState> = players
            .iter()
            .map(|p| engine::process_tick(p, &mut ctx))
            .collect();

        let mut incoming = vec![0u32; next.len()];
        let mut attacks = Vec::new();
        for (i, attacker) in next.iter().enumerate() {
            let power = attacker.outcome.as_ref().map_or(0, |o| o.attack_power);
            if power == 0 {
                continue;
            }
            for (j, target) in next.iter().enumerate() {
                if j != i && target.is_playing() {
                    incoming[j] += power;
                    attacks.push(AttackEvent {
                        from: attacker.user_name.clone(),
                        to: target.user_name.clone(),
                        rows: power,
                    });
                }
            }
        }

        // Phase 2: garbage, once per target.
        for (player, &rows) in next.iter_mut().zip(incoming.iter()) {
            if rows > 0 {
                *player = engine::receive_garbage(player, rows, &mut ctx);
            }
        }
        *players = next;

        for attack in &attacks {
            debug!(room = %self.id, from = %attack.from, to = %attack.to, rows = attack.rows, "attack");
        }

        let eliminated = self.resolve_eliminations();
        self.check_finished();
        self.report(attacks, eliminated)
    }

    fn resolve_eliminations(&mut self) -> Vec<String> {
        let still_playing = self.players.iter().any(PlayerState::is_playing);
        if !still_playing {
            return Vec::new();
        }

        let mut eliminated = Vec::new();
        for player in self
            .players
            .iter_mut()
            .filter(|p| p.state == PlayerStatus::Lose)
        {
            player.state = PlayerStatus::Eliminated;
            info!(room = %self.id, player = %player.user_name, "player eliminated");
            eliminated.push(player.user_name.clone());
        }
        eliminated
    }

    fn check_finished(&mut self) {
        let total = self.players.len();
        let playing: Vec<&PlayerState> = self.players.iter().filter(|p| p.is_playing()).collect();

        let done = match total {
            0 => false,
            1 => playing.is_empty(),
            _ => playing.len() <= 1,
        };
        if !done {
            return;
        }

        if total > 1 {
            self.winner = playing.first().map(|p| p.user_name.clone());
        }
        self.finished = true;
        info!(room = %self.id, tick = self.tick, winner = ?self.winner, "room finished");
    }

    fn report(&self, attacks: Vec<AttackEvent>, eliminated: Vec<String>) -> TickReport {
        TickReport {
            tick: self.tick,
            players: self.players.clone(),
            attacks,
            eliminated,
            winner: self.winner.clone(),
            finished: self.finished,
        }
    }
}
