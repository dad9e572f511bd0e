//! Host configuration, read from the environment.

use std::env;
use std::time::Duration;

use tetris_arena_core::RulesConfig;

/// Host configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub room_id: String,
    /// Room tick interval.
    pub tick_ms: u64,
    /// Fixed seed for reproducible rooms; entropy when unset.
    pub seed: Option<u64>,
    pub max_players: usize,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    pub rules: RulesConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            room_id: "arena".to_string(),
            tick_ms: 100,
            seed: None,
            max_players: 4,
            max_ticks: None,
            rules: RulesConfig::default(),
        }
    }
}

impl HostConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let room_id = env::var("ARENA_ROOM_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.room_id);

        let tick_ms = env::var("ARENA_TICK_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let seed = env::var("ARENA_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let max_players = env::var("ARENA_MAX_PLAYERS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_players);

        let max_ticks = env::var("ARENA_MAX_TICKS")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        Self {
            room_id,
            tick_ms,
            seed,
            max_players,
            max_ticks,
            rules: RulesConfig::from_env(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.max_players, 4);
        assert!(config.seed.is_none());
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = HostConfig {
            tick_ms: 0,
            ..HostConfig::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }
}
