//! Game configuration.
//!
//! The defaults are the house rules: at most six players at the table, and
//! each loser hands five points to the winner.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 6;

/// Points each loser pays into the winner's pool for a round.
pub const STARTING_POINTS: i64 = 5;

#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub max_players: usize,
    /// The per-loser stake.
    pub stake: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            stake: STARTING_POINTS,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.stake <= 0 {
            return Err(ConfigError::NonPositiveStake(self.stake));
        }
        // The winner's pool is at most `stake * (max_players - 1)`.
        let max_stake = i64::try_from(self.max_players)
            .map(|n| i64::MAX / n)
            .unwrap_or(0);
        if self.stake > max_stake {
            return Err(ConfigError::StakeTooLarge(self.stake));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("A game needs room for at least one player")]
    ZeroCapacity,
    #[error("Stake must be positive, got {0}")]
    NonPositiveStake(i64),
    #[error("Stake {0} is too large for the table size")]
    StakeTooLarge(i64),
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GameConfig};

    #[test]
    pub fn test_defaults() {
        let config = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.max_players, 6);
        assert_eq!(config.stake, 5);
    }

    #[test]
    pub fn test_partial_override() {
        let config = GameConfig::from_json_str(r#"{"stake": 10}"#).unwrap();
        assert_eq!(config.max_players, 6);
        assert_eq!(config.stake, 10);
    }

    #[test]
    pub fn test_stake_bound() {
        let largest = i64::MAX / 6;
        let config = GameConfig {
            stake: largest,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = GameConfig {
            stake: largest + 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StakeTooLarge(_))
        ));
    }

    #[test]
    pub fn test_invalid_configs() {
        assert!(matches!(
            GameConfig::from_json_str(r#"{"max_players": 0}"#),
            Err(ConfigError::ZeroCapacity)
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{"stake": -5}"#),
            Err(ConfigError::NonPositiveStake(-5))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{"stake": 9223372036854775807}"#),
            Err(ConfigError::StakeTooLarge(i64::MAX))
        ));
        assert!(matches!(
            GameConfig::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
