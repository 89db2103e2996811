//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::game::{
    constants::MAX_PLAYERS,
    entities::{Blinds, DEFAULT_MIN_BIG_BLIND, DEFAULT_MIN_SMALL_BLIND, Usd},
};

/// Table speed variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSpeed {
    Normal,
    Turbo,
    Hyper,
}

impl std::fmt::Display for TableSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSpeed::Normal => write!(f, "normal"),
            TableSpeed::Turbo => write!(f, "turbo"),
            TableSpeed::Hyper => write!(f, "hyper"),
        }
    }
}

impl std::str::FromStr for TableSpeed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(TableSpeed::Normal),
            "turbo" => Ok(TableSpeed::Turbo),
            "hyper" => Ok(TableSpeed::Hyper),
            other => Err(ConfigError::UnknownSpeed(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("big blind must be greater than small blind")]
    Blinds,
    #[error("max buy-in must be greater than min buy-in")]
    BuyIn,
    #[error("max players must be between 2 and {MAX_PLAYERS}")]
    MaxPlayers,
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("unknown table speed '{0}'")]
    UnknownSpeed(String),
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Maximum number of seats, waitlist included
    pub max_players: usize,

    /// Small blind amount
    pub small_blind: Usd,

    /// Big blind amount
    pub big_blind: Usd,

    /// Minimum buy-in in big blinds (e.g., 20 BB)
    pub min_buy_in_bb: u8,

    /// Maximum buy-in in big blinds (e.g., 100 BB)
    pub max_buy_in_bb: u8,

    /// Table speed
    pub speed: TableSpeed,

    /// Pause between stages, and before the restart timer settles the
    /// table after a deal
    pub round_interval_ms: u64,

    /// Pause at showdown before the pot is paid
    pub showdown_end_ms: u64,

    /// Delay between the start condition holding and the deal
    pub debounce_ms: u64,

    /// How often the start condition is re-checked while waiting
    pub poll_ms: u64,

    /// Seed for deck shuffles; random when unset
    pub rng_seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            max_players: MAX_PLAYERS,
            small_blind: DEFAULT_MIN_SMALL_BLIND,
            big_blind: DEFAULT_MIN_BIG_BLIND,
            min_buy_in_bb: 20,
            max_buy_in_bb: 100,
            speed: TableSpeed::Normal,
            round_interval_ms: 2_000,
            showdown_end_ms: 5_000,
            debounce_ms: 50,
            poll_ms: 250,
            rng_seed: None,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 || self.big_blind <= self.small_blind {
            return Err(ConfigError::Blinds);
        }

        if self.max_buy_in_bb <= self.min_buy_in_bb {
            return Err(ConfigError::BuyIn);
        }

        if self.max_players < 2 || self.max_players > MAX_PLAYERS {
            return Err(ConfigError::MaxPlayers);
        }

        if self.poll_ms == 0 {
            return Err(ConfigError::ZeroInterval("poll interval"));
        }

        Ok(())
    }

    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    /// Get minimum buy-in in chips
    pub fn min_buy_in_chips(&self) -> Usd {
        self.big_blind * Usd::from(self.min_buy_in_bb)
    }

    /// Get maximum buy-in in chips
    pub fn max_buy_in_chips(&self) -> Usd {
        self.big_blind * Usd::from(self.max_buy_in_bb)
    }

    /// Get action timeout based on table speed
    pub fn action_timeout_secs(&self) -> u64 {
        match self.speed {
            TableSpeed::Normal => 30,
            TableSpeed::Turbo => 15,
            TableSpeed::Hyper => 5,
        }
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout_secs())
    }

    pub fn round_interval(&self) -> Duration {
        Duration::from_millis(self.round_interval_ms)
    }

    /// Wait after a deal before waiting players are seated.
    pub fn settle_interval(&self) -> Duration {
        self.round_interval()
    }

    pub fn showdown_end(&self) -> Duration {
        Duration::from_millis(self.showdown_end_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TableConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.blinds(), Blinds { small: 10, big: 20 });
        assert_eq!(config.min_buy_in_chips(), 400);
        assert_eq!(config.max_buy_in_chips(), 2_000);
    }

    #[test]
    fn test_validation_errors() {
        let config = TableConfig {
            big_blind: 10,
            ..TableConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Blinds));

        let config = TableConfig {
            max_players: 1,
            ..TableConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MaxPlayers));

        let config = TableConfig {
            poll_ms: 0,
            ..TableConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroInterval("poll interval"))
        );
    }

    #[test]
    fn test_speed_scales_action_timeout() {
        let mut config = TableConfig::default();
        assert_eq!(config.action_timeout(), Duration::from_secs(30));
        config.speed = "hyper".parse().unwrap();
        assert_eq!(config.action_timeout(), Duration::from_secs(5));
        assert!("ludicrous".parse::<TableSpeed>().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TableConfig =
            serde_json::from_str(r#"{"name":"high stakes","big_blind":200,"small_blind":100}"#)
                .unwrap();
        assert_eq!(config.name, "high stakes");
        assert_eq!(config.big_blind, 200);
        assert_eq!(config.debounce_ms, 50);
    }
}
