//! Host configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use holdem_round::{
    entities::Usd,
    table::{TableConfig, TableSpeed},
};

/// Complete host configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Number of tables to run
    pub num_tables: usize,
    /// Bots seated at each table
    pub players_per_table: usize,
    /// Rounds each table plays before the host stops
    pub rounds: usize,
    /// Chips every bot sits down with
    pub buy_in: Usd,
    /// Delay before a bot answers an action request
    pub bot_delay_ms: u64,
    /// Base seed for tables and bots. Unset means fresh entropy.
    pub seed: Option<u64>,
    /// Template every table is created from
    pub table: TableConfig,
}

/// Values given on the command line, which win over the environment
#[derive(Debug, Default)]
pub struct Overrides {
    pub num_tables: Option<usize>,
    pub players_per_table: Option<usize>,
    pub rounds: Option<usize>,
    pub seed: Option<u64>,
}

impl HostConfig {
    /// Load configuration from `HR_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be understood
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        let defaults = TableConfig::default();

        let speed = match std::env::var("HR_SPEED") {
            Ok(value) => value.parse().map_err(|e: holdem_round::table::ConfigError| {
                ConfigError::Invalid {
                    var: "HR_SPEED".to_string(),
                    reason: e.to_string(),
                }
            })?,
            Err(_) => TableSpeed::Normal,
        };

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => match std::env::var("HR_SEED") {
                Ok(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                    var: "HR_SEED".to_string(),
                    reason: format!("'{value}' is not a number"),
                })?),
                Err(_) => None,
            },
        };

        let table = TableConfig {
            name: std::env::var("HR_TABLE_NAME").unwrap_or_else(|_| "Table".to_string()),
            max_players: parse_env_or("HR_MAX_PLAYERS", defaults.max_players),
            small_blind: parse_env_or("HR_SMALL_BLIND", defaults.small_blind),
            big_blind: parse_env_or("HR_BIG_BLIND", defaults.big_blind),
            min_buy_in_bb: parse_env_or("HR_MIN_BUY_IN_BB", defaults.min_buy_in_bb),
            max_buy_in_bb: parse_env_or("HR_MAX_BUY_IN_BB", defaults.max_buy_in_bb),
            speed,
            round_interval_ms: parse_env_or("HR_ROUND_INTERVAL_MS", defaults.round_interval_ms),
            showdown_end_ms: parse_env_or("HR_SHOWDOWN_END_MS", defaults.showdown_end_ms),
            debounce_ms: parse_env_or("HR_DEBOUNCE_MS", defaults.debounce_ms),
            poll_ms: parse_env_or("HR_POLL_MS", defaults.poll_ms),
            rng_seed: None,
        };

        Ok(HostConfig {
            num_tables: overrides
                .num_tables
                .unwrap_or_else(|| parse_env_or("HR_TABLES", 1)),
            players_per_table: overrides
                .players_per_table
                .unwrap_or_else(|| parse_env_or("HR_PLAYERS", 4)),
            rounds: overrides
                .rounds
                .unwrap_or_else(|| parse_env_or("HR_ROUNDS", 5)),
            buy_in: parse_env_or("HR_BUY_IN", table.min_buy_in_chips().max(1000)),
            bot_delay_ms: parse_env_or("HR_BOT_DELAY_MS", 200),
            seed,
            table,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.table.validate()?;

        if self.num_tables == 0 {
            return Err(ConfigError::Invalid {
                var: "HR_TABLES".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.players_per_table < 2 || self.players_per_table > self.table.max_players {
            return Err(ConfigError::Invalid {
                var: "HR_PLAYERS".to_string(),
                reason: format!("Must be between 2 and {}", self.table.max_players),
            });
        }

        if self.rounds == 0 {
            return Err(ConfigError::Invalid {
                var: "HR_ROUNDS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let (min, max) = (self.table.min_buy_in_chips(), self.table.max_buy_in_chips());
        if self.buy_in < min || self.buy_in > max {
            return Err(ConfigError::Invalid {
                var: "HR_BUY_IN".to_string(),
                reason: format!("Must be between {min} and {max}"),
            });
        }

        Ok(())
    }

    /// Config for the `index`th table, with its own name and seed
    pub fn table_config(&self, index: usize) -> TableConfig {
        TableConfig {
            name: format!("{} {}", self.table.name, index + 1),
            rng_seed: self.seed.map(|seed| seed.wrapping_add(index as u64)),
            ..self.table.clone()
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error("Invalid table configuration: {0}")]
    Table(#[from] holdem_round::table::ConfigError),
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
