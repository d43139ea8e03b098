//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::MAX_SEATS;

/// Turn engine configuration.
///
/// Delays are in milliseconds of the engine's virtual clock, which the host
/// advances explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the default dice source.
    pub seed: u64,

    /// Delay between a roll request and the die settling.
    pub roll_delay_ms: u64,

    /// Delay after a roll settles before autoplay picks a move.
    pub autoplay_move_delay_ms: u64,

    /// Period of the recurring autoplay tick. Must be positive.
    pub autoplay_interval_ms: u64,

    /// Players required by `start_game`.
    pub min_players_to_start: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            roll_delay_ms: 600,
            autoplay_move_delay_ms: 400,
            autoplay_interval_ms: 1500,
            min_players_to_start: 2,
        }
    }
}

impl EngineConfig {
    /// Create a new config with a custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_roll_delay(mut self, ms: u64) -> Self {
        self.roll_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_autoplay_delays(mut self, move_delay_ms: u64, interval_ms: u64) -> Self {
        self.autoplay_move_delay_ms = move_delay_ms;
        self.autoplay_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_min_players(mut self, count: usize) -> Self {
        self.min_players_to_start = count;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autoplay_interval_ms == 0 {
            return Err(ConfigError::ZeroAutoPlayInterval);
        }
        if !(1..=MAX_SEATS).contains(&self.min_players_to_start) {
            return Err(ConfigError::MinPlayers(self.min_players_to_start));
        }
        Ok(())
    }
}
