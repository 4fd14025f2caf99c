//! Engine configuration.
//!
//! `EngineConfig` carries the table constants the engine needs: starting
//! life, the commander damage threshold, deck size, seat limits, and the
//! battlefield grid geometry. Everything has a Commander default; use the
//! `with_*` builders to change individual values.

use serde::{Deserialize, Serialize};

use crate::layout::GridConfig;

/// Engine-wide constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Life each player starts with.
    pub starting_life: i64,

    /// Damage from a single commander that makes a player lose.
    pub commander_damage_threshold: i64,

    /// Non-commander cards in a deck.
    pub deck_size: usize,

    /// Fewest players a game may start with.
    pub min_players: usize,

    /// Most players a game may start with.
    pub max_players: usize,

    /// Battlefield grid geometry.
    pub grid: GridConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_life: 40,
            commander_damage_threshold: 21,
            deck_size: 99,
            min_players: 2,
            max_players: 4,
            grid: GridConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the lethal commander damage threshold.
    #[must_use]
    pub fn with_commander_damage_threshold(mut self, threshold: i64) -> Self {
        self.commander_damage_threshold = threshold;
        self
    }

    /// Set the number of non-commander cards per deck.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the allowed player count range.
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the grid geometry.
    #[must_use]
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }
}
