//! Players at the table.
//!
//! ## PlayerId
//!
//! Stable player identifier. Unlike a seat index, a `PlayerId` keeps its
//! meaning when another player leaves the game.
//!
//! ## Player
//!
//! Life total, commander damage per source commander, and the loss flag.
//! `has_lost` is monotonic: once set it is never cleared. Setters that can
//! flip it go through `rules::loss::derive_has_lost`.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player's public state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub life: i64,

    /// Accumulated commander damage keyed by the source commander instance.
    pub commander_damage: OrdMap<InstanceId, i64>,

    has_lost: bool,
}

impl Player {
    /// Create a player at the given starting life.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, starting_life: i64) -> Self {
        Self {
            id,
            name: name.into(),
            life: starting_life,
            commander_damage: OrdMap::new(),
            has_lost: false,
        }
    }

    /// Whether this player has lost the game.
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.has_lost
    }

    /// Mark the player as having lost. There is no way to undo this.
    pub(crate) fn mark_lost(&mut self) {
        self.has_lost = true;
    }

    /// Damage dealt to this player by one commander.
    #[must_use]
    pub fn damage_from(&self, source: InstanceId) -> i64 {
        self.commander_damage.get(&source).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_new() {
        let player = Player::new(PlayerId::new(1), "Alice", 40);

        assert_eq!(player.life, 40);
        assert_eq!(player.name, "Alice");
        assert!(!player.has_lost());
        assert!(player.commander_damage.is_empty());
        assert_eq!(format!("{}", player.id), "Player 1");
    }

    #[test]
    fn test_mark_lost() {
        let mut player = Player::new(PlayerId::new(0), "Bob", 40);
        player.mark_lost();
        player.life = 40;
        assert!(player.has_lost());
    }

    #[test]
    fn test_damage_from() {
        let mut player = Player::new(PlayerId::new(0), "Bob", 40);
        player.commander_damage.insert(InstanceId(5), 7);

        assert_eq!(player.damage_from(InstanceId(5)), 7);
        assert_eq!(player.damage_from(InstanceId(6)), 0);
    }

    #[test]
    fn test_player_serialization() {
        let mut player = Player::new(PlayerId::new(2), "Cara", 31);
        player.commander_damage.insert(InstanceId(9), 4);

        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
