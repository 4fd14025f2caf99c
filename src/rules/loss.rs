//! Life, commander damage, and loss.
//!
//! `derive_has_lost` is the single place loss is computed from a player's
//! totals. It ORs in the prior flag, so nothing here can bring a player back.

use crate::core::{GameState, InstanceId, Player, PlayerId};
use crate::error::{EngineError, Result};

/// Whether a player has lost given their current totals.
#[must_use]
pub fn derive_has_lost(player: &Player, commander_damage_threshold: i64) -> bool {
    player.has_lost()
        || player.life <= 0
        || player
            .commander_damage
            .values()
            .any(|&damage| damage >= commander_damage_threshold)
}

fn refresh_loss(player: &mut Player, threshold: i64) {
    if !player.has_lost() && derive_has_lost(player, threshold) {
        tracing::info!(player = %player.id, life = player.life, "player has lost");
        player.mark_lost();
    }
}

impl GameState {
    /// Set a player's life total.
    #[must_use]
    pub fn update_life(&self, player: PlayerId, life: i64) -> GameState {
        self.update_player(player, |p, config| {
            p.life = life;
            refresh_loss(p, config.commander_damage_threshold);
        })
    }

    /// Set the damage a player has taken from one commander.
    pub fn update_commander_damage(
        &self,
        player: PlayerId,
        source: InstanceId,
        damage: i64,
    ) -> Result<GameState> {
        if damage < 0 {
            return Err(EngineError::NegativeDamage(damage));
        }
        Ok(self.update_player(player, |p, config| {
            p.commander_damage.insert(source, damage);
            refresh_loss(p, config.commander_damage_threshold);
        }))
    }

    /// True once fewer than two players are still in the game.
    #[must_use]
    pub fn check_game_end(&self) -> bool {
        self.remaining_players().count() < 2
    }

    /// The last player standing, if the game has ended with one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let mut remaining = self.remaining_players();
        match (remaining.next(), remaining.next()) {
            (Some(player), None) => Some(player.id),
            _ => None,
        }
    }
}
