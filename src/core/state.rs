//! Game state: players, card instances, turn position.
//!
//! `GameState` is a persistent value. Every operation takes `&self` and
//! returns a new `GameState`; the receiver is never modified. Players and
//! instances live in `im` persistent structures, so each new state shares
//! almost all of its memory with the previous one.
//!
//! ## Instance ordering
//!
//! All instances live in one flat list; zone membership is a property of each
//! instance. The order of that list matters in exactly one way: the
//! subsequence of a player's `Library` instances is that player's library,
//! bottom first, top last. The positions of all other instances carry no
//! meaning. Library operations in `zones::library` maintain this.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::entity::{GameId, InstanceId};
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::CardInstance;
use crate::error::{EngineError, Result};
use crate::rules::Phase;
use crate::zones::Zone;

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: GameId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Current phase.
    pub phase: Phase,

    /// Raw seat index of the active player. Read through
    /// `active_player_index`, which clamps it.
    active_player_index: usize,

    players: Vector<Player>,

    instances: Vector<CardInstance>,

    config: EngineConfig,

    /// Shuffle RNG.
    rng: GameRng,

    next_instance_id: u32,

    /// Source of `placed_timestamp` values.
    clock: u64,
}

impl GameState {
    /// Create an empty game: no players, no cards, turn 1, untap step.
    #[must_use]
    pub fn new(game_id: GameId, config: EngineConfig, seed: u64) -> Self {
        Self {
            game_id,
            turn_number: 1,
            phase: Phase::Untap,
            active_player_index: 0,
            players: Vector::new(),
            instances: Vector::new(),
            config,
            rng: GameRng::new(seed),
            next_instance_id: 1,
            clock: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Players ===

    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Seat index of the active player, clamped into `0..player_count`.
    ///
    /// The stored index can be out of range after a player leaves; reading
    /// it never panics.
    #[must_use]
    pub fn active_player_index(&self) -> usize {
        self.active_player_index.min(self.players.len().saturating_sub(1))
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_player_index())
    }

    pub(crate) fn set_active_player_index(&mut self, index: usize) {
        self.active_player_index = index;
    }

    /// Players who have not lost.
    pub fn remaining_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.has_lost())
    }

    /// A player leaves the table. Their cards stay where they are.
    #[must_use]
    pub fn remove_player(&self, id: PlayerId) -> GameState {
        let Some(index) = self.players.iter().position(|p| p.id == id) else {
            tracing::trace!(player = %id, "remove_player: unknown player");
            return self.clone();
        };
        let mut next = self.clone();
        next.players.remove(index);
        tracing::debug!(player = %id, remaining = next.players.len(), "player left the game");
        next
    }

    pub(crate) fn push_player(&mut self, player: Player) {
        self.players.push_back(player);
    }

    /// Apply `f` to one player in a new state, or return an unchanged clone
    /// when the player is unknown.
    pub(crate) fn update_player(
        &self,
        id: PlayerId,
        f: impl FnOnce(&mut Player, &EngineConfig),
    ) -> GameState {
        let mut next = self.clone();
        let Some(index) = next.players.iter().position(|p| p.id == id) else {
            tracing::trace!(player = %id, "unknown player, ignoring");
            return next;
        };
        if let Some(player) = next.players.get_mut(index) {
            f(player, &self.config);
        }
        next
    }

    // === Instances ===

    #[must_use]
    pub fn instances(&self) -> &Vector<CardInstance> {
        &self.instances
    }

    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.instances.iter().find(|c| c.id == id)
    }

    pub(crate) fn instances_mut(&mut self) -> &mut Vector<CardInstance> {
        &mut self.instances
    }

    pub(crate) fn position_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|c| c.id == id)
    }

    /// Apply `f` to one instance in a new state, or return an unchanged
    /// clone when the instance is unknown.
    pub(crate) fn update_instance(
        &self,
        id: InstanceId,
        f: impl FnOnce(&mut CardInstance),
    ) -> GameState {
        let mut next = self.clone();
        let Some(index) = next.position_of(id) else {
            tracing::trace!(instance = %id, "unknown instance, ignoring");
            return next;
        };
        if let Some(instance) = next.instances.get_mut(index) {
            f(instance);
        }
        next
    }

    pub(crate) fn alloc_instance_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }

    /// Next value of the placement clock.
    pub(crate) fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Projections ===

    /// Instances a player has in a zone.
    ///
    /// Battlefield membership follows the controller; every other zone
    /// follows the owner. Library results are bottom first, top last.
    #[must_use]
    pub fn cards_in_zone(&self, player: PlayerId, zone: Zone) -> Vec<&CardInstance> {
        self.instances
            .iter()
            .filter(|c| c.zone == zone)
            .filter(|c| {
                if zone.grouped_by_controller() {
                    c.controller == player
                } else {
                    c.owner() == player
                }
            })
            .collect()
    }

    #[must_use]
    pub fn card_count(&self, player: PlayerId, zone: Zone) -> usize {
        self.cards_in_zone(player, zone).len()
    }

    /// Permanents a player controls, including ones they do not own.
    #[must_use]
    pub fn battlefield_of(&self, player: PlayerId) -> Vec<&CardInstance> {
        self.cards_in_zone(player, Zone::Battlefield)
    }

    /// Legendary creatures in the command zone or on the battlefield.
    #[must_use]
    pub fn all_commanders(&self) -> Vec<&CardInstance> {
        self.instances
            .iter()
            .filter(|c| matches!(c.zone, Zone::CommandZone | Zone::Battlefield))
            .filter(|c| c.card.is_legendary_creature())
            .collect()
    }

    // === Snapshots ===

    /// Encode the full state, RNG position included.
    pub fn encode_snapshot(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Decode a state produced by `encode_snapshot`.
    pub fn decode_snapshot(bytes: &[u8]) -> Result<GameState> {
        bincode::deserialize(bytes).map_err(|e| EngineError::Snapshot(e.to_string()))
    }
}
