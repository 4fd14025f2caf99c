//! Zone transitions and per-instance bookkeeping.
//!
//! Every operation here returns a new `GameState`. Unknown instance ids are
//! tolerated: the caller's view may be stale, so the state comes back
//! unchanged. Malformed arguments (blank counter types, non-positive
//! amounts) are rejected before anything is looked up.
//!
//! ## Leaving the battlefield
//!
//! When an instance moves from the battlefield to another zone it returns to
//! its owner's control and loses its tapped state, counters, modifiers,
//! attachment and grid position. Instances attached to it fall off.

use std::sync::Arc;

use crate::cards::{CardInstance, TokenSpec};
use crate::core::{GameState, InstanceId, PlayerId};
use crate::error::{EngineError, Result};

use super::Zone;

impl GameState {
    /// Move one instance to `zone`.
    ///
    /// Moving into the library this way appends the instance on top; use
    /// `move_to_library` to pick a position.
    #[must_use]
    pub fn move_card(&self, id: InstanceId, zone: Zone) -> GameState {
        let mut next = self.clone();
        let Some(index) = next.position_of(id) else {
            tracing::trace!(instance = %id, "move_card: unknown instance");
            return next;
        };
        if zone == Zone::Library {
            let instance = next.instances_mut().remove(index);
            next.instances_mut().push_back(instance);
            let top = next.instances().len() - 1;
            next.relocate(top, zone);
        } else {
            next.relocate(index, zone);
        }
        next
    }

    /// Change the zone of the instance at `index`, applying the side effects
    /// of leaving or entering the battlefield.
    pub(crate) fn relocate(&mut self, index: usize, zone: Zone) {
        let clock = self.tick();
        let Some(instance) = self.instances_mut().get_mut(index) else {
            return;
        };
        let from = instance.zone;
        let id = instance.id;
        instance.zone = zone;

        if from == Zone::Battlefield && zone != Zone::Battlefield {
            instance.clear_battlefield_state();
            self.detach_all_from(id);
        } else if from != Zone::Battlefield && zone == Zone::Battlefield {
            instance.placed_timestamp = clock;
        }
        if !zone.supports_control() {
            if let Some(instance) = self.instances_mut().get_mut(index) {
                instance.controller = instance.owner();
            }
        }
        tracing::debug!(instance = %id, %from, to = %zone, "card moved");
    }

    fn detach_all_from(&mut self, host: InstanceId) {
        let attached: Vec<usize> = self
            .instances()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.attached_to == Some(host))
            .map(|(i, _)| i)
            .collect();
        for index in attached {
            if let Some(instance) = self.instances_mut().get_mut(index) {
                instance.attached_to = None;
            }
        }
    }

    // === Flags ===

    #[must_use]
    pub fn tap(&self, id: InstanceId) -> GameState {
        self.update_instance(id, |c| c.tapped = true)
    }

    #[must_use]
    pub fn untap(&self, id: InstanceId) -> GameState {
        self.update_instance(id, |c| c.tapped = false)
    }

    /// Toggle the flipped state.
    #[must_use]
    pub fn flip(&self, id: InstanceId) -> GameState {
        self.update_instance(id, |c| c.flipped = !c.flipped)
    }

    #[must_use]
    pub fn set_face_down(&self, id: InstanceId, face_down: bool) -> GameState {
        self.update_instance(id, |c| c.face_down = face_down)
    }

    #[must_use]
    pub fn set_doesnt_untap(&self, id: InstanceId, doesnt_untap: bool) -> GameState {
        self.update_instance(id, |c| c.doesnt_untap = doesnt_untap)
    }

    #[must_use]
    pub fn set_modifiers(&self, id: InstanceId, power: i32, toughness: i32) -> GameState {
        self.update_instance(id, |c| {
            c.power_modifier = power;
            c.toughness_modifier = toughness;
        })
    }

    /// Set or clear the free-text note. Blank text clears it.
    #[must_use]
    pub fn set_annotation(&self, id: InstanceId, annotation: Option<String>) -> GameState {
        let annotation = annotation.filter(|a| !a.trim().is_empty());
        self.update_instance(id, |c| c.annotation = annotation)
    }

    // === Counters ===

    /// Add `amount` counters of `kind`.
    pub fn add_counter(&self, id: InstanceId, kind: &str, amount: i64) -> Result<GameState> {
        let amount = validate_counter(kind, amount)?;
        Ok(self.update_instance(id, |c| {
            let current = c.counter(kind);
            c.counters
                .insert(kind.to_string(), current.saturating_add(amount));
        }))
    }

    /// Remove up to `amount` counters of `kind`. The entry is dropped at zero.
    pub fn remove_counter(&self, id: InstanceId, kind: &str, amount: i64) -> Result<GameState> {
        let amount = validate_counter(kind, amount)?;
        Ok(self.update_instance(id, |c| {
            let remaining = c.counter(kind).saturating_sub(amount);
            if remaining == 0 {
                c.counters.remove(kind);
            } else {
                c.counters.insert(kind.to_string(), remaining);
            }
        }))
    }

    // === Control and attachments ===

    /// Hand control of an instance to another player. The instance ends up
    /// on the battlefield.
    #[must_use]
    pub fn give_control(&self, id: InstanceId, controller: PlayerId) -> GameState {
        if self.player(controller).is_none() {
            tracing::trace!(player = %controller, "give_control: unknown player");
            return self.clone();
        }
        let mut next = self.clone();
        let Some(index) = next.position_of(id) else {
            tracing::trace!(instance = %id, "give_control: unknown instance");
            return next;
        };
        next.relocate(index, Zone::Battlefield);
        if let Some(instance) = next.instances_mut().get_mut(index) {
            instance.controller = controller;
        }
        tracing::debug!(instance = %id, player = %controller, "control changed");
        next
    }

    /// Attach an instance to another. Both must exist and differ.
    #[must_use]
    pub fn attach(&self, id: InstanceId, host: InstanceId) -> GameState {
        if id == host || self.instance(host).is_none() {
            return self.clone();
        }
        self.update_instance(id, |c| c.attached_to = Some(host))
    }

    #[must_use]
    pub fn detach(&self, id: InstanceId) -> GameState {
        self.update_instance(id, |c| c.attached_to = None)
    }

    // === Tokens ===

    /// Create `count` tokens on a player's battlefield.
    ///
    /// All tokens share one synthesized `Card`. Unknown players get nothing.
    #[must_use]
    pub fn create_tokens(&self, player: PlayerId, spec: TokenSpec, count: usize) -> GameState {
        let mut next = self.clone();
        if self.player(player).is_none() || count == 0 {
            return next;
        }
        let card = Arc::new(spec.into_card());
        for _ in 0..count {
            let id = next.alloc_instance_id();
            let mut token = CardInstance::new(id, Arc::clone(&card), player, Zone::Battlefield);
            token.is_token = true;
            token.placed_timestamp = next.tick();
            next.instances_mut().push_back(token);
        }
        tracing::debug!(player = %player, count, name = %card.name, "tokens created");
        next
    }

    /// Remove an instance from the game entirely.
    #[must_use]
    pub fn remove_instance(&self, id: InstanceId) -> GameState {
        let mut next = self.clone();
        let Some(index) = next.position_of(id) else {
            return next;
        };
        next.instances_mut().remove(index);
        next.detach_all_from(id);
        tracing::debug!(instance = %id, "instance removed from game");
        next
    }
}

fn validate_counter(kind: &str, amount: i64) -> Result<u32> {
    if kind.trim().is_empty() {
        return Err(EngineError::BlankCounterType);
    }
    if amount <= 0 {
        return Err(EngineError::NonPositiveAmount(amount));
    }
    Ok(u32::try_from(amount).unwrap_or(u32::MAX))
}
