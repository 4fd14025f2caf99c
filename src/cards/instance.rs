//! Card instances - runtime card state.
//!
//! `CardInstance` represents one physical card at the table. It tracks the
//! mutable state a player would manipulate by hand: zone, tapped/flipped,
//! counters, attachments, grid position, and power/toughness modifiers.
//!
//! ## Ownership
//!
//! `owner` is fixed for the lifetime of the instance. `controller` starts as
//! the owner and only diverges while the instance sits in a zone where
//! control effects apply (see `Zone::supports_control`).

use std::sync::Arc;

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::zones::Zone;

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this instance.
    pub id: InstanceId,

    /// Shared static metadata.
    pub card: Arc<Card>,

    owner: PlayerId,

    pub controller: PlayerId,

    pub zone: Zone,

    pub tapped: bool,
    pub flipped: bool,
    pub face_down: bool,

    /// Skipped by `untap_all`.
    pub doesnt_untap: bool,

    /// Counter counts by counter type. Entries are never zero.
    pub counters: OrdMap<String, u32>,

    pub attached_to: Option<InstanceId>,

    /// Explicit grid column. Auto-arranged unless both coordinates are set.
    pub grid_x: Option<u32>,
    pub grid_y: Option<u32>,

    pub power_modifier: i32,
    pub toughness_modifier: i32,

    pub annotation: Option<String>,

    /// Orders instances sharing a grid cell. Assigned from the state's clock.
    pub placed_timestamp: u64,

    /// Created by `create_tokens` rather than loaded from a deck.
    pub is_token: bool,
}

impl CardInstance {
    /// Create an instance owned and controlled by `owner`.
    #[must_use]
    pub fn new(id: InstanceId, card: Arc<Card>, owner: PlayerId, zone: Zone) -> Self {
        Self {
            id,
            card,
            owner,
            controller: owner,
            zone,
            tapped: false,
            flipped: false,
            face_down: false,
            doesnt_untap: false,
            counters: OrdMap::new(),
            attached_to: None,
            grid_x: None,
            grid_y: None,
            power_modifier: 0,
            toughness_modifier: 0,
            annotation: None,
            placed_timestamp: 0,
            is_token: false,
        }
    }

    /// The player who brought this card to the game.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Whether someone other than the owner controls this instance.
    #[must_use]
    pub fn is_stolen(&self) -> bool {
        self.controller != self.owner
    }

    /// Explicit grid cell, only when both coordinates are set.
    #[must_use]
    pub fn grid_cell(&self) -> Option<(u32, u32)> {
        self.grid_x.zip(self.grid_y)
    }

    /// Number of counters of one type.
    #[must_use]
    pub fn counter(&self, kind: &str) -> u32 {
        self.counters.get(kind).copied().unwrap_or(0)
    }

    /// Printed power plus modifier, if the printed value is numeric.
    #[must_use]
    pub fn effective_power(&self) -> Option<i64> {
        numeric_stat(self.card.power.as_deref(), self.power_modifier)
    }

    /// Printed toughness plus modifier, if the printed value is numeric.
    #[must_use]
    pub fn effective_toughness(&self) -> Option<i64> {
        numeric_stat(self.card.toughness.as_deref(), self.toughness_modifier)
    }

    /// Reset battlefield-only state when the instance leaves the battlefield.
    pub(crate) fn clear_battlefield_state(&mut self) {
        self.controller = self.owner;
        self.tapped = false;
        self.attached_to = None;
        self.grid_x = None;
        self.grid_y = None;
        self.counters = OrdMap::new();
        self.power_modifier = 0;
        self.toughness_modifier = 0;
    }
}

fn numeric_stat(printed: Option<&str>, modifier: i32) -> Option<i64> {
    let base: i64 = printed?.trim().parse().ok()?;
    base.checked_add(i64::from(modifier))
}
