//! Decks handed over by the deck-import collaborator.
//!
//! A `Deck` is a commander plus an ordered list of the other cards. The
//! engine does not parse deck files. Size is enforced when a game is built
//! (`GameBuilder`); legality is an advisory check run on demand.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::error::{EngineError, Result};

/// A commander deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    pub commander: Arc<Card>,

    /// Non-commander cards. The last card ends up on top of the library
    /// when libraries are not shuffled at setup.
    pub cards: Vec<Arc<Card>>,
}

impl Deck {
    #[must_use]
    pub fn new(name: impl Into<String>, commander: Card, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            name: name.into(),
            commander: Arc::new(commander),
            cards: cards.into_iter().map(Arc::new).collect(),
        }
    }

    /// Cards including the commander.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len() + 1
    }

    /// Reject a deck whose non-commander count is not `expected`.
    pub fn check_size(&self, expected: usize) -> Result<()> {
        if self.cards.len() == expected {
            Ok(())
        } else {
            Err(EngineError::DeckSize {
                deck: self.name.clone(),
                expected,
                actual: self.cards.len(),
            })
        }
    }

    /// Advisory legality check: legendary commander, singleton non-basics.
    ///
    /// The commander counts toward the singleton rule.
    pub fn validate(&self) -> Result<()> {
        if !self.commander.is_legendary() {
            return Err(EngineError::NonLegendaryCommander(self.commander.name.clone()));
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(self.commander.name.as_str());
        for card in self.cards.iter().filter(|c| !c.is_basic_land()) {
            if !seen.insert(card.name.as_str()) {
                return Err(EngineError::DuplicateCard(card.name.clone()));
            }
        }
        Ok(())
    }
}
