//! Library operations.
//!
//! A player's library is the subsequence of their `Library` instances in the
//! flat instance list, bottom first and top last. Nothing else tracks the
//! top. Every operation here either preserves that subsequence's order or
//! rewrites it on purpose (shuffles, positional inserts).
//!
//! Running out of cards is not an error: drawing from an empty library, or
//! milling more cards than remain, marks the player as having lost.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::{GameState, InstanceId, PlayerId};

use super::Zone;

/// Where to put a card in its owner's library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryPlacement {
    Top,
    Bottom,
    /// N-th from the top: N-1 cards end up above it. 1 is the top.
    FromTop(usize),
    /// N-th from the bottom: N-1 cards end up below it. 1 is the bottom.
    FromBottom(usize),
}

impl LibraryPlacement {
    /// Number of library cards below the inserted card, clamped to `0..=size`.
    fn offset(self, size: usize) -> usize {
        match self {
            LibraryPlacement::Top => size,
            LibraryPlacement::Bottom => 0,
            LibraryPlacement::FromTop(n) => size.saturating_sub(n.saturating_sub(1)),
            LibraryPlacement::FromBottom(n) => n.saturating_sub(1).min(size),
        }
    }
}

/// Which end of the library a partial shuffle works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryEnd {
    Top,
    Bottom,
}

impl GameState {
    /// Flat-list indices of a player's library, bottom first.
    fn library_positions(&self, player: PlayerId) -> Vec<usize> {
        self.instances()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.zone == Zone::Library && c.owner() == player)
            .map(|(i, _)| i)
            .collect()
    }

    /// A player's library, bottom first, top last.
    #[must_use]
    pub fn library(&self, player: PlayerId) -> Vec<&CardInstance> {
        self.cards_in_zone(player, Zone::Library)
    }

    /// The top `count` cards of a library, top first.
    #[must_use]
    pub fn peek_library(&self, player: PlayerId, count: usize) -> Vec<&CardInstance> {
        self.library(player).into_iter().rev().take(count).collect()
    }

    /// Draw the top card. An empty library makes the player lose instead.
    #[must_use]
    pub fn draw_card(&self, player: PlayerId) -> GameState {
        if self.player(player).is_none() {
            tracing::trace!(player = %player, "draw_card: unknown player");
            return self.clone();
        }
        match self.library_positions(player).last() {
            Some(&index) => {
                let mut next = self.clone();
                next.relocate(index, Zone::Hand);
                next
            }
            None => {
                tracing::info!(player = %player, "drew from an empty library");
                self.update_player(player, |p, _| p.mark_lost())
            }
        }
    }

    /// Draw `count` cards, stopping at the first draw from an empty library.
    #[must_use]
    pub fn draw_cards(&self, player: PlayerId, count: usize) -> GameState {
        let mut next = self.clone();
        for _ in 0..count {
            let empty = next.library_positions(player).is_empty();
            next = next.draw_card(player);
            if empty {
                break;
            }
        }
        next
    }

    /// Shuffle a player's library. Nothing outside it moves.
    #[must_use]
    pub fn shuffle_library(&self, player: PlayerId) -> GameState {
        let positions = self.library_positions(player);
        let mut next = self.clone();
        next.shuffle_positions(&positions);
        tracing::debug!(player = %player, size = positions.len(), "library shuffled");
        next
    }

    /// Shuffle only the top or bottom `count` cards of a library.
    ///
    /// `count` is clamped to the library size; one card or fewer is a no-op.
    #[must_use]
    pub fn shuffle_subset(&self, player: PlayerId, count: usize, end: LibraryEnd) -> GameState {
        let positions = self.library_positions(player);
        let count = count.min(positions.len());
        if count <= 1 {
            return self.clone();
        }
        let partition = match end {
            LibraryEnd::Top => &positions[positions.len() - count..],
            LibraryEnd::Bottom => &positions[..count],
        };
        let mut next = self.clone();
        next.shuffle_positions(partition);
        tracing::debug!(player = %player, count, ?end, "library partially shuffled");
        next
    }

    /// Permute the instances at `positions` among those same positions.
    fn shuffle_positions(&mut self, positions: &[usize]) {
        let mut cards: Vec<CardInstance> = positions
            .iter()
            .filter_map(|&i| self.instances().get(i).cloned())
            .collect();
        self.rng_mut().shuffle(&mut cards);
        for (&index, card) in positions.iter().zip(cards) {
            if let Some(slot) = self.instances_mut().get_mut(index) {
                *slot = card;
            }
        }
    }

    /// Put an instance into its owner's library at `placement`.
    #[must_use]
    pub fn move_to_library(&self, id: InstanceId, placement: LibraryPlacement) -> GameState {
        let mut next = self.clone();
        let Some(index) = next.position_of(id) else {
            tracing::trace!(instance = %id, "move_to_library: unknown instance");
            return next;
        };
        next.relocate(index, Zone::Library);
        let card = next.instances_mut().remove(index);

        let positions = next.library_positions(card.owner());
        let offset = placement.offset(positions.len());
        match positions.get(offset) {
            Some(&at) => next.instances_mut().insert(at, card),
            None => next.instances_mut().push_back(card),
        }
        tracing::debug!(instance = %id, ?placement, "card put into library");
        next
    }

    #[must_use]
    pub fn move_to_library_top(&self, id: InstanceId) -> GameState {
        self.move_to_library(id, LibraryPlacement::Top)
    }

    #[must_use]
    pub fn move_to_library_bottom(&self, id: InstanceId) -> GameState {
        self.move_to_library(id, LibraryPlacement::Bottom)
    }

    /// Mill up to `count` cards from the top into the graveyard.
    ///
    /// Asking for more cards than a non-empty library holds mills the whole
    /// library and makes the player lose.
    #[must_use]
    pub fn mill(&self, player: PlayerId, count: usize) -> GameState {
        if self.player(player).is_none() {
            return self.clone();
        }
        let positions = self.library_positions(player);
        let milled = count.min(positions.len());

        let mut next = self.clone();
        for &index in positions.iter().rev().take(milled) {
            next.relocate(index, Zone::Graveyard);
        }
        if count > positions.len() && !positions.is_empty() {
            tracing::info!(player = %player, count, library = positions.len(), "milled past the bottom of the library");
            next = next.update_player(player, |p, _| p.mark_lost());
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Deck};
    use crate::core::{EngineConfig, GameBuilder};

    const ALICE: PlayerId = PlayerId::new(0);
    const BOB: PlayerId = PlayerId::new(1);

    /// Libraries in deck order: "A0" bottom .. "A{n-1}" top.
    fn game(n: usize) -> GameState {
        let deck = |prefix: &str| {
            Deck::new(
                prefix,
                Card::new(format!("{prefix} Commander"), "Legendary Creature"),
                (0..n).map(|i| Card::new(format!("{prefix}{i}"), "Creature")),
            )
        };
        GameBuilder::new(EngineConfig::default().with_deck_size(n))
            .shuffle_libraries(false)
            .player("Alice", deck("A"))
            .player("Bob", deck("B"))
            .build()
            .unwrap()
    }

    fn names(cards: Vec<&CardInstance>) -> Vec<String> {
        cards.iter().map(|c| c.card.name.clone()).collect()
    }

    #[test]
    fn test_library_order() {
        let state = game(3);
        assert_eq!(names(state.library(ALICE)), vec!["A0", "A1", "A2"]);
        assert_eq!(names(state.peek_library(ALICE, 2)), vec!["A2", "A1"]);
    }

    #[test]
    fn test_draw_takes_top() {
        let state = game(3);
        let state = state.draw_card(ALICE);

        assert_eq!(names(state.cards_in_zone(ALICE, Zone::Hand)), vec!["A2"]);
        assert_eq!(names(state.library(ALICE)), vec!["A0", "A1"]);
        assert_eq!(state.card_count(BOB, Zone::Library), 3);
    }

    #[test]
    fn test_draw_from_empty_loses() {
        let state = game(1).draw_card(ALICE);
        assert!(!state.player(ALICE).unwrap().has_lost());

        let state = state.draw_card(ALICE);
        assert!(state.player(ALICE).unwrap().has_lost());
        assert_eq!(state.card_count(ALICE, Zone::Hand), 1);
    }

    #[test]
    fn test_draw_cards_stops_on_empty() {
        let state = game(2).draw_cards(ALICE, 5);

        assert_eq!(state.card_count(ALICE, Zone::Hand), 2);
        assert!(state.player(ALICE).unwrap().has_lost());
    }

    #[test]
    fn test_placement_offsets() {
        assert_eq!(LibraryPlacement::Top.offset(5), 5);
        assert_eq!(LibraryPlacement::Bottom.offset(5), 0);
        assert_eq!(LibraryPlacement::FromTop(1).offset(5), 5);
        assert_eq!(LibraryPlacement::FromTop(3).offset(5), 3);
        assert_eq!(LibraryPlacement::FromTop(99).offset(5), 0);
        assert_eq!(LibraryPlacement::FromBottom(1).offset(5), 0);
        assert_eq!(LibraryPlacement::FromBottom(2).offset(5), 1);
        assert_eq!(LibraryPlacement::FromBottom(99).offset(5), 5);
    }

    #[test]
    fn test_move_to_position_from_top() {
        let state = game(4).draw_card(ALICE);
        let drawn = state.cards_in_zone(ALICE, Zone::Hand)[0].id;

        let state = state.move_to_library(drawn, LibraryPlacement::FromTop(2));

        assert_eq!(names(state.library(ALICE)), vec!["A0", "A1", "A3", "A2"]);
    }

    #[test]
    fn test_move_to_position_from_bottom() {
        let state = game(4).draw_card(ALICE);
        let drawn = state.cards_in_zone(ALICE, Zone::Hand)[0].id;

        let state = state.move_to_library(drawn, LibraryPlacement::FromBottom(2));

        assert_eq!(names(state.library(ALICE)), vec!["A0", "A3", "A1", "A2"]);
    }

    #[test]
    fn test_move_within_library() {
        let state = game(3);
        let bottom = state.library(ALICE)[0].id;

        let state = state.move_to_library_top(bottom);
        assert_eq!(names(state.library(ALICE)), vec!["A1", "A2", "A0"]);

        let state = state.move_to_library_bottom(bottom);
        assert_eq!(names(state.library(ALICE)), vec!["A0", "A1", "A2"]);
    }

    #[test]
    fn test_move_into_other_owners_library_goes_to_owner() {
        let state = game(2);
        let commander = state.cards_in_zone(BOB, Zone::CommandZone)[0].id;

        let state = state.give_control(commander, ALICE).move_to_library_top(commander);

        assert_eq!(state.card_count(BOB, Zone::Library), 3);
        assert_eq!(state.peek_library(BOB, 1)[0].id, commander);
        assert_eq!(state.card_count(ALICE, Zone::Library), 2);
    }

    #[test]
    fn test_shuffle_subset_top() {
        let state = game(20).shuffle_subset(ALICE, 5, LibraryEnd::Top);
        let after = names(state.library(ALICE));

        let bottom: Vec<String> = (0..15).map(|i| format!("A{i}")).collect();
        assert_eq!(&after[..15], bottom.as_slice());

        let mut top = after[15..].to_vec();
        top.sort();
        assert_eq!(top, vec!["A15", "A16", "A17", "A18", "A19"]);
    }

    #[test]
    fn test_shuffle_subset_small_count_is_noop() {
        let state = game(5);
        let after = state.shuffle_subset(ALICE, 1, LibraryEnd::Bottom);
        assert_eq!(names(after.library(ALICE)), names(state.library(ALICE)));
    }

    #[test]
    fn test_shuffle_subset_count_is_clamped() {
        let state = game(5);
        let mut expected = names(state.library(ALICE));
        expected.sort();

        for end in [LibraryEnd::Top, LibraryEnd::Bottom] {
            let shuffled = state.shuffle_subset(ALICE, 50, end);

            let mut after = names(shuffled.library(ALICE));
            after.sort();
            assert_eq!(after, expected);
            assert_eq!(names(shuffled.library(BOB)), names(state.library(BOB)));
            assert_eq!(shuffled.card_count(ALICE, Zone::Library), 5);
        }
    }

    #[test]
    fn test_shuffle_leaves_other_player() {
        let state = game(10);
        let shuffled = state.shuffle_library(ALICE);

        assert_eq!(names(shuffled.library(BOB)), names(state.library(BOB)));
        let mut a = names(shuffled.library(ALICE));
        a.sort();
        let mut b = names(state.library(ALICE));
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_is_pure() {
        let state = game(10);
        let first = state.shuffle_library(ALICE);
        let second = state.shuffle_library(ALICE);
        assert_eq!(names(first.library(ALICE)), names(second.library(ALICE)));
    }

    #[test]
    fn test_mill() {
        let state = game(5).mill(ALICE, 2);

        assert_eq!(names(state.library(ALICE)), vec!["A0", "A1", "A2"]);
        assert_eq!(state.card_count(ALICE, Zone::Graveyard), 2);
        assert!(!state.player(ALICE).unwrap().has_lost());
    }

    #[test]
    fn test_over_mill_loses() {
        let state = game(2).mill(ALICE, 5);

        assert_eq!(state.card_count(ALICE, Zone::Library), 0);
        assert_eq!(state.card_count(ALICE, Zone::Graveyard), 2);
        assert!(state.player(ALICE).unwrap().has_lost());
    }
}
