//! Intent dispatch.
//!
//! `GameState::apply` is the one entry point a client needs: intent in, new
//! state out. Only input validation can fail; unknown ids come back as an
//! unchanged state.

use crate::core::{GameState, Intent};
use crate::error::Result;

impl GameState {
    /// Apply one intent.
    pub fn apply(&self, intent: &Intent) -> Result<GameState> {
        tracing::debug!(intent = intent.name(), turn = self.turn_number, "applying intent");
        let next = match intent {
            Intent::MoveCard { instance, zone } => self.move_card(*instance, *zone),
            Intent::DrawCard { player } => self.draw_card(*player),
            Intent::DrawCards { player, count } => self.draw_cards(*player, *count),
            Intent::ShuffleLibrary { player } => self.shuffle_library(*player),
            Intent::ShuffleSubset { player, count, end } => {
                self.shuffle_subset(*player, *count, *end)
            }
            Intent::MoveToLibrary { instance, placement } => {
                self.move_to_library(*instance, *placement)
            }
            Intent::Mill { player, count } => self.mill(*player, *count),
            Intent::AddCounter { instance, kind, amount } => {
                self.add_counter(*instance, kind, *amount)?
            }
            Intent::RemoveCounter { instance, kind, amount } => {
                self.remove_counter(*instance, kind, *amount)?
            }
            Intent::Tap { instance } => self.tap(*instance),
            Intent::Untap { instance } => self.untap(*instance),
            Intent::Flip { instance } => self.flip(*instance),
            Intent::SetFaceDown { instance, face_down } => self.set_face_down(*instance, *face_down),
            Intent::SetDoesntUntap { instance, doesnt_untap } => {
                self.set_doesnt_untap(*instance, *doesnt_untap)
            }
            Intent::SetModifiers { instance, power, toughness } => {
                self.set_modifiers(*instance, *power, *toughness)
            }
            Intent::SetAnnotation { instance, annotation } => {
                self.set_annotation(*instance, annotation.clone())
            }
            Intent::Attach { instance, host } => self.attach(*instance, *host),
            Intent::Detach { instance } => self.detach(*instance),
            Intent::UpdateLife { player, life } => self.update_life(*player, *life),
            Intent::UpdateCommanderDamage { player, source, damage } => {
                self.update_commander_damage(*player, *source, *damage)?
            }
            Intent::GiveControl { instance, controller } => self.give_control(*instance, *controller),
            Intent::CreateTokens { player, spec, count } => {
                self.create_tokens(*player, spec.clone(), *count)
            }
            Intent::RemoveInstance { instance } => self.remove_instance(*instance),
            Intent::RemovePlayer { player } => self.remove_player(*player),
            Intent::AdvancePhase => self.advance_phase(),
            Intent::PassTurn => self.pass_turn(),
            Intent::UntapAll { player } => self.untap_all(*player),
            Intent::Reposition { player, instances, drop, columns } => {
                self.reposition(*player, instances, *drop, *columns)
            }
        };
        Ok(next)
    }

    /// Apply intents in order, stopping at the first rejection.
    pub fn apply_all<'a>(&self, intents: impl IntoIterator<Item = &'a Intent>) -> Result<GameState> {
        intents
            .into_iter()
            .try_fold(self.clone(), |state, intent| state.apply(intent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Deck};
    use crate::core::{EngineConfig, GameBuilder, PlayerId};
    use crate::error::EngineError;
    use crate::rules::Phase;
    use crate::zones::Zone;

    const ALICE: PlayerId = PlayerId::new(0);
    const BOB: PlayerId = PlayerId::new(1);

    fn game() -> GameState {
        let deck = || {
            Deck::new(
                "Test",
                Card::new("Commander", "Legendary Creature — Human"),
                (0..10).map(|i| Card::new(format!("Card {i}"), "Creature")),
            )
        };
        GameBuilder::new(EngineConfig::default().with_deck_size(10))
            .player("Alice", deck())
            .player("Bob", deck())
            .build()
            .unwrap()
    }

    #[test]
    fn test_apply_draw_and_pass() {
        let state = game()
            .apply_all(&[
                Intent::DrawCards { player: ALICE, count: 3 },
                Intent::PassTurn,
                Intent::DrawCard { player: BOB },
            ])
            .unwrap();

        assert_eq!(state.card_count(ALICE, Zone::Hand), 3);
        assert_eq!(state.card_count(BOB, Zone::Hand), 1);
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.phase, Phase::Untap);
        assert_eq!(state.active_player_index(), 1);
    }

    #[test]
    fn test_apply_rejects_bad_counter() {
        let state = game();
        let commander = state.cards_in_zone(ALICE, Zone::CommandZone)[0].id;

        let result = state.apply(&Intent::AddCounter {
            instance: commander,
            kind: String::new(),
            amount: 1,
        });
        assert_eq!(result.err(), Some(EngineError::BlankCounterType));
    }

    #[test]
    fn test_apply_all_stops_at_rejection() {
        let state = game();
        let result = state.apply_all(&[
            Intent::UpdateLife { player: BOB, life: 12 },
            Intent::UpdateCommanderDamage {
                player: BOB,
                source: state.cards_in_zone(ALICE, Zone::CommandZone)[0].id,
                damage: -4,
            },
        ]);
        assert_eq!(result.err(), Some(EngineError::NegativeDamage(-4)));
        assert_eq!(state.player(BOB).unwrap().life, 40);
    }
}
