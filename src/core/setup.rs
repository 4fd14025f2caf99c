//! Building a game from decks.

use super::config::EngineConfig;
use super::entity::GameId;
use super::player::{Player, PlayerId};
use super::state::GameState;
use crate::cards::{CardInstance, Deck};
use crate::error::{EngineError, Result};
use crate::zones::Zone;

/// Builder for the opening `GameState`.
///
/// ```
/// use commander_table::cards::{Card, Deck};
/// use commander_table::core::{EngineConfig, GameBuilder, PlayerId};
/// use commander_table::zones::Zone;
///
/// let deck = || Deck::new(
///     "Elves",
///     Card::new("Lathril", "Legendary Creature — Elf Noble"),
///     (0..99).map(|_| Card::new("Forest", "Basic Land — Forest")),
/// );
/// let state = GameBuilder::new(EngineConfig::default())
///     .seed(7)
///     .player("Alice", deck())
///     .player("Bob", deck())
///     .build()
///     .unwrap();
///
/// assert_eq!(state.card_count(PlayerId::new(0), Zone::Library), 99);
/// assert_eq!(state.card_count(PlayerId::new(1), Zone::CommandZone), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    config: EngineConfig,
    game_id: GameId,
    seed: u64,
    shuffle_libraries: bool,
    seats: Vec<(String, Deck)>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            game_id: GameId::default(),
            seed: 0,
            shuffle_libraries: true,
            seats: Vec::new(),
        }
    }

    #[must_use]
    pub fn game_id(mut self, id: GameId) -> Self {
        self.game_id = id;
        self
    }

    /// Seed for every shuffle in this game.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Shuffle each library after loading (default). When off, the last
    /// card of each deck is the top of its library.
    #[must_use]
    pub fn shuffle_libraries(mut self, shuffle: bool) -> Self {
        self.shuffle_libraries = shuffle;
        self
    }

    /// Add a seat. Players get ids in seat order starting at 0.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>, deck: Deck) -> Self {
        self.seats.push((name.into(), deck));
        self
    }

    /// Validate seats and decks, then create players and instances.
    pub fn build(self) -> Result<GameState> {
        let count = self.seats.len();
        if !(self.config.min_players..=self.config.max_players).contains(&count)
            || count > usize::from(u8::MAX)
        {
            return Err(EngineError::InvalidPlayerCount {
                count,
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }
        for (_, deck) in &self.seats {
            deck.check_size(self.config.deck_size)?;
        }

        let starting_life = self.config.starting_life;
        let mut state = GameState::new(self.game_id, self.config, self.seed);

        for (seat, (name, deck)) in self.seats.into_iter().enumerate() {
            let id = PlayerId::new(seat as u8);
            state.push_player(Player::new(id, name, starting_life));

            let commander = state.alloc_instance_id();
            state.instances_mut().push_back(CardInstance::new(
                commander,
                deck.commander,
                id,
                Zone::CommandZone,
            ));
            for card in deck.cards {
                let instance = state.alloc_instance_id();
                state.instances_mut().push_back(CardInstance::new(
                    instance,
                    card,
                    id,
                    Zone::Library,
                ));
            }
        }

        if self.shuffle_libraries {
            let players: Vec<PlayerId> = state.players().iter().map(|p| p.id).collect();
            for player in players {
                state = state.shuffle_library(player);
            }
        }

        tracing::debug!(
            game = %state.game_id,
            players = state.player_count(),
            instances = state.instances().len(),
            "game built"
        );
        Ok(state)
    }
}
