//! Core engine types: ids, players, configuration, RNG, state, setup, intents.
//!
//! `GameState` is the persistent value every operation works on. The
//! operations themselves live next to their subject: zone transitions in
//! `zones`, turn sequencing and loss in `rules`, grid placement in `layout`.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod setup;
pub mod state;

pub use action::Intent;
pub use config::EngineConfig;
pub use entity::{GameId, InstanceId};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use setup::GameBuilder;
pub use state::GameState;
