//! # commander-table
//!
//! Game state engine for a Commander tabletop simulator: players, card
//! instances, and the zones they move through, plus turn/phase sequencing and
//! battlefield grid layout. It keeps the books for a table of 2-4 players; it
//! does not enforce the rules of the game.
//!
//! ## Design Principles
//!
//! 1. **Persistent State**: `GameState` is a value. Every operation returns a
//!    new state and leaves the old one intact. Structural sharing via `im-rs`
//!    keeps that cheap.
//!
//! 2. **Tolerant of Stale Ids**: A missing instance or player is a no-op, not
//!    an error. Only malformed input (blank counter type, negative damage) is
//!    rejected, and always before anything changes.
//!
//! 3. **Loss Is State**: Drawing from an empty library, lethal life or
//!    commander damage, and over-milling mark a player as having lost. That
//!    flag never clears.
//!
//! ## Modules
//!
//! - `core`: Ids, players, configuration, RNG, state, setup, intents
//! - `cards`: Card metadata, instances, decks, tokens
//! - `zones`: Zone enum, zone transitions, library ordering
//! - `rules`: Turn/phase machine, loss derivation, intent dispatch
//! - `layout`: Battlefield grid arrangement and repositioning
//! - `interaction`: Drag coordination

pub mod cards;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, GameBuilder, GameId, GameRng, GameRngState, GameState, InstanceId, Intent,
    Player, PlayerId,
};

pub use crate::cards::{Card, CardInstance, Color, Deck, TokenSpec};

pub use crate::zones::{LibraryEnd, LibraryPlacement, Zone};

pub use crate::rules::{derive_has_lost, Phase};

pub use crate::layout::{arrange, Cell, GridConfig, GridLayout, GridPlacement, Point};

pub use crate::interaction::{DragSession, DropOutcome, DropZones, Rect};

pub use crate::error::{EngineError, Result};
