//! Error types for the engine.
//!
//! Only genuinely malformed input is an error. Missing ids are tolerated as
//! no-ops and loss conditions are ordinary state, so neither appears here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("counter type must not be blank")]
    BlankCounterType,

    #[error("counter amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("commander damage must not be negative, got {0}")]
    NegativeDamage(i64),

    #[error("deck '{deck}' has {actual} cards, expected {expected}")]
    DeckSize {
        deck: String,
        expected: usize,
        actual: usize,
    },

    #[error("commander '{0}' is not legendary")]
    NonLegendaryCommander(String),

    #[error("duplicate non-basic card: {0}")]
    DuplicateCard(String),

    #[error("player count {count} outside {min}..={max}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
