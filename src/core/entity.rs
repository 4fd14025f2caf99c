//! Instance and game identifiers.
//!
//! Every physical card in a game (deck cards, commanders, tokens) gets a
//! unique `InstanceId`. Ids are allocated sequentially by `GameState` and are
//! never reused, even after an instance is culled.
//!
//! ```
//! use commander_table::core::InstanceId;
//!
//! let id = InstanceId(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(id.to_string(), "Instance(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Identifier for a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}
