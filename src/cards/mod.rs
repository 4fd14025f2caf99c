//! Card system: metadata, instances, decks, and tokens.
//!
//! ## Key Types
//!
//! - `Card`: Static printed metadata, shared between instances via `Arc`
//! - `CardInstance`: One physical card at the table (zone, tap, counters)
//! - `Deck`: Commander plus the rest of the deck, as handed over by import
//! - `TokenSpec`: Freeform token description turned into a `Card`

pub mod definition;
pub mod deck;
pub mod instance;
pub mod token;

pub use deck::Deck;
pub use definition::{Card, Color};
pub use instance::CardInstance;
pub use token::TokenSpec;
