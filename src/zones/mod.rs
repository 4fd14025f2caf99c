//! Zones and the transitions between them.
//!
//! ## Key Types
//!
//! - `Zone`: The seven fixed zones
//! - `LibraryPlacement`: Where a card goes when put into a library
//! - `LibraryEnd`: Which end a partial shuffle works on
//!
//! The operations are `GameState` methods defined in `transitions` (moves,
//! flags, counters, control, tokens) and `library` (draw, shuffle, mill,
//! positional inserts).

pub mod library;
pub mod transitions;
pub mod zone;

pub use library::{LibraryEnd, LibraryPlacement};
pub use zone::Zone;
