//! Turn sequencing, loss conditions, and intent dispatch.
//!
//! The engine keeps books; it does not judge plays. The rules here are the
//! mechanical ones a table tracks: whose turn it is, which step it is, and
//! who is out of the game.

pub mod engine;
pub mod loss;
pub mod turn;

pub use loss::derive_has_lost;
pub use turn::Phase;
