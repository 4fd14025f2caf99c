//! Reconciling UI drags with the game state.

pub mod drag;

pub use drag::{DragSession, DropOutcome, DropZones, Rect};
