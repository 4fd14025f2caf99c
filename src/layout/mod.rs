//! Battlefield grid layout.
//!
//! ## Key Types
//!
//! - `GridConfig`: Cell size, spacing, per-cell capacity, row cap
//! - `GridLayout`: Result of `arrange`, one `GridPlacement` per instance
//! - `Cell` / `Point`: Grid and pixel coordinates
//!
//! `arrange` is a pure function of the instances and the column count.
//! `GameState::reposition` is the drag-end protocol that writes explicit
//! grid coordinates back into the state.

pub mod grid;
pub mod reposition;

pub use grid::{arrange, clamp_columns, Cell, GridConfig, GridLayout, GridPlacement, Point, MAX_GRID_EXTENT};
