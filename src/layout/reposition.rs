//! Drag-end repositioning on the battlefield grid.
//!
//! A drop point becomes a target cell. Each dragged instance, in the order
//! given, takes the first cell at or after the target (row-major) that still
//! has room, counting the cards already there and the ones placed earlier in
//! the same batch. The dragged cards themselves do not count against their
//! old cells. If nothing has room the card goes to the last cell searched.
//!
//! Only cards that end up under the player's control are placed. A card on
//! the battlefield keeps its controller; a card entering from another zone
//! is controlled by its owner.

use rustc_hash::FxHashSet;

use crate::core::{GameState, InstanceId, PlayerId};
use crate::zones::Zone;

use super::grid::{arrange, clamp_columns, Cell, Occupancy, Point};

impl GameState {
    /// Place dragged instances on a player's battlefield around `drop`.
    ///
    /// Instances not yet on the battlefield are put onto it. Unknown ids and
    /// cards that would not be controlled by `player` are skipped; duplicates
    /// are placed once.
    #[must_use]
    pub fn reposition(
        &self,
        player: PlayerId,
        ids: &[InstanceId],
        drop: Point,
        columns: usize,
    ) -> GameState {
        let config = self.config().grid.clone();
        let columns = clamp_columns(columns);
        let target = config.cell_at(drop, columns);
        let moving: FxHashSet<InstanceId> = ids.iter().copied().collect();

        let others = arrange(
            self.battlefield_of(player)
                .into_iter()
                .filter(|c| !moving.contains(&c.id)),
            columns,
            &config,
        );
        let mut occupancy = Occupancy::from_layout(&others);
        let last_cell = Cell::from_index(config.cell_limit(columns) - 1, columns);

        let mut next = self.clone();
        let mut placed: FxHashSet<InstanceId> = FxHashSet::default();
        for &id in ids {
            if !placed.insert(id) {
                continue;
            }
            let Some(index) = next.position_of(id) else {
                tracing::trace!(instance = %id, "reposition: unknown instance");
                continue;
            };
            let current = &next.instances()[index];
            let controller = if current.zone == Zone::Battlefield {
                current.controller
            } else {
                current.owner()
            };
            if controller != player {
                tracing::trace!(instance = %id, %controller, %player, "reposition: not controlled by player");
                continue;
            }
            let cell = occupancy
                .first_free_from(target.index(columns), columns, &config)
                .unwrap_or_else(|| {
                    tracing::warn!(instance = %id, "no free cell after target, overfilling last cell");
                    last_cell
                });
            occupancy.add(cell);

            if next.instances()[index].zone != Zone::Battlefield {
                next.relocate(index, Zone::Battlefield);
            }
            let stamp = next.tick();
            if let Some(instance) = next.instances_mut().get_mut(index) {
                instance.grid_x = Some(cell.column);
                instance.grid_y = Some(cell.row);
                instance.placed_timestamp = stamp;
            }
            tracing::debug!(instance = %id, column = cell.column, row = cell.row, "card placed");
        }
        next
    }
}
