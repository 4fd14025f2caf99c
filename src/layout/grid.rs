//! Battlefield grid layout.
//!
//! Maps battlefield instances onto a grid of cells, each holding a small
//! stack of cards. Instances with both `grid_x` and `grid_y` set keep their
//! cell even if that overfills it; everything else is packed row-major into
//! the first cell with room. When the whole grid is full the instance goes
//! to the origin cell. Layout never fails.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::{GameState, InstanceId, PlayerId};

/// Largest column or row count a grid can have. Cell coordinates are `u32`.
pub const MAX_GRID_EXTENT: usize = u32::MAX as usize;

/// Clamp a requested column count into `1..=MAX_GRID_EXTENT`.
#[must_use]
pub fn clamp_columns(columns: usize) -> usize {
    columns.clamp(1, MAX_GRID_EXTENT)
}

/// Grid geometry and stacking limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cell_width: f32,
    pub cell_height: f32,

    /// Gap between neighbouring cells.
    pub spacing: f32,

    /// Cards per cell before auto-placement moves on.
    pub capacity: usize,

    pub max_rows: usize,

    /// Per-step stack offset as a fraction of the card size.
    pub stack_offset_fraction: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 100.0,
            cell_height: 140.0,
            spacing: 8.0,
            capacity: 3,
            max_rows: 10,
            stack_offset_fraction: 0.25,
        }
    }
}

impl GridConfig {
    fn step_x(&self) -> f32 {
        self.cell_width + self.spacing
    }

    fn step_y(&self) -> f32 {
        self.cell_height + self.spacing
    }

    fn row_limit(&self) -> usize {
        self.max_rows.clamp(1, MAX_GRID_EXTENT)
    }

    /// Columns that fit in `width`, at least one.
    #[must_use]
    pub fn columns_for_width(&self, width: f32) -> usize {
        clamp_columns((width / self.step_x()).floor() as usize)
    }

    /// Cells searched before giving up.
    #[must_use]
    pub fn cell_limit(&self, columns: usize) -> usize {
        clamp_columns(columns).saturating_mul(self.row_limit())
    }

    /// The cell under a point, clamped into the grid.
    #[must_use]
    pub fn cell_at(&self, point: Point, columns: usize) -> Cell {
        let column = (point.x / self.step_x()).floor().max(0.0) as usize;
        let row = (point.y / self.step_y()).floor().max(0.0) as usize;
        Cell::new(
            column.min(clamp_columns(columns) - 1) as u32,
            row.min(self.row_limit() - 1) as u32,
        )
    }

    /// Top-left corner of a cell.
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Point {
        Point::new(
            cell.column as f32 * self.step_x(),
            cell.row as f32 * self.step_y(),
        )
    }

    /// Visual offset of a card at `stack_index` within its cell.
    #[must_use]
    pub fn stack_offset(&self, stack_index: usize) -> Point {
        let steps = stack_index as f32 * self.stack_offset_fraction;
        Point::new(steps * self.cell_width, steps * self.cell_height)
    }

    /// Where a placed card is drawn: its cell's corner plus its stack offset.
    #[must_use]
    pub fn placement_point(&self, placement: &GridPlacement) -> Point {
        let offset = self.stack_offset(placement.stack_index);
        self.cell_origin(placement.cell).offset(offset.x, offset.y)
    }
}

/// A point in battlefield coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub column: u32,
    pub row: u32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { column: 0, row: 0 };

    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Cell at a row-major index.
    #[must_use]
    pub fn from_index(index: usize, columns: usize) -> Self {
        let columns = clamp_columns(columns);
        Self::new((index % columns) as u32, (index / columns) as u32)
    }

    /// Row-major index of this cell.
    #[must_use]
    pub fn index(self, columns: usize) -> usize {
        (self.row as usize)
            .saturating_mul(clamp_columns(columns))
            .saturating_add(self.column as usize)
    }
}

/// Where one instance is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPlacement {
    pub instance: InstanceId,
    pub cell: Cell,

    /// 0 is the bottom of the cell's stack.
    pub stack_index: usize,
}

/// A complete arrangement of one battlefield.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,

    /// One placement per input instance, in input order.
    pub placements: Vec<GridPlacement>,
}

impl GridLayout {
    #[must_use]
    pub fn placement(&self, id: InstanceId) -> Option<&GridPlacement> {
        self.placements.iter().find(|p| p.instance == id)
    }

    /// Instances in a cell, bottom of the stack first.
    #[must_use]
    pub fn stack_at(&self, cell: Cell) -> Vec<InstanceId> {
        let mut stack: Vec<&GridPlacement> =
            self.placements.iter().filter(|p| p.cell == cell).collect();
        stack.sort_by_key(|p| p.stack_index);
        stack.into_iter().map(|p| p.instance).collect()
    }
}

/// Card counts per cell.
#[derive(Clone, Debug, Default)]
pub(crate) struct Occupancy {
    counts: FxHashMap<Cell, usize>,
}

impl Occupancy {
    pub(crate) fn from_layout(layout: &GridLayout) -> Self {
        let mut occupancy = Self::default();
        for placement in &layout.placements {
            occupancy.add(placement.cell);
        }
        occupancy
    }

    pub(crate) fn count(&self, cell: Cell) -> usize {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    pub(crate) fn add(&mut self, cell: Cell) {
        *self.counts.entry(cell).or_insert(0) += 1;
    }

    /// First cell at or after row-major index `start` with spare capacity.
    pub(crate) fn first_free_from(
        &self,
        start: usize,
        columns: usize,
        config: &GridConfig,
    ) -> Option<Cell> {
        if config.capacity == 0 {
            return None;
        }
        (start..config.cell_limit(columns))
            .map(|index| Cell::from_index(index, columns))
            .find(|&cell| self.count(cell) < config.capacity)
    }
}

/// Lay out battlefield instances on a grid `columns` wide.
#[must_use]
pub fn arrange<'a>(
    instances: impl IntoIterator<Item = &'a CardInstance>,
    columns: usize,
    config: &GridConfig,
) -> GridLayout {
    let columns = clamp_columns(columns);
    let instances: Vec<&CardInstance> = instances.into_iter().collect();
    let mut occupancy = Occupancy::default();
    let mut cells: Vec<Option<Cell>> = vec![None; instances.len()];

    for (slot, instance) in cells.iter_mut().zip(&instances) {
        if let Some((column, row)) = instance.grid_cell() {
            let cell = Cell::new(column, row);
            occupancy.add(cell);
            *slot = Some(cell);
        }
    }

    for (slot, instance) in cells.iter_mut().zip(&instances) {
        if slot.is_some() {
            continue;
        }
        let cell = occupancy
            .first_free_from(0, columns, config)
            .unwrap_or_else(|| {
                tracing::warn!(instance = %instance.id, "battlefield grid full, stacking on origin");
                Cell::ORIGIN
            });
        occupancy.add(cell);
        *slot = Some(cell);
    }

    let cells: Vec<Cell> = cells.into_iter().map(|c| c.unwrap_or(Cell::ORIGIN)).collect();

    let mut groups: FxHashMap<Cell, Vec<usize>> = FxHashMap::default();
    for (i, &cell) in cells.iter().enumerate() {
        groups.entry(cell).or_default().push(i);
    }
    let mut stack_indices = vec![0; instances.len()];
    let top = config.capacity.saturating_sub(1);
    for members in groups.values_mut() {
        members.sort_by_key(|&i| (instances[i].placed_timestamp, i));
        for (depth, &i) in members.iter().enumerate() {
            stack_indices[i] = depth.min(top);
        }
    }

    let placements: Vec<GridPlacement> = instances
        .iter()
        .zip(cells.iter().zip(stack_indices))
        .map(|(instance, (&cell, stack_index))| GridPlacement {
            instance: instance.id,
            cell,
            stack_index,
        })
        .collect();

    let rows = placements
        .iter()
        .map(|p| p.cell.row as usize + 1)
        .max()
        .map_or(0, |rows| rows.min(config.max_rows));

    GridLayout {
        columns,
        rows,
        placements,
    }
}

impl GameState {
    /// Layout of a player's battlefield in a container `width` wide.
    #[must_use]
    pub fn battlefield_layout(&self, player: PlayerId, width: f32) -> GridLayout {
        let config = &self.config().grid;
        arrange(
            self.battlefield_of(player),
            config.columns_for_width(width),
            config,
        )
    }
}
