//! Drag coordination.
//!
//! A `DragSession` holds the transient part of a drag: which instances are
//! being dragged and how far the pointer has moved. Nothing touches the
//! `GameState` until the drag ends, and a cancelled drag leaves it alone.
//!
//! On drop, in priority order:
//! 1. pointer over a registered zone: every dragged instance moves there;
//! 2. otherwise the accumulated offset picks a battlefield cell and the
//!    instances are repositioned;
//! 3. a drop a zone handler already claimed is skipped by the battlefield
//!    handler, so exactly one handler commits a drag.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameState, InstanceId, PlayerId};
use crate::layout::Point;
use crate::zones::Zone;

/// Axis-aligned bounds of a drop target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Registered zone drop targets. Earlier registrations win on overlap.
#[derive(Clone, Debug, Default)]
pub struct DropZones {
    targets: Vec<(Zone, Rect)>,
}

impl DropZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone's bounds. The battlefield is never a zone target;
    /// drops there go through grid placement.
    #[must_use]
    pub fn with_zone(mut self, zone: Zone, bounds: Rect) -> Self {
        if zone != Zone::Battlefield {
            self.targets.push((zone, bounds));
        }
        self
    }

    /// The zone under a point, if any.
    #[must_use]
    pub fn zone_at(&self, point: Point) -> Option<Zone> {
        self.targets
            .iter()
            .find(|(_, bounds)| bounds.contains(point))
            .map(|&(zone, _)| zone)
    }
}

/// What a drop did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// Nothing was being dragged.
    Nothing,
    /// The dragged instances moved to a zone.
    ZoneMove {
        zone: Zone,
        instances: SmallVec<[InstanceId; 4]>,
    },
    /// The dragged instances were placed on the battlefield grid.
    Reposition {
        drop: Point,
        instances: SmallVec<[InstanceId; 4]>,
    },
    /// A zone handler already committed this drag.
    Skipped,
}

/// Transient drag state, separate from the game state.
#[derive(Clone, Debug, Default)]
pub struct DragSession {
    dragged: SmallVec<[InstanceId; 4]>,
    origin: Point,
    offset: Point,
    claimed: bool,
}

impl DragSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `ids` from `origin`. Duplicates are dropped, order kept.
    pub fn begin(&mut self, ids: impl IntoIterator<Item = InstanceId>, origin: Point) {
        self.dragged.clear();
        for id in ids {
            if !self.dragged.contains(&id) {
                self.dragged.push(id);
            }
        }
        self.origin = origin;
        self.offset = Point::default();
        self.claimed = false;
    }

    /// Accumulate pointer movement.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        self.offset = self.offset.offset(dx, dy);
    }

    /// Abort the gesture. The game state is never touched.
    pub fn cancel(&mut self) {
        self.reset();
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !self.dragged.is_empty()
    }

    #[must_use]
    pub fn dragged(&self) -> &[InstanceId] {
        &self.dragged
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Where the dragged cards would land: origin plus accumulated offset.
    #[must_use]
    pub fn drop_point(&self) -> Point {
        self.origin.offset(self.offset.x, self.offset.y)
    }

    fn reset(&mut self) {
        self.dragged.clear();
        self.origin = Point::default();
        self.offset = Point::default();
    }

    /// Zone handler: move every dragged instance to `zone` and claim the drop.
    ///
    /// Library drops go on top of the owner's library.
    pub fn drop_on_zone(&mut self, state: &GameState, zone: Zone) -> (GameState, DropOutcome) {
        if !self.is_dragging() {
            return (state.clone(), DropOutcome::Nothing);
        }
        let instances = std::mem::take(&mut self.dragged);
        let mut next = state.clone();
        for &id in &instances {
            next = match zone {
                Zone::Library => next.move_to_library_top(id),
                _ => next.move_card(id, zone),
            };
        }
        tracing::debug!(%zone, count = instances.len(), "drag committed to zone");
        self.reset();
        self.claimed = true;
        (next, DropOutcome::ZoneMove { zone, instances })
    }

    /// Battlefield handler: reposition the dragged instances unless a zone
    /// handler already claimed the drop.
    pub fn drop_on_battlefield(
        &mut self,
        state: &GameState,
        player: PlayerId,
        columns: usize,
    ) -> (GameState, DropOutcome) {
        if std::mem::take(&mut self.claimed) {
            self.reset();
            return (state.clone(), DropOutcome::Skipped);
        }
        if !self.is_dragging() {
            return (state.clone(), DropOutcome::Nothing);
        }
        let drop = self.drop_point();
        let instances = std::mem::take(&mut self.dragged);
        let next = state.reposition(player, &instances, drop, columns);
        self.reset();
        (next, DropOutcome::Reposition { drop, instances })
    }

    /// Resolve a drop with the pointer at `pointer`.
    pub fn end(
        &mut self,
        state: &GameState,
        pointer: Point,
        zones: &DropZones,
        player: PlayerId,
        columns: usize,
    ) -> (GameState, DropOutcome) {
        match zones.zone_at(pointer) {
            Some(zone) if self.is_dragging() => self.drop_on_zone(state, zone),
            _ => self.drop_on_battlefield(state, player, columns),
        }
    }
}
