#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Frostfall.
//!
//! The world owns the dense cell grid and the id-ordered object store, and is
//! the only place positions ever change. Systems mutate objects through the
//! placement API (`add_object`, `remove_object`, `move_object`) so the grid
//! cell and the object's stored cell can never disagree; every mutator
//! refuses occupied destinations, which is the sole enforcement of the
//! one-object-per-cell invariant.

use std::{collections::BTreeMap, time::Duration};

use frostfall_core::{
    Event, GridPos, ObjectId, ObjectKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
};

mod object;

pub use object::{
    GameObject, HEAT_DURATION, ICE_COOLDOWN, JUMP_ANIMATION, JUMP_COOLDOWN, MELT_DURATION,
    MOVE_COOLDOWN, PORTAL_COOLDOWN,
};

/// Represents the authoritative Frostfall world state.
#[derive(Debug)]
pub struct World {
    width: i32,
    height: i32,
    cells: Vec<Option<ObjectId>>,
    objects: BTreeMap<ObjectId, GameObject>,
    next_id: u32,
}

impl World {
    /// Creates an empty world with the default 20×15 grid.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }

    /// Creates an empty world with the provided grid dimensions.
    #[must_use]
    pub fn with_dimensions(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let capacity = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; capacity],
            objects: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the position lies outside the grid.
    #[must_use]
    pub const fn is_out_of_bounds(&self, pos: GridPos) -> bool {
        pos.x() < 0 || pos.x() >= self.width || pos.y() < 0 || pos.y() >= self.height
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.is_out_of_bounds(pos) {
            None
        } else {
            Some((pos.y() as usize) * (self.width as usize) + pos.x() as usize)
        }
    }

    /// Returns the object occupying the provided cell, if any.
    #[must_use]
    pub fn object_at(&self, pos: GridPos) -> Option<&GameObject> {
        let id = self.index(pos).and_then(|index| self.cells[index])?;
        self.objects.get(&id)
    }

    /// Returns the object with the provided identifier, if it exists.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    /// Returns a mutable handle to the object with the provided identifier.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    /// Iterates all objects in ascending id order.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values()
    }

    /// Identifiers of all objects in ascending order.
    #[must_use]
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// All objects of the provided kind, in ascending id order.
    #[must_use]
    pub fn objects_of_kind(&self, kind: ObjectKind) -> Vec<&GameObject> {
        self.objects
            .values()
            .filter(|object| object.kind() == kind)
            .collect()
    }

    /// Number of objects of the provided kind.
    #[must_use]
    pub fn count_of_kind(&self, kind: ObjectKind) -> usize {
        self.objects
            .values()
            .filter(|object| object.kind() == kind)
            .count()
    }

    /// All objects inside the axis-aligned rectangle anchored at `origin`.
    #[must_use]
    pub fn objects_in_area(&self, origin: GridPos, width: i32, height: i32) -> Vec<&GameObject> {
        self.objects
            .values()
            .filter(|object| {
                let cell = object.cell();
                cell.x() >= origin.x()
                    && cell.x() < origin.x() + width
                    && cell.y() >= origin.y()
                    && cell.y() < origin.y() + height
            })
            .collect()
    }

    /// Places an object at the provided position.
    ///
    /// Returns the assigned identifier, or `None` without mutating anything
    /// when the position is out of bounds or already occupied.
    pub fn add_object(&mut self, mut object: GameObject, pos: GridPos) -> Option<ObjectId> {
        let index = self.index(pos)?;
        if self.cells[index].is_some() {
            return None;
        }

        let id = ObjectId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        object.id = id;
        object.cell = pos;
        self.cells[index] = Some(id);
        let _ = self.objects.insert(id, object);
        Some(id)
    }

    /// Places two portals and links them as a pair.
    ///
    /// All-or-nothing: if the second placement fails the first is rolled
    /// back and `None` is returned.
    pub fn add_portal_pair(
        &mut self,
        first: GridPos,
        second: GridPos,
    ) -> Option<(ObjectId, ObjectId)> {
        let first_id = self.add_object(GameObject::portal(), first)?;
        let Some(second_id) = self.add_object(GameObject::portal(), second) else {
            let _ = self.remove_object(first);
            return None;
        };

        if let Some(portal) = self.objects.get_mut(&first_id) {
            portal.set_portal_pair(second_id);
        }
        if let Some(portal) = self.objects.get_mut(&second_id) {
            portal.set_portal_pair(first_id);
        }
        Some((first_id, second_id))
    }

    /// Removes and returns the occupant of the provided cell, if any.
    pub fn remove_object(&mut self, pos: GridPos) -> Option<GameObject> {
        let index = self.index(pos)?;
        let id = self.cells[index].take()?;
        self.objects.remove(&id)
    }

    /// Atomically relocates the occupant of `from` to `to`.
    ///
    /// Fails without partial mutation when either endpoint is out of bounds,
    /// the source is empty, or the destination is occupied.
    pub fn move_object(&mut self, from: GridPos, to: GridPos) -> bool {
        let (Some(from_index), Some(to_index)) = (self.index(from), self.index(to)) else {
            return false;
        };
        let Some(id) = self.cells[from_index] else {
            return false;
        };
        if self.cells[to_index].is_some() {
            return false;
        }

        self.cells[to_index] = Some(id);
        self.cells[from_index] = None;
        if let Some(object) = self.objects.get_mut(&id) {
            object.cell = to;
        }
        true
    }

    /// Reports whether the portal has a live pair and zero cooldown.
    #[must_use]
    pub fn portal_ready(&self, id: ObjectId) -> bool {
        let Some(portal) = self.object(id) else {
            return false;
        };
        if portal.kind() != ObjectKind::Portal
            || !portal.active()
            || !portal.portal_cooldown().is_zero()
        {
            return false;
        }
        let Some(pair_id) = portal.portal_pair() else {
            return false;
        };
        self.object(pair_id)
            .is_some_and(|pair| pair.active() && pair.kind() == ObjectKind::Portal)
    }

    /// Sends a teleport-eligible traveler through the entry portal.
    ///
    /// The entry portal re-verifies its own readiness — live pair, zero
    /// cooldown on both ends — independent of whatever the caller already
    /// checked. The arrival cell is the first free in-bounds cell above,
    /// right of, left of, then below the exit portal; with no free cell the
    /// teleport is a silent no-op. Both portals enter cooldown on success.
    pub fn teleport_through(
        &mut self,
        traveler: ObjectId,
        entry: ObjectId,
        out_events: &mut Vec<Event>,
    ) -> bool {
        if !self.portal_ready(entry) {
            return false;
        }
        let Some(pair_id) = self.object(entry).and_then(GameObject::portal_pair) else {
            return false;
        };
        if !self
            .object(pair_id)
            .is_some_and(|exit| exit.portal_cooldown().is_zero())
        {
            return false;
        }

        let Some(traveler_obj) = self.object(traveler) else {
            return false;
        };
        if !traveler_obj.active() || !traveler_obj.kind().teleport_eligible() {
            return false;
        }
        let from = traveler_obj.cell();

        let Some(exit_cell) = self.object(pair_id).map(GameObject::cell) else {
            return false;
        };
        let destination = exit_cell
            .orthogonal_neighbors()
            .into_iter()
            .find(|cell| !self.is_out_of_bounds(*cell) && self.object_at(*cell).is_none());
        let Some(destination) = destination else {
            return false;
        };

        if !self.move_object(from, destination) {
            return false;
        }

        if let Some(portal) = self.objects.get_mut(&entry) {
            portal.trigger_portal_cooldown();
        }
        if let Some(portal) = self.objects.get_mut(&pair_id) {
            portal.trigger_portal_cooldown();
        }
        out_events.push(Event::Teleported {
            id: traveler,
            from,
            to: destination,
        });
        true
    }

    /// Resolves direct contact between two overlapping or landing objects.
    ///
    /// Fires the kind-specific collision responses for both participants:
    /// flame and ice mutually destroy, a hot pot melts ice away and cools,
    /// and a flame starts a cold pot heating. Other pairings have no
    /// built-in response.
    pub fn collide_pair(&mut self, first: ObjectId, second: ObjectId, out_events: &mut Vec<Event>) {
        let Some(a) = self.object(first).map(|o| (o.kind(), o.active(), o.is_hot())) else {
            return;
        };
        let Some(b) = self.object(second).map(|o| (o.kind(), o.active(), o.is_hot())) else {
            return;
        };
        if !a.1 || !b.1 {
            return;
        }

        let ordered = [(first, a.0, a.2, second), (second, b.0, b.2, first)];
        for (id, kind, hot, other_id) in ordered {
            let other_kind = if id == first { b.0 } else { a.0 };
            match (kind, other_kind) {
                (ObjectKind::Flame, ObjectKind::IceBlock) => {
                    let destroyed = self
                        .objects
                        .get_mut(&id)
                        .is_some_and(GameObject::destroy);
                    if destroyed {
                        out_events.push(Event::FlameExtinguished { id, by: other_id });
                    }
                    if let Some(ice) = self.objects.get_mut(&other_id) {
                        let _ = ice.destroy();
                    }
                }
                (ObjectKind::Pot, ObjectKind::IceBlock) if hot => {
                    if let Some(ice) = self.objects.get_mut(&other_id) {
                        let _ = ice.destroy();
                    }
                    let cooled = self
                        .objects
                        .get_mut(&id)
                        .is_some_and(GameObject::cool_down);
                    if cooled {
                        out_events.push(Event::PotCooled { id });
                    }
                }
                (ObjectKind::Pot, ObjectKind::Flame) if !hot => {
                    let started = self
                        .objects
                        .get_mut(&id)
                        .is_some_and(GameObject::begin_heating);
                    if started {
                        out_events.push(Event::HeatingStarted { id });
                    }
                }
                _ => {}
            }
        }
    }

    /// Advances every active object's timers, then purges inactive objects.
    pub fn update(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let ids = self.object_ids();
        for id in ids {
            if let Some(object) = self.objects.get_mut(&id) {
                if !object.active() {
                    continue;
                }
                if let Some(event) = object.update(dt) {
                    out_events.push(event);
                }
            }
        }
        self.purge_inactive(out_events);
    }

    /// Removes every inactive object from the grid and the store.
    pub fn purge_inactive(&mut self, out_events: &mut Vec<Event>) {
        let stale: Vec<(ObjectId, ObjectKind, GridPos)> = self
            .objects
            .values()
            .filter(|object| !object.active())
            .map(|object| (object.id(), object.kind(), object.cell()))
            .collect();

        for (id, kind, cell) in stale {
            if let Some(index) = self.index(cell) {
                if self.cells[index] == Some(id) {
                    self.cells[index] = None;
                }
            }
            let _ = self.objects.remove(&id);
            out_events.push(Event::Destroyed { id, kind });
        }
    }

    /// Empties the grid and the object store, used on level (re)load.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.objects.clear();
        self.next_id = 1;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use frostfall_core::{GridPos, ObjectId, ObjectKind, ObjectSnapshot, ObjectView};

    /// Captures a read-only, id-ordered view of every object.
    #[must_use]
    pub fn object_view(world: &World) -> ObjectView {
        let snapshots: Vec<ObjectSnapshot> = world
            .objects()
            .map(|object| ObjectSnapshot {
                id: object.id(),
                kind: object.kind(),
                cell: object.cell(),
                solid: object.is_solid(),
                pushable: object.is_pushable(),
                fragile: object.is_fragile(),
                flammable: object.is_flammable(),
                weight: object.weight(),
                falling: object.falling(),
                hot: object.is_hot(),
                melting: object.is_melting(),
                portal_ready: world.portal_ready(object.id()),
                render_offset: object.render_offset(),
            })
            .collect();
        ObjectView::from_snapshots(snapshots)
    }

    /// Number of flames still burning.
    #[must_use]
    pub fn flame_count(world: &World) -> usize {
        world.count_of_kind(ObjectKind::Flame)
    }

    /// Full cell enumeration with coordinates, bottom row first.
    #[must_use]
    pub fn cell_entries(world: &World) -> Vec<(GridPos, Option<ObjectId>)> {
        let mut entries = Vec::with_capacity((world.width() * world.height()) as usize);
        for y in 0..world.height() {
            for x in 0..world.width() {
                let pos = GridPos::new(x, y);
                entries.push((pos, world.object_at(pos).map(super::GameObject::id)));
            }
        }
        entries
    }
}
