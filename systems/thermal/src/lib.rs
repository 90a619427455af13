#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ice lifecycle management: creation limits and melt triggering.
//!
//! The system keeps an id registry of live ice blocks and reconciles it
//! against the world at the start of every update, so ice created by the
//! player, loaded from a level, or destroyed by any other system is always
//! accounted for without caller-side bookkeeping. Melt countdowns are owned
//! by the blocks themselves; this system only decides when they start.

use frostfall_core::{Event, GridPos, ObjectId, ObjectKind};
use frostfall_world::{GameObject, World};

/// Maximum number of concurrently live ice blocks.
pub const MAX_ICE_BLOCKS: usize = 20;

/// Cross-cutting manager for ice-block creation and melting.
#[derive(Debug, Default)]
pub struct Thermal {
    tracked: Vec<ObjectId>,
}

impl Thermal {
    /// Creates a thermal system with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ice blocks currently tracked.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Creates a new ice block at the position, subject to placement rules.
    ///
    /// Refuses positions outside the world's actual bounds, occupied cells,
    /// cells directly on top of a hot pot, and creation beyond
    /// [`MAX_ICE_BLOCKS`] live blocks. Returns the new block's id.
    pub fn create_ice_block(&mut self, world: &mut World, pos: GridPos) -> Option<ObjectId> {
        if world.is_out_of_bounds(pos) || world.object_at(pos).is_some() {
            return None;
        }
        if world.object_at(pos.below()).is_some_and(GameObject::is_hot) {
            log::debug!(
                "refusing ice at ({}, {}): hot pot directly below",
                pos.x(),
                pos.y()
            );
            return None;
        }

        self.reconcile(world);
        if self.tracked.len() >= MAX_ICE_BLOCKS {
            log::debug!("refusing ice: {MAX_ICE_BLOCKS} blocks already live");
            return None;
        }

        let id = world.add_object(GameObject::ice_block(), pos)?;
        self.tracked.push(id);
        Some(id)
    }

    /// Reconciles the registry, then starts melting every tracked block in
    /// contact with heat: orthogonally adjacent to a flame, or resting
    /// directly on a hot pot. Melt starts are idempotent.
    pub fn update(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        self.reconcile(world);

        for id in self.tracked.clone() {
            let Some(cell) = world.object(id).map(GameObject::cell) else {
                continue;
            };
            if !heat_exposed(world, cell) {
                continue;
            }
            let started = world
                .object_mut(id)
                .is_some_and(GameObject::start_melting);
            if started {
                out_events.push(Event::MeltStarted { id });
            }
        }
    }

    /// Drops stale entries and adopts untracked live ice blocks.
    fn reconcile(&mut self, world: &World) {
        self.tracked.retain(|id| {
            world
                .object(*id)
                .is_some_and(|object| object.active() && object.kind() == ObjectKind::IceBlock)
        });
        for object in world.objects_of_kind(ObjectKind::IceBlock) {
            if object.active() && !self.tracked.contains(&object.id()) {
                self.tracked.push(object.id());
            }
        }
        self.tracked.sort_unstable();
    }
}

fn heat_exposed(world: &World, cell: GridPos) -> bool {
    let flame_adjacent = cell.orthogonal_neighbors().into_iter().any(|neighbor| {
        world
            .object_at(neighbor)
            .is_some_and(|object| object.kind() == ObjectKind::Flame && object.active())
    });
    if flame_adjacent {
        return true;
    }
    world.object_at(cell.below()).is_some_and(GameObject::is_hot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_respects_world_bounds_and_occupancy() {
        let mut world = World::with_dimensions(8, 6);
        let mut thermal = Thermal::new();

        assert!(thermal
            .create_ice_block(&mut world, GridPos::new(8, 0))
            .is_none());
        assert!(thermal
            .create_ice_block(&mut world, GridPos::new(0, 6))
            .is_none());

        let cell = GridPos::new(3, 2);
        assert!(thermal.create_ice_block(&mut world, cell).is_some());
        assert!(thermal.create_ice_block(&mut world, cell).is_none());
        assert_eq!(thermal.tracked_count(), 1);
    }

    #[test]
    fn creation_refuses_the_top_of_a_hot_pot() {
        let mut world = World::new();
        let mut thermal = Thermal::new();
        assert!(world
            .add_object(GameObject::pot(true), GridPos::new(4, 0))
            .is_some());

        assert!(thermal
            .create_ice_block(&mut world, GridPos::new(4, 1))
            .is_none());
        assert!(thermal
            .create_ice_block(&mut world, GridPos::new(4, 2))
            .is_some());
    }

    #[test]
    fn creation_stops_at_the_block_limit() {
        let mut world = World::new();
        let mut thermal = Thermal::new();

        for index in 0..MAX_ICE_BLOCKS {
            let cell = GridPos::new((index % 20) as i32, (index / 20) as i32 * 2 + 2);
            assert!(thermal.create_ice_block(&mut world, cell).is_some());
        }
        assert!(thermal
            .create_ice_block(&mut world, GridPos::new(10, 10))
            .is_none());
    }

    #[test]
    fn registry_adopts_and_forgets_automatically() {
        let mut world = World::new();
        let mut thermal = Thermal::new();
        let loaded = world
            .add_object(GameObject::ice_block(), GridPos::new(2, 2))
            .expect("placed");

        let mut events = Vec::new();
        thermal.update(&mut world, &mut events);
        assert_eq!(thermal.tracked_count(), 1);

        world.object_mut(loaded).expect("ice").deactivate();
        world.purge_inactive(&mut events);
        thermal.update(&mut world, &mut events);
        assert_eq!(thermal.tracked_count(), 0);
    }

    #[test]
    fn adjacent_flame_starts_melting_once() {
        let mut world = World::new();
        let mut thermal = Thermal::new();
        assert!(world
            .add_object(GameObject::flame(), GridPos::new(5, 2))
            .is_some());
        let ice = thermal
            .create_ice_block(&mut world, GridPos::new(6, 2))
            .expect("created");

        let mut events = Vec::new();
        thermal.update(&mut world, &mut events);
        assert!(world.object(ice).expect("ice").is_melting());
        assert_eq!(events, vec![Event::MeltStarted { id: ice }]);

        thermal.update(&mut world, &mut events);
        assert_eq!(events.len(), 1, "repeat exposure does not restart the melt");
    }

    #[test]
    fn a_hot_pot_melts_only_the_block_on_top() {
        let mut world = World::new();
        let mut thermal = Thermal::new();
        assert!(world
            .add_object(GameObject::pot(true), GridPos::new(5, 0))
            .is_some());
        let beside = thermal
            .create_ice_block(&mut world, GridPos::new(6, 0))
            .expect("created");
        let above = world
            .add_object(GameObject::ice_block(), GridPos::new(5, 1))
            .expect("placed");

        let mut events = Vec::new();
        thermal.update(&mut world, &mut events);

        assert!(world.object(above).expect("above").is_melting());
        assert!(
            !world.object(beside).expect("beside").is_melting(),
            "pots radiate upward, not sideways"
        );
    }
}
