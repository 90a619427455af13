#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Queued, constraint-checked displacement of pushable objects.
//!
//! Pushes are requested, not performed: the queue drains once per tick, and
//! chain pushes raised during a drain wait for the next one, so a chain
//! propagates at most one link per tick. Every validation failure drops the
//! request silently — speculative pushes are cheap and side-effect-free.

use frostfall_core::{Direction, Event, ObjectId, ObjectKind};
use frostfall_world::{GameObject, World};

/// Hard weight ceiling: heavier objects never move, pushable flag or not.
pub const MAX_PUSH_WEIGHT: u32 = 5;

#[derive(Clone, Copy, Debug)]
struct PushRequest {
    id: ObjectId,
    direction: Direction,
    force: f32,
    distance: i32,
    chained: bool,
}

/// Queued push mediator with chain propagation.
#[derive(Debug, Default)]
pub struct PushSystem {
    queue: Vec<PushRequest>,
}

impl PushSystem {
    /// Creates a push system with an empty request queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests waiting for the next drain.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Enqueues a push for the object, capturing its current push distance.
    ///
    /// Ignored entirely when the object is missing or not pushable.
    pub fn request_push(
        &mut self,
        world: &World,
        id: ObjectId,
        direction: Direction,
        force: f32,
    ) {
        let Some(object) = world.object(id) else {
            return;
        };
        if !object.is_pushable() {
            return;
        }
        self.queue.push(PushRequest {
            id,
            direction,
            force,
            distance: object.push_distance(),
            chained: false,
        });
    }

    /// Drains the queue and executes each request against the world.
    ///
    /// The batch is taken atomically: requests raised while processing —
    /// chain pushes in particular — land in the next batch.
    pub fn process(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        let batch = std::mem::take(&mut self.queue);
        for request in batch {
            self.execute(world, request, out_events);
        }
    }

    fn execute(&mut self, world: &mut World, request: PushRequest, out_events: &mut Vec<Event>) {
        let Some(object) = world.object(request.id) else {
            return;
        };
        if !object.active() {
            return;
        }

        let from = object.cell();
        let target = from.offset(request.direction.dx() * request.distance, 0);

        if world.is_out_of_bounds(target) {
            return;
        }
        if world.object_at(target).is_some_and(GameObject::is_solid) {
            return;
        }
        if !standing_on_ground(world, object) {
            return;
        }
        if object.weight() > MAX_PUSH_WEIGHT {
            return;
        }
        if object.sliding().is_some() {
            return;
        }

        // A non-solid occupant passes validation but still holds the cell.
        if !world.move_object(from, target) {
            return;
        }

        if let Some(object) = world.object_mut(request.id) {
            object.set_just_pushed(true);
        }
        out_events.push(Event::Pushed {
            id: request.id,
            from,
            to: target,
            chained: request.chained,
        });

        self.start_slide_on_ice(world, request.id, target, request.direction);
        self.chain_neighbors(world, request, target);
    }

    /// Ice pushed onto ice keeps going.
    fn start_slide_on_ice(
        &mut self,
        world: &mut World,
        id: ObjectId,
        at: frostfall_core::GridPos,
        direction: Direction,
    ) {
        let on_ice = world
            .object_at(at.below())
            .is_some_and(|below| below.kind() == ObjectKind::IceBlock);
        if !on_ice {
            return;
        }
        if let Some(object) = world.object_mut(id) {
            if object.kind() == ObjectKind::IceBlock {
                let _ = object.start_sliding(direction);
            }
        }
    }

    /// Every pushable orthogonal neighbor of the landing cell receives a
    /// chained request in the same horizontal direction at half force.
    fn chain_neighbors(
        &mut self,
        world: &World,
        request: PushRequest,
        landed_at: frostfall_core::GridPos,
    ) {
        for neighbor_cell in landed_at.orthogonal_neighbors() {
            let Some(neighbor) = world.object_at(neighbor_cell) else {
                continue;
            };
            if neighbor.id() == request.id || !neighbor.is_pushable() {
                continue;
            }
            self.queue.push(PushRequest {
                id: neighbor.id(),
                direction: request.direction,
                force: request.force / 2.0,
                distance: neighbor.push_distance(),
                chained: true,
            });
        }
    }
}

fn standing_on_ground(world: &World, object: &GameObject) -> bool {
    let cell = object.cell();
    if cell.y() == 0 {
        return true;
    }
    world
        .object_at(cell.below())
        .is_some_and(GameObject::can_support_weight)
}
