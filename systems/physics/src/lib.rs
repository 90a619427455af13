#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep physics: gravity, sliding, and positional collision.
//!
//! Real frame time accumulates into a `Duration` backlog that drains in
//! constant steps, so descent speed never depends on frame rate. Each fixed
//! step clears the previous step's push flags, advances sliding ice,
//! applies cell-by-cell gravity with the crush rule, and resolves direct
//! contact between overlapping objects.

use std::time::Duration;

use frostfall_core::{Event, GridPos, ObjectId, ObjectKind};
use frostfall_world::{GameObject, World};

/// Length of one fixed physics step (60 steps per simulated second).
pub const FIXED_STEP: Duration = Duration::from_nanos(16_666_667);

/// Backlog ceiling: beyond this many pending steps the accumulator resets.
pub const MAX_BACKLOG_STEPS: u32 = 10;

/// Fixed-timestep physics engine.
#[derive(Debug, Default)]
pub struct Physics {
    accumulator: Duration,
}

impl Physics {
    /// Creates a new physics engine with an empty time backlog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time waiting to be drained into fixed steps.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Accumulates real time and drains it in fixed steps.
    ///
    /// When the backlog exceeds [`MAX_BACKLOG_STEPS`] steps the accumulator
    /// resets to zero instead of draining — the simulation drops the lost
    /// time rather than stalling to catch up.
    pub fn update(&mut self, world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
        self.accumulator = self.accumulator.saturating_add(dt);

        if self.accumulator > FIXED_STEP * MAX_BACKLOG_STEPS {
            self.accumulator = Duration::ZERO;
            return;
        }

        while self.accumulator >= FIXED_STEP {
            self.accumulator -= FIXED_STEP;
            fixed_step(world, out_events);
        }
    }
}

/// Runs exactly one fixed physics step.
pub fn fixed_step(world: &mut World, out_events: &mut Vec<Event>) {
    clear_push_flags(world);
    advance_sliding(world, out_events);
    apply_gravity(world, out_events);
    resolve_overlaps(world, out_events);
}

/// Push flags live for exactly one fixed step.
fn clear_push_flags(world: &mut World) {
    for id in world.object_ids() {
        if let Some(object) = world.object_mut(id) {
            object.set_just_pushed(false);
        }
    }
}

fn advance_sliding(world: &mut World, out_events: &mut Vec<Event>) {
    for id in world.object_ids() {
        let Some(object) = world.object(id) else {
            continue;
        };
        let Some(direction) = object.sliding() else {
            continue;
        };
        if !object.active() {
            continue;
        }

        let from = object.cell();
        let target = from.offset(direction.dx(), 0);
        if can_slide_to(world, target) && world.move_object(from, target) {
            out_events.push(Event::Slid {
                id,
                from,
                to: target,
            });
        } else if let Some(object) = world.object_mut(id) {
            object.stop_sliding();
        }
    }
}

fn can_slide_to(world: &World, target: GridPos) -> bool {
    if world.is_out_of_bounds(target) || world.object_at(target).is_some() {
        return false;
    }
    // A slide must land on support; otherwise gravity takes over next step.
    target.y() == 0
        || world
            .object_at(target.below())
            .is_some_and(GameObject::can_support_weight)
}

fn apply_gravity(world: &mut World, out_events: &mut Vec<Event>) {
    let mut candidates: Vec<(GridPos, ObjectId)> = world
        .objects()
        .filter(|object| {
            object.active()
                && object.is_solid()
                && !object.is_static_body()
                && object.kind() != ObjectKind::Wall
        })
        .map(|object| (object.cell(), object.id()))
        .collect();
    // Bottom rows settle first so a whole column compacts one cell per step.
    candidates.sort_by_key(|(cell, id)| (cell.y(), cell.x(), *id));

    for (cell, id) in candidates {
        if world.object(id).is_none() {
            continue;
        }

        if cell.y() == 0 {
            settle(world, id);
            continue;
        }

        let below = cell.below();
        let supported = world
            .object_at(below)
            .is_some_and(GameObject::can_support_weight);
        if supported {
            settle(world, id);
            continue;
        }

        if world.move_object(cell, below) {
            if let Some(object) = world.object_mut(id) {
                object.set_falling(true);
            }
            out_events.push(Event::Fell {
                id,
                from: cell,
                to: below,
            });
            land_on_support(world, id, below, out_events);
        } else {
            // Occupied by something that cannot carry weight; rest in place.
            settle(world, id);
        }
    }
}

fn settle(world: &mut World, id: ObjectId) {
    if let Some(object) = world.object_mut(id) {
        object.set_falling(false);
    }
}

/// After a fall, exchange collision responses with the new support and crush
/// a fragile support lighter than the faller.
fn land_on_support(
    world: &mut World,
    faller: ObjectId,
    landed_at: GridPos,
    out_events: &mut Vec<Event>,
) {
    let Some(support) = world.object_at(landed_at.below()).map(GameObject::id) else {
        return;
    };

    world.collide_pair(faller, support, out_events);

    let Some(faller_weight) = world.object(faller).map(GameObject::weight) else {
        return;
    };
    let Some(support_obj) = world.object(support) else {
        return;
    };
    if support_obj.active() && support_obj.is_fragile() && faller_weight > support_obj.weight() {
        if let Some(support_obj) = world.object_mut(support) {
            let _ = support_obj.destroy();
        }
        out_events.push(Event::Crushed {
            id: support,
            by: faller,
        });
    }
}

/// Resolves every distinct pair of objects sharing a cell.
fn resolve_overlaps(world: &mut World, out_events: &mut Vec<Event>) {
    let placed: Vec<(GridPos, ObjectId)> = world
        .objects()
        .filter(|object| object.active())
        .map(|object| (object.cell(), object.id()))
        .collect();

    for (i, (cell_a, id_a)) in placed.iter().enumerate() {
        for (cell_b, id_b) in placed.iter().skip(i + 1) {
            if cell_a == cell_b {
                world.collide_pair(*id_a, *id_b, out_events);
            }
        }
    }
}
