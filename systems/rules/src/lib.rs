#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Semantic interaction layer: the per-tick pairwise rule dispatch.
//!
//! Runs after physics, pushes, and thermal triggers have settled positions.
//! The scan walks an id-ordered snapshot taken at entry, so objects destroyed
//! mid-pass cannot join new pairs, and ends with a purge so a destroyed
//! object never survives into the next tick's scan. Two objects interact
//! when they share a cell or sit orthogonally adjacent — one cell further
//! than the physics layer's direct-contact test, since thermal and portal
//! effects reach across a gap.

use frostfall_core::{Event, ObjectId, ObjectKind, ObjectSnapshot};
use frostfall_world::{query, GameObject, World};

/// Pairwise interaction dispatcher and win-condition tracker.
#[derive(Debug, Default)]
pub struct Rules {
    complete: bool,
}

impl Rules {
    /// Creates a rules engine with the win condition unmet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the level's win condition has latched.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Re-arms the win condition, used on level (re)load.
    pub fn reset(&mut self) {
        self.complete = false;
    }

    /// Runs every rule family over all interacting pairs, purges objects
    /// destroyed during the pass, then checks the win condition.
    pub fn update(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        let snapshot = query::object_view(world).into_vec();

        for (index, first) in snapshot.iter().enumerate() {
            for second in snapshot.iter().skip(index + 1) {
                if first.cell.manhattan_distance(second.cell) > 1 {
                    continue;
                }
                dispatch(world, first, second, out_events);
                dispatch(world, second, first, out_events);
            }
        }

        world.purge_inactive(out_events);

        if !self.complete && query::flame_count(world) == 0 {
            self.complete = true;
            log::debug!("all flames extinguished");
            out_events.push(Event::AllFlamesExtinguished);
        }
    }
}

/// Applies every rule family with `first` in the acting role.
///
/// Families are not mutually exclusive; each re-checks liveness at apply
/// time because an earlier family may already have destroyed a participant.
fn dispatch(
    world: &mut World,
    first: &ObjectSnapshot,
    second: &ObjectSnapshot,
    out_events: &mut Vec<Event>,
) {
    flame_rules(world, first, second, out_events);
    pot_rules(world, first, second, out_events);
    portal_rule(world, first, second, out_events);
    stone_rule(world, first, second, out_events);
}

/// Flame contact: melt ice, ignite cold pots, burn flammable objects.
fn flame_rules(
    world: &mut World,
    flame: &ObjectSnapshot,
    other: &ObjectSnapshot,
    out_events: &mut Vec<Event>,
) {
    if flame.kind != ObjectKind::Flame || !is_live(world, flame.id) {
        return;
    }

    match other.kind {
        ObjectKind::IceBlock => {
            if !is_live(world, other.id) {
                return;
            }
            // Radiant contact: the ice starts its countdown and the cold
            // snuffs the flame out.
            let started = world
                .object_mut(other.id)
                .is_some_and(GameObject::start_melting);
            if started {
                out_events.push(Event::MeltStarted { id: other.id });
            }
            extinguish(world, flame.id, other.id, out_events);
        }
        ObjectKind::Pot if !other.hot => {
            if !is_live(world, other.id) {
                return;
            }
            let started = world
                .object_mut(other.id)
                .is_some_and(GameObject::begin_heating);
            if started {
                out_events.push(Event::HeatingStarted { id: other.id });
            }
            extinguish(world, flame.id, other.id, out_events);
        }
        _ if other.flammable => {
            if !is_live(world, other.id) {
                return;
            }
            // Fire spreads by destruction only; no new flame appears.
            let burned = world.object_mut(other.id).is_some_and(GameObject::destroy);
            if burned {
                out_events.push(Event::Burned {
                    id: other.id,
                    by: flame.id,
                });
            }
        }
        _ => {}
    }
}

/// Pot contact: hot pots melt ice away and cool; pot pairs exchange heat.
fn pot_rules(
    world: &mut World,
    pot: &ObjectSnapshot,
    other: &ObjectSnapshot,
    out_events: &mut Vec<Event>,
) {
    if pot.kind != ObjectKind::Pot || !is_live(world, pot.id) {
        return;
    }

    match other.kind {
        ObjectKind::IceBlock if pot.hot => {
            if !is_live(world, other.id) {
                return;
            }
            if let Some(ice) = world.object_mut(other.id) {
                let _ = ice.destroy();
            }
            cool(world, pot.id, out_events);
        }
        // Heat always flows from the hot member to the cold one, whichever
        // operand order the scan produced.
        ObjectKind::Pot if pot.hot && !other.hot => {
            if !is_live(world, other.id) {
                return;
            }
            cool(world, pot.id, out_events);
            let started = world
                .object_mut(other.id)
                .is_some_and(GameObject::begin_heating);
            if started {
                out_events.push(Event::HeatingStarted { id: other.id });
            }
        }
        _ => {}
    }
}

/// A ready portal sends an eligible neighbor through; the world's teleport
/// independently re-verifies readiness before anything moves.
fn portal_rule(
    world: &mut World,
    portal: &ObjectSnapshot,
    other: &ObjectSnapshot,
    out_events: &mut Vec<Event>,
) {
    if portal.kind != ObjectKind::Portal || !portal.portal_ready {
        return;
    }
    if !other.kind.teleport_eligible() || !is_live(world, other.id) {
        return;
    }
    let _ = world.teleport_through(other.id, portal.id, out_events);
}

/// A falling stone flattens a lighter fragile neighbor.
fn stone_rule(
    world: &mut World,
    stone: &ObjectSnapshot,
    other: &ObjectSnapshot,
    out_events: &mut Vec<Event>,
) {
    if stone.kind != ObjectKind::Stone || !stone.falling || !is_live(world, stone.id) {
        return;
    }
    if !other.fragile || stone.weight <= other.weight || !is_live(world, other.id) {
        return;
    }

    if let Some(victim) = world.object_mut(other.id) {
        let _ = victim.destroy();
    }
    out_events.push(Event::Crushed {
        id: other.id,
        by: stone.id,
    });
}

fn is_live(world: &World, id: ObjectId) -> bool {
    world.object(id).is_some_and(GameObject::active)
}

fn extinguish(world: &mut World, flame: ObjectId, by: ObjectId, out_events: &mut Vec<Event>) {
    let destroyed = world.object_mut(flame).is_some_and(GameObject::destroy);
    if destroyed {
        out_events.push(Event::FlameExtinguished { id: flame, by });
    }
}

fn cool(world: &mut World, pot: ObjectId, out_events: &mut Vec<Event>) {
    let cooled = world.object_mut(pot).is_some_and(GameObject::cool_down);
    if cooled {
        out_events.push(Event::PotCooled { id: pot });
    }
}
