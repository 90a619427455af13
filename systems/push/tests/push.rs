use frostfall_core::{Attributes, Direction, Event, GridPos};
use frostfall_system_push::{PushSystem, MAX_PUSH_WEIGHT};
use frostfall_world::{GameObject, World};

fn floored_world() -> World {
    let mut world = World::new();
    for x in 0..20 {
        assert!(world
            .add_object(GameObject::wall(), GridPos::new(x, 0))
            .is_some());
    }
    world
}

#[test]
fn the_weight_ceiling_is_absolute() {
    let mut world = floored_world();
    let heavy = GameObject::stone().with_attributes(Attributes {
        pushable: true,
        weight: MAX_PUSH_WEIGHT + 1,
        ..Attributes::default()
    });
    let id = world.add_object(heavy, GridPos::new(5, 1)).expect("placed");

    let mut pushes = PushSystem::new();
    let mut events = Vec::new();
    pushes.request_push(&world, id, Direction::Right, 10.0);
    pushes.process(&mut world, &mut events);

    assert_eq!(
        world.object(id).expect("heavy").cell(),
        GridPos::new(5, 1),
        "weight above the ceiling never moves, even into an empty cell"
    );
    assert!(events.is_empty());
}

#[test]
fn weight_at_the_ceiling_still_moves() {
    let mut world = floored_world();
    let heavy = GameObject::stone().with_attributes(Attributes {
        pushable: true,
        weight: MAX_PUSH_WEIGHT,
        ..Attributes::default()
    });
    let id = world.add_object(heavy, GridPos::new(5, 1)).expect("placed");

    let mut pushes = PushSystem::new();
    let mut events = Vec::new();
    pushes.request_push(&world, id, Direction::Right, 1.0);
    pushes.process(&mut world, &mut events);

    assert_eq!(world.object(id).expect("heavy").cell(), GridPos::new(6, 1));
}

#[test]
fn push_distance_is_captured_at_request_time() {
    let mut world = floored_world();
    let far = GameObject::stone().with_attributes(Attributes {
        pushable: true,
        weight: 3,
        push_distance: 2,
        ..Attributes::default()
    });
    let id = world.add_object(far, GridPos::new(5, 1)).expect("placed");

    let mut pushes = PushSystem::new();
    let mut events = Vec::new();
    pushes.request_push(&world, id, Direction::Right, 1.0);
    pushes.process(&mut world, &mut events);

    assert_eq!(world.object(id).expect("far").cell(), GridPos::new(7, 1));
}

#[test]
fn a_chain_propagates_one_link_per_drain() {
    let mut world = floored_world();
    let first = world
        .add_object(GameObject::ice_block(), GridPos::new(4, 1))
        .expect("placed");
    let second = world
        .add_object(GameObject::ice_block(), GridPos::new(6, 1))
        .expect("placed");
    let third = world
        .add_object(GameObject::ice_block(), GridPos::new(8, 1))
        .expect("placed");

    let mut pushes = PushSystem::new();
    let mut events = Vec::new();

    pushes.request_push(&world, first, Direction::Right, 1.0);
    pushes.process(&mut world, &mut events);
    assert_eq!(world.object(first).expect("first").cell(), GridPos::new(5, 1));
    assert_eq!(world.object(second).expect("second").cell(), GridPos::new(6, 1));

    pushes.process(&mut world, &mut events);
    assert_eq!(world.object(second).expect("second").cell(), GridPos::new(7, 1));
    assert_eq!(world.object(third).expect("third").cell(), GridPos::new(8, 1));

    pushes.process(&mut world, &mut events);
    assert_eq!(world.object(third).expect("third").cell(), GridPos::new(9, 1));

    let chained: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::Pushed { chained: true, .. }))
        .collect();
    assert_eq!(chained.len(), 2, "both follow-on links were chain pushes");
}

#[test]
fn pushing_into_a_non_solid_occupant_is_validated_but_blocked_by_the_grid() {
    let mut world = floored_world();
    let stone = world
        .add_object(GameObject::stone(), GridPos::new(5, 1))
        .expect("placed");
    assert!(world
        .add_object(GameObject::portal(), GridPos::new(6, 1))
        .is_some());

    let mut pushes = PushSystem::new();
    let mut events = Vec::new();
    pushes.request_push(&world, stone, Direction::Right, 1.0);
    pushes.process(&mut world, &mut events);

    assert_eq!(
        world.object(stone).expect("stone").cell(),
        GridPos::new(5, 1),
        "the cell-occupancy invariant still refuses the move"
    );
    assert!(events.is_empty());
}
