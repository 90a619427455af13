use frostfall_core::{Event, GridPos, ObjectKind};
use frostfall_system_rules::Rules;
use frostfall_world::{GameObject, World, PORTAL_COOLDOWN};

#[test]
fn portal_round_trip_waits_out_the_cooldown() {
    let mut world = World::new();
    let mut rules = Rules::new();
    assert!(world
        .add_portal_pair(GridPos::new(2, 5), GridPos::new(12, 5))
        .is_some());
    let traveler = world
        .add_object(GameObject::stone(), GridPos::new(2, 6))
        .expect("placed");

    let mut events = Vec::new();
    rules.update(&mut world, &mut events);

    let outbound = world.object(traveler).expect("traveler").cell();
    assert_eq!(outbound, GridPos::new(12, 6), "arrived beside the exit");
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::Teleported { .. }))
            .count(),
        1
    );

    // The traveler now neighbors the exit portal, but both ends are cooling.
    rules.update(&mut world, &mut events);
    assert_eq!(world.object(traveler).expect("traveler").cell(), outbound);

    world.update(PORTAL_COOLDOWN, &mut events);
    rules.update(&mut world, &mut events);

    assert_eq!(
        world.object(traveler).expect("traveler").cell(),
        GridPos::new(2, 6),
        "with cooldowns expired the return trip succeeds"
    );
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::Teleported { .. }))
            .count(),
        2
    );
}

#[test]
fn an_unpaired_portal_is_permanently_inert() {
    let mut world = World::new();
    let mut rules = Rules::new();
    let (entry, exit) = world
        .add_portal_pair(GridPos::new(2, 5), GridPos::new(12, 5))
        .expect("paired");
    let exit_cell = world.object(exit).expect("exit").cell();
    world.object_mut(exit).expect("exit").deactivate();
    let mut events = Vec::new();
    world.purge_inactive(&mut events);
    assert!(world.object_at(exit_cell).is_none());

    let traveler = world
        .add_object(GameObject::stone(), GridPos::new(2, 6))
        .expect("placed");

    rules.update(&mut world, &mut events);

    assert_eq!(
        world.object(traveler).expect("traveler").cell(),
        GridPos::new(2, 6),
        "a portal whose pair died never teleports"
    );
    assert!(world.object(entry).expect("entry").active());
}

#[test]
fn walls_do_not_travel_through_portals() {
    let mut world = World::new();
    let mut rules = Rules::new();
    assert!(world
        .add_portal_pair(GridPos::new(2, 5), GridPos::new(12, 5))
        .is_some());
    let wall = world
        .add_object(GameObject::wall(), GridPos::new(2, 6))
        .expect("placed");

    let mut events = Vec::new();
    rules.update(&mut world, &mut events);

    assert_eq!(world.object(wall).expect("wall").cell(), GridPos::new(2, 6));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::Teleported { .. })));
}

#[test]
fn identical_worlds_produce_identical_event_sequences() {
    let build = || {
        let mut world = World::new();
        assert!(world
            .add_object(GameObject::flame(), GridPos::new(4, 2))
            .is_some());
        assert!(world
            .add_object(GameObject::ice_block(), GridPos::new(5, 2))
            .is_some());
        assert!(world
            .add_object(GameObject::pot(true), GridPos::new(8, 2))
            .is_some());
        assert!(world
            .add_object(GameObject::pot(false), GridPos::new(9, 2))
            .is_some());
        world
    };

    let mut first_world = build();
    let mut second_world = build();
    let mut first_rules = Rules::new();
    let mut second_rules = Rules::new();
    let mut first_events = Vec::new();
    let mut second_events = Vec::new();

    first_rules.update(&mut first_world, &mut first_events);
    second_rules.update(&mut second_world, &mut second_events);

    assert_eq!(first_events, second_events);
    assert_eq!(
        first_world.count_of_kind(ObjectKind::Flame),
        second_world.count_of_kind(ObjectKind::Flame)
    );
}
