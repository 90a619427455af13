use std::time::Duration;

use frostfall_core::{Event, GridPos, ObjectKind};
use frostfall_system_thermal::Thermal;
use frostfall_world::{GameObject, World, MELT_DURATION};

#[test]
fn melt_lifecycle_destroys_exactly_once() {
    let mut world = World::new();
    let mut thermal = Thermal::new();
    assert!(world
        .add_object(GameObject::flame(), GridPos::new(4, 3))
        .is_some());
    let ice = thermal
        .create_ice_block(&mut world, GridPos::new(5, 3))
        .expect("created");

    let mut events = Vec::new();
    thermal.update(&mut world, &mut events);
    assert!(world.object(ice).expect("ice").is_melting());

    // Advance in slices well below the fixed timestep.
    let slice = Duration::from_millis(10);
    let slices = (MELT_DURATION.as_millis() / slice.as_millis()) as usize;

    for _ in 0..slices - 1 {
        world.update(slice, &mut events);
    }
    let survivor = world.object(ice).expect("still present");
    assert!(survivor.active());
    let progress = survivor.melt_progress();
    assert!(
        progress > 0.0 && progress < 1.0,
        "just short of the full duration leaves partial progress, got {progress}"
    );

    world.update(slice, &mut events);
    assert!(world.object(ice).is_none());

    let destroyed: Vec<_> = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::Destroyed {
                    kind: ObjectKind::IceBlock,
                    ..
                }
            )
        })
        .collect();
    assert_eq!(destroyed.len(), 1, "the block melts away exactly once");
}

#[test]
fn melting_never_cancels_when_the_heat_source_disappears() {
    let mut world = World::new();
    let mut thermal = Thermal::new();
    let flame = world
        .add_object(GameObject::flame(), GridPos::new(4, 3))
        .expect("placed");
    let ice = thermal
        .create_ice_block(&mut world, GridPos::new(5, 3))
        .expect("created");

    let mut events = Vec::new();
    thermal.update(&mut world, &mut events);
    assert!(world.object(ice).expect("ice").is_melting());

    world.object_mut(flame).expect("flame").deactivate();
    world.purge_inactive(&mut events);

    world.update(MELT_DURATION, &mut events);
    assert!(
        world.object(ice).is_none(),
        "the countdown runs to destruction without the flame"
    );
}

#[test]
fn created_ice_respects_the_world_dimensions_in_use() {
    let mut world = World::with_dimensions(6, 4);
    let mut thermal = Thermal::new();

    assert!(thermal
        .create_ice_block(&mut world, GridPos::new(5, 3))
        .is_some());
    assert!(
        thermal
            .create_ice_block(&mut world, GridPos::new(10, 3))
            .is_none(),
        "bounds come from the world, not a fixed default"
    );
}
