#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration: the per-tick pipeline and the player action surface.
//!
//! A session owns the world and every simulation system, and runs them in
//! the one order that keeps behavior well-defined: physics settles positions,
//! queued pushes drain, thermal triggers fire against final positions, the
//! rules engine reacts, and the world purge closes the tick. Player actions
//! sit outside the pipeline; each attempts exactly one grid-cell effect and
//! reports success so the caller can count moves.

use std::time::Duration;

use frostfall_core::{Direction, Event, GridPos, ObjectId};
use frostfall_levels::{populate, Level, LevelError};
use frostfall_system_physics::Physics;
use frostfall_system_push::PushSystem;
use frostfall_system_rules::Rules;
use frostfall_system_thermal::Thermal;
use frostfall_world::World;

/// How high the player can hop over an obstacle while moving.
pub const JUMP_HEIGHT: u32 = 1;

/// A running game: world, systems, and progress counters.
#[derive(Debug)]
pub struct Session {
    world: World,
    physics: Physics,
    pushes: PushSystem,
    thermal: Thermal,
    rules: Rules,
    player: Option<ObjectId>,
    moves: u32,
    elapsed: Duration,
}

impl Session {
    /// Builds a session from a level definition.
    pub fn from_level(level: &Level) -> Result<Self, LevelError> {
        let mut world = World::with_dimensions(level.width(), level.height());
        let setup = populate(level, &mut world)?;
        Ok(Self::with_world(world, setup.player))
    }

    /// Builds a session around an already-populated world.
    #[must_use]
    pub fn with_world(world: World, player: Option<ObjectId>) -> Self {
        Self {
            world,
            physics: Physics::new(),
            pushes: PushSystem::new(),
            thermal: Thermal::new(),
            rules: Rules::new(),
            player,
            moves: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Read-only access to the world for rendering and assertions.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for adapters that stage custom scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player object, when the level placed one.
    #[must_use]
    pub const fn player(&self) -> Option<ObjectId> {
        self.player
    }

    /// Successful player actions so far.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Simulated time elapsed across all ticks.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the level's win condition has latched.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.rules.is_complete()
    }

    /// Advances the simulation by one frame's worth of real time.
    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.physics.update(&mut self.world, dt, out_events);
        self.pushes.process(&mut self.world, out_events);
        self.thermal.update(&mut self.world, out_events);
        self.rules.update(&mut self.world, out_events);
        self.world.update(dt, out_events);
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Attempts one cell of leftward movement.
    pub fn move_left(&mut self) -> bool {
        self.attempt_move(Direction::Left)
    }

    /// Attempts one cell of rightward movement.
    pub fn move_right(&mut self) -> bool {
        self.attempt_move(Direction::Right)
    }

    fn attempt_move(&mut self, direction: Direction) -> bool {
        let Some(player_id) = self.player else {
            return false;
        };
        let Some(player) = self.world.object(player_id) else {
            return false;
        };
        if !player.active() || !player.move_ready() {
            return false;
        }
        let from = player.cell();
        let jump_ready = player.jump_ready();

        let target = from.offset(direction.dx(), 0);
        if self.world.is_out_of_bounds(target) {
            return false;
        }

        let occupant = self.world.object_at(target).map(|object| {
            (
                object.id(),
                object.is_pushable(),
                object.is_solid(),
                object.height(),
            )
        });

        match occupant {
            None => {
                if !self.world.move_object(from, target) {
                    return false;
                }
                self.note_action(player_id, false);
                true
            }
            Some((occupant_id, true, _, _)) => {
                // Walking into a pushable object pushes it instead; the
                // displacement resolves on the next tick's drain.
                self.pushes
                    .request_push(&self.world, occupant_id, direction, 1.0);
                self.note_action(player_id, false);
                true
            }
            Some((_, false, true, height)) => {
                self.try_hop_over(player_id, from, target, height, jump_ready)
            }
            Some(_) => false,
        }
    }

    /// Moving into a low solid obstacle hops on top of it.
    fn try_hop_over(
        &mut self,
        player_id: ObjectId,
        from: GridPos,
        target: GridPos,
        obstacle_height: u32,
        jump_ready: bool,
    ) -> bool {
        if obstacle_height > JUMP_HEIGHT || !jump_ready {
            return false;
        }
        let landing = target.above();
        if self.world.is_out_of_bounds(landing) || self.world.object_at(landing).is_some() {
            return false;
        }
        if !self.world.move_object(from, landing) {
            return false;
        }
        self.note_action(player_id, true);
        true
    }

    /// Attempts to jump one cell straight up.
    pub fn jump(&mut self) -> bool {
        let Some(player_id) = self.player else {
            return false;
        };
        let Some(player) = self.world.object(player_id) else {
            return false;
        };
        if !player.active() || !player.jump_ready() {
            return false;
        }
        let from = player.cell();

        let target = from.above();
        if self.world.is_out_of_bounds(target) || self.world.object_at(target).is_some() {
            return false;
        }
        if !self.world.move_object(from, target) {
            return false;
        }
        self.note_action(player_id, true);
        true
    }

    /// Attempts to create (or toggle away) an ice block below-left.
    pub fn create_ice_left(&mut self) -> bool {
        self.create_ice(Direction::Left)
    }

    /// Attempts to create (or toggle away) an ice block below-right.
    pub fn create_ice_right(&mut self) -> bool {
        self.create_ice(Direction::Right)
    }

    fn create_ice(&mut self, direction: Direction) -> bool {
        let Some(player_id) = self.player else {
            return false;
        };
        let Some(player) = self.world.object(player_id) else {
            return false;
        };
        if !player.active() || !player.ice_ready() {
            return false;
        }
        let target = player.cell().offset(direction.dx(), -1);
        if self.world.is_out_of_bounds(target) {
            return false;
        }

        let existing_ice = self
            .world
            .object_at(target)
            .map(|object| object.kind() == frostfall_core::ObjectKind::IceBlock);

        match existing_ice {
            // Creating onto an existing block removes it instead.
            Some(true) => {
                let _ = self.world.remove_object(target);
                self.note_ice(player_id);
                true
            }
            Some(false) => false,
            None => {
                if self
                    .thermal
                    .create_ice_block(&mut self.world, target)
                    .is_none()
                {
                    return false;
                }
                self.note_ice(player_id);
                true
            }
        }
    }

    fn note_action(&mut self, player_id: ObjectId, jumped: bool) {
        if let Some(player) = self.world.object_mut(player_id) {
            if jumped {
                player.note_jump();
            } else {
                player.note_move();
            }
        }
        self.moves = self.moves.saturating_add(1);
    }

    fn note_ice(&mut self, player_id: ObjectId) {
        if let Some(player) = self.world.object_mut(player_id) {
            player.note_ice_used();
        }
        self.moves = self.moves.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostfall_core::ObjectKind;
    use frostfall_world::{GameObject, MOVE_COOLDOWN};

    fn floored_session() -> Session {
        let mut world = World::new();
        for x in 0..20 {
            assert!(world
                .add_object(GameObject::wall(), GridPos::new(x, 0))
                .is_some());
        }
        let player = world
            .add_object(GameObject::player(), GridPos::new(5, 1))
            .expect("player placed");
        Session::with_world(world, Some(player))
    }

    #[test]
    fn movement_succeeds_once_per_cooldown_window() {
        let mut session = floored_session();
        let player = session.player().expect("player");

        assert!(session.move_right());
        assert_eq!(
            session.world().object(player).expect("player").cell(),
            GridPos::new(6, 1)
        );
        assert_eq!(session.moves(), 1);

        assert!(!session.move_right(), "cooldown gates the second move");
        assert_eq!(session.moves(), 1);

        let mut events = Vec::new();
        session.tick(MOVE_COOLDOWN, &mut events);
        assert!(session.move_right());
        assert_eq!(session.moves(), 2);
    }

    #[test]
    fn moving_into_a_wall_hops_on_top() {
        let mut session = floored_session();
        let player = session.player().expect("player");
        assert!(session
            .world_mut()
            .add_object(GameObject::wall(), GridPos::new(6, 1))
            .is_some());

        assert!(session.move_right());
        assert_eq!(
            session.world().object(player).expect("player").cell(),
            GridPos::new(6, 2),
            "a one-high obstacle is hopped over"
        );
    }

    #[test]
    fn moving_into_a_stone_requests_a_push() {
        let mut session = floored_session();
        let player = session.player().expect("player");
        let stone = session
            .world_mut()
            .add_object(GameObject::stone(), GridPos::new(6, 1))
            .expect("stone placed");

        assert!(session.move_right());
        assert_eq!(
            session.world().object(player).expect("player").cell(),
            GridPos::new(5, 1),
            "the player stays put; the stone takes the displacement"
        );
        assert_eq!(
            session.world().object(stone).expect("stone").cell(),
            GridPos::new(6, 1),
            "the push waits for the next tick"
        );

        let mut events = Vec::new();
        session.tick(Duration::from_millis(20), &mut events);
        assert_eq!(
            session.world().object(stone).expect("stone").cell(),
            GridPos::new(7, 1)
        );
    }

    #[test]
    fn jump_rises_one_cell() {
        let mut session = floored_session();
        let player = session.player().expect("player");

        assert!(session.jump());
        assert_eq!(
            session.world().object(player).expect("player").cell(),
            GridPos::new(5, 2)
        );
        assert!(!session.jump(), "jump cooldown applies");
    }

    #[test]
    fn ice_creation_toggles_below_the_player() {
        let mut world = World::new();
        for x in 0..20 {
            assert!(world
                .add_object(GameObject::wall(), GridPos::new(x, 0))
                .is_some());
        }
        let player = world
            .add_object(GameObject::player(), GridPos::new(5, 2))
            .expect("player placed");
        let mut session = Session::with_world(world, Some(player));
        let mut events = Vec::new();

        assert!(session.create_ice_right());
        let target = GridPos::new(6, 1);
        assert_eq!(
            session
                .world()
                .object_at(target)
                .expect("ice created")
                .kind(),
            ObjectKind::IceBlock
        );

        session.tick(Duration::from_millis(150), &mut events);
        assert!(session.create_ice_right(), "second use removes the block");
        assert!(session.world().object_at(target).is_none());
    }

    #[test]
    fn sessions_without_a_player_refuse_actions() {
        let mut session = Session::with_world(World::new(), None);
        assert!(!session.move_left());
        assert!(!session.jump());
        assert!(!session.create_ice_left());
        assert_eq!(session.moves(), 0);
    }
}
