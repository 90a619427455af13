//! Object model: per-kind state machines and capability queries.

use std::time::Duration;

use frostfall_core::{Attributes, Direction, Event, GridPos, ObjectId, ObjectKind, Rgb, Vec2};

/// Simulated time a heating pot needs to become hot.
pub const HEAT_DURATION: Duration = Duration::from_secs(2);

/// Simulated time a melting ice block survives before destruction.
pub const MELT_DURATION: Duration = Duration::from_secs(3);

/// Cooldown both portals of a pair enter after a teleport.
pub const PORTAL_COOLDOWN: Duration = Duration::from_secs(1);

/// Minimum simulated time between successive player moves.
pub const MOVE_COOLDOWN: Duration = Duration::from_millis(200);

/// Minimum simulated time between successive player jumps.
pub const JUMP_COOLDOWN: Duration = Duration::from_millis(300);

/// Minimum simulated time between successive ice creations or removals.
pub const ICE_COOLDOWN: Duration = Duration::from_millis(100);

/// Duration of the player's jump presentation arc.
pub const JUMP_ANIMATION: Duration = Duration::from_millis(300);

const FLICKER_RATE: f32 = 8.0;
const JUMP_ARC_HEIGHT: f32 = 0.45;

/// A single stateful object inhabiting the world grid.
///
/// Objects carry a fixed [`Attributes`] set plus kind-specific behavior
/// state. Position changes never happen here — they flow through the world's
/// placement API so the grid and the object's stored cell stay in agreement.
#[derive(Clone, Debug)]
pub struct GameObject {
    pub(crate) id: ObjectId,
    pub(crate) cell: GridPos,
    active: bool,
    attributes: Attributes,
    falling: bool,
    just_pushed: bool,
    behavior: Behavior,
}

#[derive(Clone, Debug)]
enum Behavior {
    Player(PlayerState),
    Wall,
    Stone,
    IceBlock(IceState),
    Flame(FlameState),
    Pot(PotState),
    Portal(PortalState),
}

#[derive(Clone, Debug, Default)]
struct PlayerState {
    move_cooldown: Duration,
    jump_cooldown: Duration,
    ice_cooldown: Duration,
    jump_animation: Duration,
}

#[derive(Clone, Debug, Default)]
struct IceState {
    melting: bool,
    melt_elapsed: Duration,
    sliding: Option<Direction>,
}

#[derive(Clone, Debug, Default)]
struct FlameState {
    phase: f32,
}

#[derive(Clone, Debug)]
struct PotState {
    hot: bool,
    heating: bool,
    heat_elapsed: Duration,
}

#[derive(Clone, Debug, Default)]
struct PortalState {
    pair: Option<ObjectId>,
    cooldown: Duration,
}

impl GameObject {
    fn with_behavior(attributes: Attributes, behavior: Behavior) -> Self {
        Self {
            id: ObjectId::new(0),
            cell: GridPos::new(0, 0),
            active: true,
            attributes,
            falling: false,
            just_pushed: false,
            behavior,
        }
    }

    /// Creates the player character.
    #[must_use]
    pub fn player() -> Self {
        Self::with_behavior(
            Attributes {
                solid: false,
                static_body: true,
                ..Attributes::default()
            },
            Behavior::Player(PlayerState::default()),
        )
    }

    /// Creates an immovable wall segment.
    #[must_use]
    pub fn wall() -> Self {
        Self::with_behavior(
            Attributes {
                static_body: true,
                weight: 999,
                ..Attributes::default()
            },
            Behavior::Wall,
        )
    }

    /// Creates a heavy pushable stone.
    #[must_use]
    pub fn stone() -> Self {
        Self::with_behavior(
            Attributes {
                pushable: true,
                weight: 3,
                ..Attributes::default()
            },
            Behavior::Stone,
        )
    }

    /// Creates a pushable, meltable ice block.
    #[must_use]
    pub fn ice_block() -> Self {
        Self::with_behavior(
            Attributes {
                pushable: true,
                fragile: true,
                ..Attributes::default()
            },
            Behavior::IceBlock(IceState::default()),
        )
    }

    /// Creates a flame.
    #[must_use]
    pub fn flame() -> Self {
        Self::with_behavior(
            Attributes {
                fragile: true,
                static_body: true,
                weight: 0,
                ..Attributes::default()
            },
            Behavior::Flame(FlameState::default()),
        )
    }

    /// Creates a pot in the requested temperature state.
    #[must_use]
    pub fn pot(hot: bool) -> Self {
        Self::with_behavior(
            Attributes {
                static_body: true,
                weight: 2,
                ..Attributes::default()
            },
            Behavior::Pot(PotState {
                hot,
                heating: false,
                heat_elapsed: Duration::ZERO,
            }),
        )
    }

    /// Creates one half of a portal pair; pairing happens at placement.
    #[must_use]
    pub fn portal() -> Self {
        Self::with_behavior(
            Attributes {
                solid: false,
                supports_weight: false,
                static_body: true,
                weight: 0,
                ..Attributes::default()
            },
            Behavior::Portal(PortalState::default()),
        )
    }

    /// Replaces the object's attribute set, for level-authored overrides.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Unique identifier assigned by the world at placement.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Grid cell the object currently occupies.
    #[must_use]
    pub const fn cell(&self) -> GridPos {
        self.cell
    }

    /// Liveness flag; inactive objects are purged at the end of the tick.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Kind of the object.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self.behavior {
            Behavior::Player(_) => ObjectKind::Player,
            Behavior::Wall => ObjectKind::Wall,
            Behavior::Stone => ObjectKind::Stone,
            Behavior::IceBlock(_) => ObjectKind::IceBlock,
            Behavior::Flame(_) => ObjectKind::Flame,
            Behavior::Pot(_) => ObjectKind::Pot,
            Behavior::Portal(_) => ObjectKind::Portal,
        }
    }

    /// Physical attribute set of the object.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Whether the object blocks movement into its cell.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.attributes.solid
    }

    /// Whether the object accepts push requests.
    #[must_use]
    pub const fn is_pushable(&self) -> bool {
        self.attributes.pushable
    }

    /// Whether `destroy` is permitted to remove the object.
    #[must_use]
    pub const fn is_fragile(&self) -> bool {
        self.attributes.fragile
    }

    /// Whether adjacent flame destroys the object.
    #[must_use]
    pub const fn is_flammable(&self) -> bool {
        self.attributes.flammable
    }

    /// Whether gravity leaves the object in place.
    #[must_use]
    pub const fn is_static_body(&self) -> bool {
        self.attributes.static_body
    }

    /// Whether objects above rest on this one instead of falling.
    ///
    /// A melting ice block is no longer firm and stops carrying weight.
    #[must_use]
    pub fn can_support_weight(&self) -> bool {
        self.attributes.supports_weight && self.is_firm()
    }

    /// Weight used by the crush and push-ceiling rules.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.attributes.weight
    }

    /// How many cells a single push displaces the object.
    #[must_use]
    pub const fn push_distance(&self) -> i32 {
        self.attributes.push_distance
    }

    /// Obstacle height used by the player's hop-over check.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.attributes.height
    }

    /// Whether the object is stable rather than transitioning to destruction.
    #[must_use]
    pub fn is_firm(&self) -> bool {
        match &self.behavior {
            Behavior::IceBlock(state) => !state.melting,
            _ => true,
        }
    }

    /// Destroys the object if it is fragile; non-fragile objects refuse.
    pub fn destroy(&mut self) -> bool {
        if self.attributes.fragile && self.active {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Marks the object inactive, bypassing the fragility check.
    ///
    /// Reserved for crush and cleanup paths that remove regardless of kind.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Whether the object fell during the current physics step.
    #[must_use]
    pub const fn falling(&self) -> bool {
        self.falling
    }

    /// Records or clears the falling flag; maintained by the physics system.
    pub fn set_falling(&mut self, falling: bool) {
        self.falling = falling;
    }

    /// Whether the object was displaced by a push this physics step.
    #[must_use]
    pub const fn just_pushed(&self) -> bool {
        self.just_pushed
    }

    /// Records or clears the just-pushed flag; cleared at the start of every
    /// fixed physics step.
    pub fn set_just_pushed(&mut self, just_pushed: bool) {
        self.just_pushed = just_pushed;
    }

    /// Display color for the object's current state.
    #[must_use]
    pub fn color(&self) -> Rgb {
        match &self.behavior {
            Behavior::Player(_) => Rgb::from_rgb(0x3a, 0x86, 0xff),
            Behavior::Wall => Rgb::from_rgb(0x6c, 0x75, 0x7d),
            Behavior::Stone => Rgb::from_rgb(0x8d, 0x99, 0xae),
            Behavior::IceBlock(_) => Rgb::from_rgb(0xa8, 0xda, 0xdc),
            Behavior::Flame(_) => Rgb::from_rgb(0xe6, 0x39, 0x46),
            Behavior::Pot(state) => {
                if state.hot {
                    Rgb::from_rgb(0xf7, 0x72, 0x2f)
                } else {
                    Rgb::from_rgb(0x45, 0x7b, 0x9d)
                }
            }
            Behavior::Portal(_) => Rgb::from_rgb(0x9b, 0x5d, 0xe5),
        }
    }

    /// Whether a pot is currently hot; false for every other kind.
    #[must_use]
    pub fn is_hot(&self) -> bool {
        matches!(&self.behavior, Behavior::Pot(state) if state.hot)
    }

    /// Starts a cold pot heating. Returns true when heating newly began.
    pub fn begin_heating(&mut self) -> bool {
        if let Behavior::Pot(state) = &mut self.behavior {
            if !state.hot && !state.heating {
                state.heating = true;
                state.heat_elapsed = Duration::ZERO;
                return true;
            }
        }
        false
    }

    /// Cools a hot pot back to cold. Returns true when the pot was hot.
    pub fn cool_down(&mut self) -> bool {
        if let Behavior::Pot(state) = &mut self.behavior {
            if state.hot {
                state.hot = false;
                state.heating = false;
                state.heat_elapsed = Duration::ZERO;
                return true;
            }
        }
        false
    }

    /// Fraction of the heat threshold a pot has accumulated, 0..=1.
    #[must_use]
    pub fn heat_progress(&self) -> f32 {
        match &self.behavior {
            Behavior::Pot(state) if state.hot => 1.0,
            Behavior::Pot(state) if state.heating => {
                (state.heat_elapsed.as_secs_f32() / HEAT_DURATION.as_secs_f32()).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Whether an ice block is currently melting; false for other kinds.
    #[must_use]
    pub fn is_melting(&self) -> bool {
        matches!(&self.behavior, Behavior::IceBlock(state) if state.melting)
    }

    /// Starts an ice block melting. Idempotent: a block already melting keeps
    /// its elapsed countdown. Returns true when melting newly began.
    pub fn start_melting(&mut self) -> bool {
        if let Behavior::IceBlock(state) = &mut self.behavior {
            if !state.melting {
                state.melting = true;
                return true;
            }
        }
        false
    }

    /// Fraction of the melt duration an ice block has accumulated, 0..=1.
    #[must_use]
    pub fn melt_progress(&self) -> f32 {
        match &self.behavior {
            Behavior::IceBlock(state) if state.melting => {
                (state.melt_elapsed.as_secs_f32() / MELT_DURATION.as_secs_f32()).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Direction an ice block is currently sliding, if any.
    #[must_use]
    pub fn sliding(&self) -> Option<Direction> {
        match &self.behavior {
            Behavior::IceBlock(state) => state.sliding,
            _ => None,
        }
    }

    /// Starts an ice block sliding. Returns true when the slide began.
    pub fn start_sliding(&mut self, direction: Direction) -> bool {
        if let Behavior::IceBlock(state) = &mut self.behavior {
            state.sliding = Some(direction);
            true
        } else {
            false
        }
    }

    /// Stops an ice block's slide.
    pub fn stop_sliding(&mut self) {
        if let Behavior::IceBlock(state) = &mut self.behavior {
            state.sliding = None;
        }
    }

    /// Flame brightness in 0..=1, driven by the deterministic flicker phase.
    #[must_use]
    pub fn brightness(&self) -> f32 {
        match &self.behavior {
            Behavior::Flame(state) => 0.7 + 0.3 * (0.5 + 0.5 * state.phase.sin()),
            _ => 1.0,
        }
    }

    /// Identifier of the paired portal, if pairing succeeded at load time.
    #[must_use]
    pub fn portal_pair(&self) -> Option<ObjectId> {
        match &self.behavior {
            Behavior::Portal(state) => state.pair,
            _ => None,
        }
    }

    pub(crate) fn set_portal_pair(&mut self, pair: ObjectId) {
        if let Behavior::Portal(state) = &mut self.behavior {
            state.pair = Some(pair);
        }
    }

    /// Remaining cooldown before the portal may teleport again.
    #[must_use]
    pub fn portal_cooldown(&self) -> Duration {
        match &self.behavior {
            Behavior::Portal(state) => state.cooldown,
            _ => Duration::ZERO,
        }
    }

    /// Fraction of the portal cooldown still pending, 0..=1.
    #[must_use]
    pub fn portal_cooldown_progress(&self) -> f32 {
        match &self.behavior {
            Behavior::Portal(state) => {
                (state.cooldown.as_secs_f32() / PORTAL_COOLDOWN.as_secs_f32()).min(1.0)
            }
            _ => 0.0,
        }
    }

    pub(crate) fn trigger_portal_cooldown(&mut self) {
        if let Behavior::Portal(state) = &mut self.behavior {
            state.cooldown = PORTAL_COOLDOWN;
        }
    }

    /// Whether the player's move cooldown has elapsed.
    #[must_use]
    pub fn move_ready(&self) -> bool {
        match &self.behavior {
            Behavior::Player(state) => state.move_cooldown.is_zero(),
            _ => false,
        }
    }

    /// Whether the player's jump cooldown has elapsed.
    #[must_use]
    pub fn jump_ready(&self) -> bool {
        match &self.behavior {
            Behavior::Player(state) => state.jump_cooldown.is_zero(),
            _ => false,
        }
    }

    /// Whether the player's ice-creation cooldown has elapsed.
    #[must_use]
    pub fn ice_ready(&self) -> bool {
        match &self.behavior {
            Behavior::Player(state) => state.ice_cooldown.is_zero(),
            _ => false,
        }
    }

    /// Restarts the player's move cooldown after a successful move.
    pub fn note_move(&mut self) {
        if let Behavior::Player(state) = &mut self.behavior {
            state.move_cooldown = MOVE_COOLDOWN;
        }
    }

    /// Restarts the player's jump cooldown and presentation arc.
    pub fn note_jump(&mut self) {
        if let Behavior::Player(state) = &mut self.behavior {
            state.jump_cooldown = JUMP_COOLDOWN;
            state.move_cooldown = MOVE_COOLDOWN;
            state.jump_animation = JUMP_ANIMATION;
        }
    }

    /// Restarts the player's ice-creation cooldown.
    pub fn note_ice_used(&mut self) {
        if let Behavior::Player(state) = &mut self.behavior {
            state.ice_cooldown = ICE_COOLDOWN;
        }
    }

    /// Progress of the player's jump presentation arc, 0..=1.
    #[must_use]
    pub fn jump_progress(&self) -> f32 {
        match &self.behavior {
            Behavior::Player(state) if !state.jump_animation.is_zero() => {
                1.0 - state.jump_animation.as_secs_f32() / JUMP_ANIMATION.as_secs_f32()
            }
            _ => 0.0,
        }
    }

    /// Fractional presentation offset derived from animation timers.
    #[must_use]
    pub fn render_offset(&self) -> Vec2 {
        match &self.behavior {
            Behavior::Player(state) if !state.jump_animation.is_zero() => {
                let progress = self.jump_progress();
                let arc = 1.0 - (2.0 * progress - 1.0).abs();
                Vec2::ZERO.lerp(Vec2::new(0.0, JUMP_ARC_HEIGHT), arc)
            }
            _ => Vec2::ZERO,
        }
    }

    /// Advances the object's kind-specific timers by the provided delta.
    ///
    /// Runs exactly once per tick from the world's update pass. Returns an
    /// event when a timer crosses a threshold.
    pub(crate) fn update(&mut self, dt: Duration) -> Option<Event> {
        match &mut self.behavior {
            Behavior::Player(state) => {
                state.move_cooldown = state.move_cooldown.saturating_sub(dt);
                state.jump_cooldown = state.jump_cooldown.saturating_sub(dt);
                state.ice_cooldown = state.ice_cooldown.saturating_sub(dt);
                state.jump_animation = state.jump_animation.saturating_sub(dt);
                None
            }
            Behavior::Flame(state) => {
                state.phase += dt.as_secs_f32() * FLICKER_RATE;
                None
            }
            Behavior::Pot(state) => {
                if state.heating && !state.hot {
                    state.heat_elapsed = state.heat_elapsed.saturating_add(dt);
                    if state.heat_elapsed >= HEAT_DURATION {
                        state.hot = true;
                        state.heating = false;
                        return Some(Event::PotHeated { id: self.id });
                    }
                }
                None
            }
            Behavior::IceBlock(state) => {
                if state.melting && self.active {
                    state.melt_elapsed = state.melt_elapsed.saturating_add(dt);
                    if state.melt_elapsed >= MELT_DURATION {
                        self.active = false;
                    }
                }
                None
            }
            Behavior::Portal(state) => {
                state.cooldown = state.cooldown.saturating_sub(dt);
                None
            }
            Behavior::Wall | Behavior::Stone => None,
        }
    }
}
