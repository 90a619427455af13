#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Frostfall engine.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the simulation systems, and adapters: object identities, grid coordinates,
//! the fixed attribute set every object carries, presentation math, and the
//! [`Event`] values systems broadcast so that adapters and tests can observe
//! simulation transitions deterministically.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Frostfall.";

/// Default number of columns in a world grid.
pub const DEFAULT_GRID_WIDTH: i32 = 20;

/// Default number of rows in a world grid.
pub const DEFAULT_GRID_HEIGHT: i32 = 15;

/// Unique identifier assigned to a world object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as signed column and row indices.
///
/// Row zero is the bottom of the world; `y` grows upward. Signed components
/// keep neighbor arithmetic total — out-of-range positions are rejected by
/// the world's bounds check rather than by coordinate construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    x: i32,
    y: i32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell, counted from the bottom.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position displaced by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Cell directly above this one.
    #[must_use]
    pub const fn above(self) -> Self {
        self.offset(0, 1)
    }

    /// Cell directly below this one.
    #[must_use]
    pub const fn below(self) -> Self {
        self.offset(0, -1)
    }

    /// Cell directly to the left of this one.
    #[must_use]
    pub const fn left(self) -> Self {
        self.offset(-1, 0)
    }

    /// Cell directly to the right of this one.
    #[must_use]
    pub const fn right(self) -> Self {
        self.offset(1, 0)
    }

    /// The four orthogonal neighbors in deterministic order.
    #[must_use]
    pub const fn orthogonal_neighbors(self) -> [Self; 4] {
        [self.above(), self.right(), self.left(), self.below()]
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Horizontal movement directions available to pushes and the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Signed column delta of a single step in this direction.
    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Closed set of object kinds inhabiting the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// The player character.
    Player,
    /// Immovable structural wall.
    Wall,
    /// Heavy pushable stone.
    Stone,
    /// Pushable, meltable ice block.
    IceBlock,
    /// Flame that must be extinguished.
    Flame,
    /// Heat-sensitive pot, either cold or hot.
    Pot,
    /// One half of a paired teleporter.
    Portal,
}

impl ObjectKind {
    /// Reports whether objects of this kind may travel through portals.
    #[must_use]
    pub const fn teleport_eligible(self) -> bool {
        matches!(
            self,
            Self::Player | Self::IceBlock | Self::Stone | Self::Pot
        )
    }
}

/// Fixed physical attribute set carried by every object.
///
/// Defaults describe an ordinary solid block; kind constructors override the
/// fields they care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Whether the object blocks movement into its cell.
    pub solid: bool,
    /// Whether the object accepts push requests.
    pub pushable: bool,
    /// Whether `destroy` is permitted to remove the object.
    pub fragile: bool,
    /// Whether objects above rest on this one instead of falling.
    pub supports_weight: bool,
    /// Whether gravity leaves the object in place.
    pub static_body: bool,
    /// Whether adjacent flame destroys the object.
    pub flammable: bool,
    /// Weight used by the crush and push-ceiling rules.
    pub weight: u32,
    /// How many cells a single push displaces the object.
    pub push_distance: i32,
    /// Obstacle height used by the player's hop-over check.
    pub height: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            solid: true,
            pushable: false,
            fragile: false,
            supports_weight: true,
            static_body: false,
            flammable: false,
            weight: 1,
            push_distance: 1,
            height: 1,
        }
    }
}

/// Display color assigned to an object kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Immutable 2D vector used for fractional presentation offsets.
///
/// Grid coordinates stay integral ([`GridPos`]); `Vec2` only carries derived
/// animation values such as the player's jump arc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    x: f32,
    y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector from components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the vector scaled by the provided factor.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the unit vector pointing the same way, or zero for zero input.
    #[must_use]
    pub fn normalized(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            Self::ZERO
        } else {
            self.scale(1.0 / length)
        }
    }

    /// Linear interpolation between `self` and `other` at parameter `t`.
    #[must_use]
    pub fn lerp(self, other: Vec2, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Events broadcast by the world and systems while a tick settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// An object fell one cell under gravity.
    Fell {
        /// Object that fell.
        id: ObjectId,
        /// Cell the object occupied before falling.
        from: GridPos,
        /// Cell the object occupies after the fall.
        to: GridPos,
    },
    /// A fragile object was crushed by a heavier one landing on it.
    Crushed {
        /// Object that was crushed.
        id: ObjectId,
        /// Object whose weight caused the crush.
        by: ObjectId,
    },
    /// A sliding ice block advanced one cell.
    Slid {
        /// Object that slid.
        id: ObjectId,
        /// Cell occupied before the slide step.
        from: GridPos,
        /// Cell occupied after the slide step.
        to: GridPos,
    },
    /// A push request succeeded and displaced an object.
    Pushed {
        /// Object that was displaced.
        id: ObjectId,
        /// Cell occupied before the push.
        from: GridPos,
        /// Cell occupied after the push.
        to: GridPos,
        /// Whether the push propagated from a neighboring displacement.
        chained: bool,
    },
    /// An ice block began its irreversible melt countdown.
    MeltStarted {
        /// Ice block that started melting.
        id: ObjectId,
    },
    /// A cold pot began accumulating heat.
    HeatingStarted {
        /// Pot that started heating.
        id: ObjectId,
    },
    /// A heating pot crossed the heat threshold and became hot.
    PotHeated {
        /// Pot that became hot.
        id: ObjectId,
    },
    /// A hot pot was cooled back to cold.
    PotCooled {
        /// Pot that cooled.
        id: ObjectId,
    },
    /// A flame was extinguished by a cold object.
    FlameExtinguished {
        /// Flame that went out.
        id: ObjectId,
        /// Object that extinguished it.
        by: ObjectId,
    },
    /// A flammable object was consumed by an adjacent flame.
    Burned {
        /// Object that burned away.
        id: ObjectId,
        /// Flame responsible.
        by: ObjectId,
    },
    /// An object traveled through a portal pair.
    Teleported {
        /// Object that was teleported.
        id: ObjectId,
        /// Cell occupied before entering the portal.
        from: GridPos,
        /// Arrival cell beside the exit portal.
        to: GridPos,
    },
    /// An inactive object was purged from the world.
    Destroyed {
        /// Object that was removed.
        id: ObjectId,
        /// Kind of the removed object.
        kind: ObjectKind,
    },
    /// The last flame left the world; the level is complete.
    AllFlamesExtinguished,
}

/// Immutable representation of a single object's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectSnapshot {
    /// Unique identifier assigned to the object.
    pub id: ObjectId,
    /// Kind of the object.
    pub kind: ObjectKind,
    /// Grid cell currently occupied by the object.
    pub cell: GridPos,
    /// Whether the object blocks movement.
    pub solid: bool,
    /// Whether the object accepts pushes.
    pub pushable: bool,
    /// Whether the object can be destroyed.
    pub fragile: bool,
    /// Whether adjacent flame destroys the object.
    pub flammable: bool,
    /// Weight used by crush and push rules.
    pub weight: u32,
    /// Whether the object fell during the current physics step.
    pub falling: bool,
    /// Whether a pot is currently hot (false for every other kind).
    pub hot: bool,
    /// Whether an ice block is currently melting (false for other kinds).
    pub melting: bool,
    /// Whether a portal has a live pair and zero cooldown (false otherwise).
    pub portal_ready: bool,
    /// Fractional presentation offset derived from animation timers.
    pub render_offset: Vec2,
}

/// Read-only view over all objects, ordered deterministically by id.
#[derive(Clone, Debug, Default)]
pub struct ObjectView {
    snapshots: Vec<ObjectSnapshot>,
}

impl ObjectView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ObjectSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ObjectSnapshot> {
        self.snapshots
    }
}
