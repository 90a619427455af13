#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level model, glyph-row parsing, and the built-in catalog.
//!
//! A level is an ordered list of text rows plus metadata. The first row is
//! the top of the level: row index inverts to world y. Malformed content
//! degrades gracefully — unknown placements and unpairable portal groups are
//! logged and skipped, never fatal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use frostfall_core::{GridPos, ObjectId};
use frostfall_world::{GameObject, World};

mod catalog;

pub use catalog::builtin_catalog;

/// Difficulty tier attached to a level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Guided introduction levels.
    Tutorial,
    /// Levels solvable with one mechanic.
    Easy,
    /// Levels combining mechanics.
    #[default]
    Medium,
    /// Levels demanding full mastery.
    Hard,
}

/// A single level: glyph rows plus authoring metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    difficulty: Difficulty,
    rows: Vec<String>,
    #[serde(default)]
    hints: Vec<String>,
    #[serde(default)]
    optimal_moves: Option<u32>,
    #[serde(default)]
    optimal_time_seconds: Option<f32>,
}

impl Level {
    /// Creates a level from an identifier, display name, and glyph rows.
    #[must_use]
    pub fn new(id: &str, name: &str, rows: Vec<String>) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            description: String::new(),
            author: String::new(),
            difficulty: Difficulty::default(),
            rows,
            hints: Vec::new(),
            optimal_moves: None,
            optimal_time_seconds: None,
        }
    }

    /// Sets the description, builder-style.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Sets the difficulty tier, builder-style.
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the optimal solution metadata, builder-style.
    #[must_use]
    pub const fn with_optimal(mut self, moves: u32, seconds: f32) -> Self {
        self.optimal_moves = Some(moves);
        self.optimal_time_seconds = Some(seconds);
        self
    }

    /// Stable identifier of the level.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name of the level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author-facing description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Difficulty tier.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Glyph rows, top row first.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Hints offered to a stuck player.
    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Reference move count for a clean solution, if recorded.
    #[must_use]
    pub const fn optimal_moves(&self) -> Option<u32> {
        self.optimal_moves
    }

    /// Reference completion time for a clean solution, if recorded.
    #[must_use]
    pub const fn optimal_time_seconds(&self) -> Option<f32> {
        self.optimal_time_seconds
    }

    /// Grid width implied by the widest row.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0) as i32
    }

    /// Grid height implied by the row count.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Parses a level from a JSON document.
    pub fn from_json_str(document: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(document)?;
        if level.rows.is_empty() {
            return Err(LevelError::EmptyGrid);
        }
        Ok(level)
    }
}

/// Errors raised while loading a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level document held no glyph rows.
    #[error("level has no rows")]
    EmptyGrid,
    /// The level document failed to parse.
    #[error("malformed level document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Handles returned after populating a world from a level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LevelSetup {
    /// The player object, when the level placed one.
    pub player: Option<ObjectId>,
    /// Number of portal pairs successfully linked.
    pub portal_pairs: usize,
}

/// Clears the world and instantiates the level's objects into it.
///
/// Glyphs: `P`/`M` player, `W`/`#` wall, `I` ice, `S` stone, `F` flame,
/// `C` cold pot, `H` hot pot, `.` or space empty; any other glyph names a
/// portal group. Groups must hold exactly two cells to pair. Content
/// problems are warned and skipped so a damaged level still loads.
pub fn populate(level: &Level, world: &mut World) -> Result<LevelSetup, LevelError> {
    if level.rows().is_empty() {
        return Err(LevelError::EmptyGrid);
    }

    world.clear();
    let height = level.height();
    let mut setup = LevelSetup::default();
    let mut portal_groups: BTreeMap<char, Vec<GridPos>> = BTreeMap::new();

    for (row_index, row) in level.rows().iter().enumerate() {
        // First text row is the top of the level.
        let y = height - 1 - row_index as i32;
        for (column, glyph) in row.chars().enumerate() {
            let pos = GridPos::new(column as i32, y);
            let object = match glyph {
                '.' | ' ' => continue,
                'P' | 'M' => {
                    if setup.player.is_some() {
                        log::warn!(
                            "level {}: duplicate player at ({}, {}) skipped",
                            level.id(),
                            pos.x(),
                            pos.y()
                        );
                        continue;
                    }
                    GameObject::player()
                }
                'W' | '#' => GameObject::wall(),
                'I' => GameObject::ice_block(),
                'S' => GameObject::stone(),
                'F' => GameObject::flame(),
                'C' => GameObject::pot(false),
                'H' => GameObject::pot(true),
                group => {
                    portal_groups.entry(group).or_default().push(pos);
                    continue;
                }
            };

            let is_player = matches!(glyph, 'P' | 'M');
            match world.add_object(object, pos) {
                Some(id) => {
                    if is_player {
                        setup.player = Some(id);
                    }
                }
                None => log::warn!(
                    "level {}: glyph '{}' at ({}, {}) could not be placed",
                    level.id(),
                    glyph,
                    pos.x(),
                    pos.y()
                ),
            }
        }
    }

    for (glyph, cells) in portal_groups {
        if cells.len() != 2 {
            log::warn!(
                "level {}: portal group '{}' has {} members, dropped",
                level.id(),
                glyph,
                cells.len()
            );
            continue;
        }
        if world.add_portal_pair(cells[0], cells[1]).is_some() {
            setup.portal_pairs += 1;
        } else {
            log::warn!("level {}: portal group '{}' could not be placed", level.id(), glyph);
        }
    }

    Ok(setup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostfall_core::ObjectKind;

    fn rows(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|row| (*row).to_owned()).collect()
    }

    #[test]
    fn rows_invert_to_world_coordinates() {
        let level = Level::new("t", "Test", rows(&["F....", ".....", "P...S"]));
        let mut world = World::with_dimensions(level.width(), level.height());

        let setup = populate(&level, &mut world).expect("loaded");

        let player = setup.player.expect("player placed");
        assert_eq!(world.object(player).expect("player").cell(), GridPos::new(0, 0));
        assert_eq!(
            world
                .objects_of_kind(ObjectKind::Flame)
                .first()
                .expect("flame")
                .cell(),
            GridPos::new(0, 2),
            "the first text row is the top of the level"
        );
        assert_eq!(
            world
                .objects_of_kind(ObjectKind::Stone)
                .first()
                .expect("stone")
                .cell(),
            GridPos::new(4, 0)
        );
    }

    #[test]
    fn every_documented_glyph_maps_to_its_kind() {
        let level = Level::new("t", "Test", rows(&["PWISFCH#M"]));
        let mut world = World::with_dimensions(level.width(), level.height());

        let setup = populate(&level, &mut world).expect("loaded");

        assert_eq!(world.count_of_kind(ObjectKind::Player), 1, "duplicate skipped");
        assert_eq!(world.count_of_kind(ObjectKind::Wall), 2);
        assert_eq!(world.count_of_kind(ObjectKind::IceBlock), 1);
        assert_eq!(world.count_of_kind(ObjectKind::Stone), 1);
        assert_eq!(world.count_of_kind(ObjectKind::Flame), 1);
        assert_eq!(world.count_of_kind(ObjectKind::Pot), 2);
        assert!(setup.player.is_some());
    }

    #[test]
    fn portal_groups_pair_exactly_two_members() {
        let level = Level::new(
            "t",
            "Test",
            rows(&["1...1", "2....", "33.33"]),
        );
        let mut world = World::with_dimensions(level.width(), level.height());

        let setup = populate(&level, &mut world).expect("loaded");

        assert_eq!(setup.portal_pairs, 1, "only the two-member group pairs");
        assert_eq!(world.count_of_kind(ObjectKind::Portal), 2);
        let portals = world.objects_of_kind(ObjectKind::Portal);
        assert!(portals
            .iter()
            .all(|portal| portal.portal_pair().is_some()));
    }

    #[test]
    fn hot_and_cold_pots_load_with_their_temperature()  {
        let level = Level::new("t", "Test", rows(&["C.H"]));
        let mut world = World::with_dimensions(level.width(), level.height());

        let _ = populate(&level, &mut world).expect("loaded");

        assert!(!world
            .object_at(GridPos::new(0, 0))
            .expect("cold pot")
            .is_hot());
        assert!(world
            .object_at(GridPos::new(2, 0))
            .expect("hot pot")
            .is_hot());
    }

    #[test]
    fn empty_levels_are_rejected() {
        let level = Level::new("t", "Test", Vec::new());
        let mut world = World::new();
        assert!(matches!(
            populate(&level, &mut world),
            Err(LevelError::EmptyGrid)
        ));
    }

    #[test]
    fn levels_round_trip_through_json() {
        let level = Level::new("t", "Test", rows(&["P..F", "####"]))
            .with_description("tiny")
            .with_difficulty(Difficulty::Easy)
            .with_optimal(4, 9.5);

        let document = serde_json::to_string(&level).expect("serialize");
        let restored = Level::from_json_str(&document).expect("parse");

        assert_eq!(restored, level);
    }

    #[test]
    fn json_without_rows_is_rejected() {
        let document = r#"{"id":"t","name":"Test","rows":[]}"#;
        assert!(matches!(
            Level::from_json_str(document),
            Err(LevelError::EmptyGrid)
        ));
    }

    #[test]
    fn builtin_catalog_levels_all_load() {
        for level in builtin_catalog() {
            let mut world = World::with_dimensions(level.width(), level.height());
            let setup = populate(&level, &mut world).expect("builtin loads");
            assert!(setup.player.is_some(), "level {} has a player", level.id());
            assert!(
                world.count_of_kind(ObjectKind::Flame) > 0,
                "level {} has something to extinguish",
                level.id()
            );
        }
    }
}
