//! Built-in level catalog.

use crate::{Difficulty, Level};

fn rows(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|row| (*row).to_owned()).collect()
}

/// The levels shipped with the game, tutorial first.
#[must_use]
pub fn builtin_catalog() -> Vec<Level> {
    vec![
        first_steps(),
        cold_snap(),
        ice_bridge(),
        stone_pusher(),
        portal_crossing(),
    ]
}

fn first_steps() -> Level {
    Level::new(
        "first_steps",
        "First Steps",
        rows(&[
            "..........",
            "..........",
            "P......F..",
            "##########",
        ]),
    )
    .with_description("Walk right and smother the flame with ice.")
    .with_difficulty(Difficulty::Tutorial)
    .with_optimal(8, 15.0)
}

fn cold_snap() -> Level {
    Level::new(
        "cold_snap",
        "Cold Snap",
        rows(&[
            "..........",
            "P.........",
            "###....###",
            "......F...",
        ]),
    )
    .with_description("Drop ice into the gap to reach the flame below.")
    .with_difficulty(Difficulty::Tutorial)
    .with_optimal(6, 12.0)
}

fn ice_bridge() -> Level {
    Level::new(
        "ice_bridge",
        "Ice Bridge",
        rows(&[
            "............",
            "............",
            "..P.....F...",
            "###.....####",
            "############",
        ]),
    )
    .with_description("Bridge the chasm with ice blocks to reach the flame.")
    .with_difficulty(Difficulty::Easy)
    .with_optimal(10, 25.0)
}

fn stone_pusher() -> Level {
    Level::new(
        "stone_pusher",
        "Stone Pusher",
        rows(&[
            "..............",
            "..............",
            "P..S....F.....",
            "##############",
        ]),
    )
    .with_description("Push the stone aside, then freeze out the flame.")
    .with_difficulty(Difficulty::Easy)
    .with_optimal(15, 35.0)
}

fn portal_crossing() -> Level {
    Level::new(
        "portal_crossing",
        "Portal Crossing",
        rows(&[
            "...........F..",
            "..........####",
            "..............",
            "P1..........1.",
            "##############",
        ]),
    )
    .with_description("Step through the portal and climb to the high flame.")
    .with_difficulty(Difficulty::Medium)
    .with_optimal(20, 60.0)
}
