#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter: loads a level, applies a scripted action sequence,
//! and prints ASCII frames of the simulation.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;

use frostfall_core::{Event, GridPos, ObjectKind, WELCOME_BANNER};
use frostfall_game::Session;
use frostfall_levels::{builtin_catalog, Level};
use frostfall_world::World;

const FRAME: Duration = Duration::from_millis(120);

/// Headless Frostfall driver.
#[derive(Debug, Parser)]
#[command(name = "frostfall", about = "Run a Frostfall level from the terminal")]
struct Args {
    /// Identifier of the built-in level to load.
    #[arg(long, default_value = "first_steps")]
    level: String,

    /// Load a custom level from a JSON document instead.
    #[arg(long)]
    file: Option<PathBuf>,

    /// List the built-in levels and exit.
    #[arg(long)]
    list: bool,

    /// Action script: L/R move, J jump, A/D ice below-left/right, '.' wait.
    #[arg(long, default_value = "")]
    actions: String,

    /// Frames to simulate after the script finishes.
    #[arg(long, default_value_t = 60)]
    ticks: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for level in builtin_catalog() {
            println!(
                "{:<18} {:>8?}  {}",
                level.id(),
                level.difficulty(),
                level.name()
            );
        }
        return Ok(());
    }

    let level = load_level(&args)?;
    println!("{WELCOME_BANNER}");
    println!("Level: {} ({:?})", level.name(), level.difficulty());
    if !level.description().is_empty() {
        println!("  {}", level.description());
    }

    let mut session = Session::from_level(&level).context("level failed to load")?;
    let mut events = Vec::new();

    println!("{}", render(session.world()));

    for action in args.actions.chars() {
        apply_action(&mut session, action);
        // A few frames between actions so cooldowns recover and pushes land.
        for _ in 0..3 {
            session.tick(FRAME, &mut events);
        }
    }

    for _ in 0..args.ticks {
        session.tick(FRAME, &mut events);
        if session.is_complete() {
            break;
        }
    }

    println!("{}", render(session.world()));
    summarize(&events, &session);
    Ok(())
}

fn load_level(args: &Args) -> Result<Level> {
    if let Some(path) = &args.file {
        let document = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Level::from_json_str(&document).context("parsing custom level");
    }

    let Some(level) = builtin_catalog()
        .into_iter()
        .find(|level| level.id() == args.level)
    else {
        bail!("unknown level '{}'; try --list", args.level);
    };
    Ok(level)
}

fn apply_action(session: &mut Session, action: char) {
    let applied = match action.to_ascii_uppercase() {
        'L' => session.move_left(),
        'R' => session.move_right(),
        'J' => session.jump(),
        'A' => session.create_ice_left(),
        'D' => session.create_ice_right(),
        '.' => true,
        other => {
            log::warn!("unknown action '{other}' skipped");
            true
        }
    };
    if !applied {
        log::debug!("action '{action}' had no effect");
    }
}

fn render(world: &World) -> String {
    let mut frame = String::new();
    for y in (0..world.height()).rev() {
        for x in 0..world.width() {
            frame.push(glyph(world, GridPos::new(x, y)));
        }
        frame.push('\n');
    }
    frame
}

fn glyph(world: &World, pos: GridPos) -> char {
    let Some(object) = world.object_at(pos) else {
        return '.';
    };
    match object.kind() {
        ObjectKind::Player => 'P',
        ObjectKind::Wall => '#',
        ObjectKind::Stone => 'S',
        ObjectKind::IceBlock => {
            if object.is_melting() {
                'i'
            } else {
                'I'
            }
        }
        ObjectKind::Flame => 'F',
        ObjectKind::Pot => {
            if object.is_hot() {
                'H'
            } else {
                'C'
            }
        }
        ObjectKind::Portal => 'O',
    }
}

fn summarize(events: &[Event], session: &Session) {
    let extinguished = events
        .iter()
        .filter(|event| matches!(event, Event::FlameExtinguished { .. }))
        .count();
    let melted = events
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
        .count();

    println!(
        "moves: {}  elapsed: {:.1}s  flames out: {extinguished}  ice melted: {melted}",
        session.moves(),
        session.elapsed().as_secs_f32()
    );
    if session.is_complete() {
        println!("level complete");
    }
}
