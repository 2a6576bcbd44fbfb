//! Pixel-grid platformer core, headless entry point.
//!
//! A grid-aligned 2D platformer subsystem built on:
//! - **bevy_ecs** for entity-component-system architecture
//! - **glam** for 2D vector math
//!
//! The simulation is deliberately headless: rendering, raw input polling and
//! editor wiring are external collaborators. This executable steps the world
//! with a fixed tick, feeding scripted input to the character, and logs the
//! resulting state.
//!
//! # Main Loop
//!
//! 1. Load the INI configuration and the JSON level layout
//! 2. Build the ECS world, resources and contact observers
//! 3. Each tick, strictly in order: level space reconfiguration, tile
//!    alignment, obstacle registry refresh, character update (velocity,
//!    integration, collision), grid mesh regeneration, visual smoothing
//! 4. Report the final character state
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 600
//! ```

mod components;
mod events;
mod game;
mod grid;
mod mathutil;
mod resources;
mod systems;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crate::components::character::PixelCharacter;
use crate::components::mapposition::{MapPosition, VisualPosition};
use crate::events::contact::{observe_contact, observe_contact_lost};
use crate::game::LevelLayout;
use crate::resources::input::InputState;
use crate::resources::levelcontext::LevelContext;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::character::update_characters;
use crate::systems::gridmesh::regenerate_grid_mesh;
use crate::systems::levelspace::update_level_space;
use crate::systems::registry::refresh_obstacle_registry;
use crate::systems::tilealign::align_tiles;
use crate::systems::time::update_world_time;
use crate::systems::visual::smooth_visual_positions;

/// Ticks between scripted jump presses in the demo loop.
const JUMP_INTERVAL: u64 = 96;

/// Pixel-grid platformer simulation
#[derive(Parser)]
#[command(version, about = "Headless pixel-grid platformer simulation")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to a JSON level layout (defaults to the built-in demo level).
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Number of ticks to simulate (overrides the config value).
    #[arg(long)]
    ticks: Option<u64>,

    /// Fixed tick delta in seconds (overrides the config tick rate).
    #[arg(long)]
    dt: Option<f32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::with_path(path.clone()),
        None => SimConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default configuration: {}", e);
    }

    let layout = match &cli.level {
        Some(path) => match LevelLayout::load_from_file(path) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => LevelLayout::demo(),
    };

    let max_ticks = cli.ticks.unwrap_or(config.max_ticks);
    let dt = cli.dt.unwrap_or(1.0 / config.tick_rate as f32);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(LevelContext::default());
    world.insert_resource(config);

    if let Err(e) = game::setup(&mut world, &layout) {
        log::error!("Scene setup failed: {}", e);
        std::process::exit(1);
    }

    world.spawn(Observer::new(observe_contact));
    world.spawn(Observer::new(observe_contact_lost));
    // Ensure the observers are registered before any system triggers events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_level_space,
            align_tiles,
            refresh_obstacle_registry,
            update_characters,
            regenerate_grid_mesh,
            smooth_visual_positions,
        )
            .chain(),
    );
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    for tick in 0..max_ticks {
        {
            let mut input = world.resource_mut::<InputState>();
            input.move_right.update(true);
            input.jump.update(tick % JUMP_INTERVAL == 0 && tick > 0);
        }

        update_world_time(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers();
    }

    let mut characters = world.query::<(&PixelCharacter, &MapPosition, &VisualPosition)>();
    for (character, position, visual) in characters.iter(&world) {
        log::info!(
            "After {} ticks: pixel=({}, {}), world=({:.2}, {:.2}), visual=({:.2}, {:.2}), contacts={:?}",
            max_ticks,
            character.pixel_pos_x,
            character.pixel_pos_y,
            position.pos.x,
            position.pos.y,
            visual.pos.x,
            visual.pos.y,
            character.contact_normals
        );
    }
}
