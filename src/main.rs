//! Aberred Collision headless driver.
//!
//! Runs the collision core against a scene for a fixed number of ticks and
//! logs every collision notification:
//!
//! 1. Load `config.ini` (collision settings) and the scene JSON
//! 2. Initialize the collision subsystem and register observers
//! 3. Each tick: advance time, move bodies, run the collision pass
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --ticks 120 --delta 0.016
//! cargo run -- --scene demos/scene.json --config demos/config.ini
//! ```

use std::path::PathBuf;

use aberredcollision::events::collision::observe_log_collision;
use aberredcollision::resources::collisionsettings::CollisionSettings;
use aberredcollision::resources::collisionstats::CollisionStats;
use aberredcollision::resources::worldtime::WorldTime;
use aberredcollision::scene::{SceneData, observe_cooldown};
use aberredcollision::systems::collision::{collision_system, setup_collision_with};
use aberredcollision::systems::movement::movement_system;
use aberredcollision::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};

/// Aberred Collision headless driver
#[derive(Parser)]
#[command(version, about = "Runs the collision pass over a scene and logs notifications")]
struct Cli {
    /// INI file with a [collision] section. Defaults to ./config.ini; a
    /// missing file keeps the default settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scene JSON file. The built-in scene is used when omitted.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 90)]
    ticks: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 30.0)]
    delta: f32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => CollisionSettings::with_path(path),
        None => CollisionSettings::new(),
    };
    if let Err(e) = settings.load_from_file() {
        error!("{e}");
        std::process::exit(1);
    }

    let scene = match &cli.scene {
        Some(path) => match SceneData::load_from_file(path) {
            Ok(scene) => scene,
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => SceneData::builtin(),
    };

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    if let Err(e) = setup_collision_with(&mut world, settings) {
        error!("Failed to initialize collision: {e}");
        std::process::exit(1);
    }
    world.add_observer(observe_log_collision);
    world.add_observer(observe_cooldown);
    world.flush();

    scene.spawn(&mut world);

    let mut schedule = Schedule::default();
    schedule.add_systems((movement_system, collision_system).chain());

    let mut total = 0;
    for _ in 0..cli.ticks {
        update_world_time(&mut world, cli.delta);
        schedule.run(&mut world);
        total += world.resource::<CollisionStats>().dispatched;
    }

    let time = world.resource::<WorldTime>();
    info!(
        "Simulated {} ticks ({:.2}s), {} collision notifications",
        time.frame_count, time.elapsed, total
    );
}
