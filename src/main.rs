//! Sky Hop headless runner
//!
//! Runs the simulation at a fixed tick with a simple autopilot and prints the
//! final frame as JSON.
//!
//! Usage: `sky-hop [seed] [ticks] [config.json] [--high-score-file PATH]`

use clap::Parser;
use sky_hop::sim::{FrameSnapshot, GameEvent, GamePhase, World, tick};
use sky_hop::{Command, GameConfig, HighScoreStore, InputState, JsonFileStore};
use std::path::PathBuf;

const HIGH_SCORE_FILE: &str = "sky-hop-highscore.json";
const DEFAULT_TICKS: u64 = 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "sky-hop")]
#[command(about = "Headless Sky Hop run driven by an autopilot; prints the final frame as JSON")]
struct Args {
    /// Run seed (defaults to the clock)
    seed: Option<u64>,
    /// Tick budget
    #[arg(default_value_t = DEFAULT_TICKS)]
    ticks: u64,
    /// JSON config file; missing or invalid files fall back to defaults
    config: Option<PathBuf>,
    /// Where the high score is kept
    #[arg(long, default_value = HIGH_SCORE_FILE)]
    high_score_file: PathBuf,
}

/// Steers toward a platform to land on and shoots at anything overhead
struct Autopilot;

impl Autopilot {
    fn commands(&self, world: &World) -> Vec<Command> {
        let player = &world.player;
        let center = player.pos.x + player.size.x / 2.0;
        let bottom = player.bottom();

        // Falling: the nearest platform below. Rising: the nearest one above.
        let falling = player.vel.y > 0.0;
        let target = world
            .platforms
            .iter()
            .filter(|p| p.is_solid())
            .filter(|p| if falling { p.pos.y >= bottom } else { p.pos.y < bottom })
            .min_by(|a, b| (a.pos.y - bottom).abs().total_cmp(&(b.pos.y - bottom).abs()));

        let mut commands = Vec::new();
        match target {
            Some(platform) if platform.center_x() < center - 10.0 => {
                commands.push(Command::MoveRight(false));
                commands.push(Command::MoveLeft(true));
            }
            Some(platform) if platform.center_x() > center + 10.0 => {
                commands.push(Command::MoveLeft(false));
                commands.push(Command::MoveRight(true));
            }
            _ => {
                commands.push(Command::MoveLeft(false));
                commands.push(Command::MoveRight(false));
            }
        }

        let threat_overhead = world.enemies.iter().any(|e| {
            !e.destroyed && e.pos.y < player.pos.y && e.pos.x < center && center < e.pos.x + e.size.x
        });
        if threat_overhead && world.ticks % 8 == 0 {
            commands.push(Command::Fire);
        }
        commands
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(seed: u64, max_ticks: u64, config: GameConfig, high_score: u64) -> FrameSnapshot {
    let mut world = World::new(config, seed);
    world.high_score = high_score;

    let autopilot = Autopilot;
    let mut input = InputState::new();
    input.apply(Command::Start);

    for _ in 0..max_ticks {
        if world.phase == GamePhase::Playing {
            for command in autopilot.commands(&world) {
                input.apply(command);
            }
        }
        tick(&mut world, &input.take_tick_input());

        for event in world.drain_events() {
            match event {
                GameEvent::Jump | GameEvent::JetpackThrust | GameEvent::Shoot => {}
                other => log::debug!("tick {}: {:?}", world.ticks, other),
            }
        }
        if world.phase == GamePhase::GameOver {
            break;
        }
    }
    finish(world)
}

/// Close out a run, counting a score reached before the budget ran out
fn finish(mut world: World) -> FrameSnapshot {
    world.settle_high_score();
    log::info!(
        "Finished after {} ticks: score {}, high score {}",
        world.ticks,
        world.score,
        world.high_score
    );
    world.snapshot()
}

fn main() {
    env_logger::init();
    log::info!("Sky Hop (headless) starting...");

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = match &args.config {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };
    log::info!("Seed {}, running up to {} ticks", seed, args.ticks);

    let mut store = JsonFileStore::new(&args.high_score_file);
    let high_score = store.load_or_zero();

    let snapshot = run(seed, args.ticks, config, high_score);

    if snapshot.high_score > high_score
        && let Err(e) = store.save(snapshot.high_score)
    {
        log::error!("Failed to save high score: {}", e);
    }

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
}
