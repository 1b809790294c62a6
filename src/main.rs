//! Blaster headless runner
//!
//! Drives the simulation with the demo autopilot at 60 Hz, the way a
//! rendering host would, and prints a JSON summary of the run.
//!
//! Usage: `blaster [frames] [seed] [tuning.json]`

use std::path::PathBuf;
use std::process::ExitCode;

use blaster::Tuning;
use blaster::consts::FRAME_MS;
use blaster::demo::autopilot;
use blaster::sim::{FrameClock, GameEvent, GameSession, tick};
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "blaster")]
#[command(about = "Run the arcade shooter simulation headless under the demo autopilot")]
struct Args {
    /// Number of 60 Hz frames to simulate
    #[arg(default_value_t = 60 * 60)]
    frames: u64,
    /// Session seed
    #[arg(default_value_t = 2016)]
    seed: u64,
    /// JSON tuning file overriding the built-in constants
    tuning: Option<PathBuf>,
}

/// End-of-run report
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    frames: u64,
    seed: u64,
    final_score: u64,
    best_score: u64,
    deaths: u32,
    enemies_destroyed: u32,
    shots_fired: u32,
    world_blocks: usize,
    enemies_alive: usize,
    game_over: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let Args {
        frames,
        seed,
        tuning,
    } = Args::parse();
    let tuning = match tuning {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Blaster (headless) starting: {} frames, seed {}", frames, seed);

    let mut session = GameSession::with_tuning(seed, tuning);
    let mut clock = FrameClock::default();
    let mut summary = RunSummary {
        frames,
        seed,
        ..Default::default()
    };

    for _ in 0..frames {
        clock = clock.advance(FRAME_MS);
        let input = autopilot(&session);
        let camera = session.camera();
        tick(&mut session, &input, clock, &camera);

        for event in session.drain_events() {
            match event {
                GameEvent::GameOver { score } => {
                    summary.deaths += 1;
                    summary.best_score = summary.best_score.max(score);
                }
                GameEvent::EnemyDestroyed { .. } => summary.enemies_destroyed += 1,
                GameEvent::ShotFired { .. } => summary.shots_fired += 1,
                _ => {}
            }
        }
    }

    summary.final_score = session.score;
    summary.best_score = summary.best_score.max(session.score);
    summary.world_blocks = session.world.len();
    summary.enemies_alive = session.alive_enemy_count();
    summary.game_over = session.is_game_over();

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            log::error!("Failed to encode summary: {}", err);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
