//! Coin Racer entry point
//!
//! Headless native runner: plays the game with the autopilot until the car
//! crashes or the tick limit is reached, then reports the result.

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;

use coin_racer::autopilot::Autopilot;
use coin_racer::{Game, TickOutcome, Tuning};

#[derive(Parser, Debug)]
#[command(name = "coin-racer")]
#[command(about = "Run a headless Coin Racer session driven by the autopilot")]
struct Args {
    /// RNG seed for the spawn sequence
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// JSON tuning file (missing fields use defaults)
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// Cruising speed for the autopilot
    #[arg(long)]
    cruise: Option<f32>,

    /// Print the final frame as JSON instead of the HUD text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Coin Racer (headless) starting...");

    ensure!(args.ticks > 0, "--ticks must be > 0");

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => {
            log::info!("Using default tuning");
            Tuning::default()
        }
    };

    let mut autopilot = Autopilot::default();
    if let Some(cruise) = args.cruise {
        ensure!(
            cruise > 0.0 && cruise <= tuning.max_speed,
            "--cruise must be within (0, {}]",
            tuning.max_speed
        );
        autopilot.cruise_speed = cruise;
    }

    let mut game = Game::new(args.seed, tuning);
    log::info!("Game initialized with seed: {}", game.seed());

    for _ in 0..args.ticks {
        let input = autopilot.steer(game.state(), game.tuning());
        if game.update(&input) == TickOutcome::Quit || game.state().is_game_over() {
            break;
        }
    }

    let view = game.view();
    log::info!(
        "Run finished after {} ticks (game over: {})",
        game.state().time_ticks,
        view.game_over
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view.hud_text());
        println!("Ticks: {}", game.state().time_ticks);
        if let Some(text) = view.game_over_text() {
            println!("{}", text);
        }
    }

    Ok(())
}
