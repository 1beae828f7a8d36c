//! Headless demo runner
//!
//! Drives a session with a simple autopilot (turn toward the nearest rock,
//! thrust when it is far, fire when lined up) through Menu, Playing and
//! GameOver, restarting after every lost run.

use std::f32::consts::PI;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use asteroid_shooter::consts::{DEFAULT_SEED, TICKS_PER_SECOND};
use asteroid_shooter::renderer::{DrawList, MonospaceLayout};
use asteroid_shooter::sim::vector::heading;
use asteroid_shooter::{AssetCache, GameConfig, GamePhase, GameSession, InputState};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "asteroid-shooter")]
#[command(about = "Run the asteroid shooter simulation headless with a scripted autopilot")]
struct Cli {
    /// Session seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Frames to simulate (60 per second of game time)
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// JSON file with game tunables (missing keys keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final render snapshot as JSON
    #[arg(long, default_value_t = false)]
    snapshot: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = GameConfig::from_json(&text)
        .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config)
}

/// Wrap an angle into [-PI, PI]
fn normalize_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Held inputs for this frame. `pulse` alternates so state keys register
/// as fresh presses.
fn autopilot(session: &GameSession, pulse: bool) -> InputState {
    match session.phase() {
        GamePhase::Menu => {
            return InputState {
                confirm: pulse,
                ..Default::default()
            };
        }
        GamePhase::GameOver => {
            return InputState {
                restart: pulse,
                ..Default::default()
            };
        }
        GamePhase::Paused => {
            return InputState {
                pause: pulse,
                ..Default::default()
            };
        }
        GamePhase::Playing => {}
    }

    let player = session.player();
    let Some(target) = session
        .asteroids()
        .iter()
        .min_by(|a, b| {
            let da = a.pos.distance_squared(player.pos);
            let db = b.pos.distance_squared(player.pos);
            da.total_cmp(&db)
        })
    else {
        return InputState::default();
    };

    let to_target = target.pos - player.pos;
    let wanted = to_target.x.atan2(-to_target.y);
    let error = normalize_angle(wanted - player.angle);
    let facing = heading(player.angle).dot(to_target.normalize_or_zero());

    InputState {
        rotate_left: error < -0.05,
        rotate_right: error > 0.05,
        accelerate: facing > 0.9 && to_target.length() > 300.0,
        fire: error.abs() < 0.2,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    log::info!(
        "Asteroid shooter (headless) seed {:#x}, {} frames ({:.0}s of game time)",
        cli.seed,
        cli.frames,
        cli.frames as f64 / TICKS_PER_SECOND as f64
    );

    let mut session = GameSession::new(config, AssetCache::default(), cli.seed);
    let mut runs = 0u32;
    let mut was_over = false;

    for step in 0..cli.frames {
        let input = autopilot(&session, step % 2 == 0);
        session.update(&input);

        let over = session.phase() == GamePhase::GameOver;
        if over && !was_over {
            runs += 1;
            log::info!(
                "Run {runs}: score {} after {} frames (rank {:?})",
                session.score(),
                session.frame(),
                session.last_rank()
            );
        }
        was_over = over;
    }

    let mut frame = DrawList::new();
    session.render(&mut frame, &MonospaceLayout::default());
    log::debug!("Final frame: {} draw calls", frame.commands.len());

    log::info!(
        "Finished {runs} runs; high score {}, leaderboard size {}",
        session.high_score(),
        session.leaderboard().entries.len()
    );
    for (rank, entry) in session.leaderboard().entries.iter().enumerate() {
        log::info!("  #{:<2} {:>7} ({} frames)", rank + 1, entry.score, entry.frames);
    }

    if cli.snapshot {
        let json = session
            .snapshot()
            .to_json()
            .context("serializing render snapshot")?;
        println!("{json}");
    }

    Ok(())
}
