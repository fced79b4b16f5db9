//! Skele-Hero headless driver
//!
//! Plays rounds on autopilot at the fixed tick rate (no display, no sleeping)
//! and prints one JSON summary per round.
//!
//! Usage: skele-hero [--archetype NAME] [--seed N] [--config PATH] [--rounds N]

use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use skele_hero::GameConfig;
use skele_hero::SetupError;
use skele_hero::renderer::{Vertex, VertexSurface};
use skele_hero::sim::{Archetype, Round, TickInput, tick};

#[derive(Debug)]
struct Args {
    archetype: Archetype,
    seed: Option<u64>,
    config: Option<PathBuf>,
    rounds: u32,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        archetype: Archetype::default(),
        seed: None,
        config: None,
        rounds: 1,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--archetype" => args.archetype = value()?.parse().map_err(|e: SetupError| e.to_string())?,
            "--seed" => args.seed = Some(value()?.parse().map_err(|_| "--seed must be a number")?),
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--rounds" => args.rounds = value()?.parse().map_err(|_| "--rounds must be a number")?,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(args)
}

fn run(args: Args) -> Result<(), SetupError> {
    let config = GameConfig::load_or_default(args.config.as_deref())?;
    let seed = args.seed.or(config.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    // One tick past the countdown is always enough to reach an end state
    let max_ticks = u64::from(config.round_ticks_per_second()) * u64::from(config.round_seconds) + 1;
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut round = Round::new(config, args.archetype, seed)?;
    let mut hud = VertexSurface::new();
    for n in 0..args.rounds {
        if n > 0 {
            round.restart(args.archetype)?;
        }
        for _ in 0..max_ticks {
            tick(&mut round, &input);
            if round.state().is_terminal() {
                break;
            }
        }
        // Last frame's health bars, as they would be uploaded
        hud.clear();
        round.render_health(&mut hud);
        log::debug!(
            "Final HUD: {} quads, {} bytes at stride {}",
            hud.quad_count(),
            Vertex::as_bytes(&hud.vertices).len(),
            Vertex::STRIDE
        );

        match serde_json::to_string(&round.summary()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not encode round summary: {e}"),
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Skele-Hero (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: skele-hero [--archetype eyeball|pumpking|bee] [--seed N] [--config PATH] [--rounds N]");
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("Setup failed: {e}");
        eprintln!("error: {e}");
        process::exit(1);
    }
}
