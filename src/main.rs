//! Orbital Sound Loops - particles fall around drifting planets, and every
//! orbit makes its planet's drone a little louder.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::thread;
use std::time::{Duration, Instant};

use orbitloops::audio::{record_wav, AudioSystem};
use orbitloops::cli::Args;
use orbitloops::params::Config;
use orbitloops::simulation::Simulation;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let mut sim = Simulation::new(config, args.viewport(), args.seed);
    let world = sim.world();
    info!(
        "{} planets, {} particles in {}x{} (seed {})",
        world.planets.len(),
        world.particles.len(),
        world.viewport.width_px,
        world.viewport.height_px,
        args.seed
    );

    let sound = args.sound_config();
    if let Some(recording) = args.recording_config() {
        record_wav(&mut sim, &sound, &recording).context("WAV bounce failed")?;
    } else if args.live {
        run_live(&mut sim, &args)?;
    } else {
        run_headless(&mut sim, &args);
    }

    info!("Final: {}", sim.stats());
    Ok(())
}

fn run_headless(sim: &mut Simulation, args: &Args) {
    let start = Instant::now();
    for _ in 0..args.ticks {
        sim.tick();
        if args.should_log(sim.tick_count()) {
            info!("{}", sim.stats());
        }
    }
    info!("Simulated {} ticks in {:.2?}", args.ticks, start.elapsed());
}

fn run_live(sim: &mut Simulation, args: &Args) -> Result<()> {
    let sound = args.sound_config();
    let audio =
        AudioSystem::new(&sound, sim.planet_count()).context("Failed to start audio output")?;
    let tick_duration = Duration::from_secs_f64(1.0 / sound.ticks_per_second.max(1) as f64);
    info!(
        "Playing {} drones at {}Hz for {} ticks",
        sim.planet_count(),
        audio.sample_rate_hz(),
        args.ticks
    );

    let mut next = Instant::now();
    for _ in 0..args.ticks {
        sim.tick();
        audio.set_controls(&sim.voice_controls());
        if args.should_log(sim.tick_count()) {
            info!("{}", sim.stats());
        }

        next += tick_duration;
        if let Some(wait) = next.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }
    }
    Ok(())
}
