use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{
    load_settings, parse_vec3, to_config, validate_population, validate_settings, write_frame,
    MouseScript, Runner,
};
use flock_core::{Flock, FlockStd, SystemClock, Vector3D};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless 3D boid flock simulation", long_about = None)]
struct Args {
    /// Viewport width divided by height; scales the vertical bounds
    #[arg(short, long, default_value_t = 1.6)]
    aspect_ratio: f32,

    /// Number of boids
    #[arg(short, long, default_value_t = 300)]
    boids: usize,

    /// Number of obstacles
    #[arg(short, long, default_value_t = 5)]
    obstacles: usize,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Seed for a reproducible population (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with flock settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Mouse target position as x,y,z
    #[arg(long, default_value = "0,0,0", allow_hyphen_values = true)]
    target: String,

    /// Movement of the mouse target per tick as x,y,z
    #[arg(long, default_value = "0,0,0", allow_hyphen_values = true)]
    drift: String,

    /// Tick at which the mouse target is pressed
    #[arg(long)]
    press_at: Option<u64>,

    /// Tick at which the mouse target is released and starts to decay
    #[arg(long)]
    release_at: Option<u64>,

    /// Wall-clock duration of one frame in milliseconds (0 runs flat out)
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Emit a frame every N ticks
    #[arg(short, long, default_value_t = 1)]
    every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn build_flock(args: &Args) -> Result<FlockStd> {
    let settings = load_settings(args.settings.as_deref())?;
    validate_settings(&settings).context("Invalid settings")?;
    validate_population(args.aspect_ratio, args.boids, args.obstacles)?;

    let config = to_config(&settings);
    let flock = match args.seed {
        Some(seed) => Flock::with_seed(
            args.aspect_ratio,
            args.boids,
            args.obstacles,
            seed,
            config,
            SystemClock,
        ),
        None => FlockStd::new_with_config(args.aspect_ratio, args.boids, args.obstacles, config),
    };
    Ok(flock)
}

fn build_script(args: &Args) -> Result<MouseScript> {
    let target = parse_vec3(&args.target).context("Invalid --target")?;
    let drift = parse_vec3(&args.drift).context("Invalid --drift")?;
    MouseScript::new(target, drift, args.press_at, args.release_at)
}

fn run(args: &Args) -> Result<()> {
    let flock = build_flock(args)?;
    let script = build_script(args)?;
    let mut runner = Runner::new(flock, script, args.every);

    let bounds = *runner.flock().bounds();
    log::info!(
        "Simulating {} boids and {} obstacles for {} ticks",
        args.boids,
        args.obstacles,
        args.ticks
    );
    log::debug!("Bounds: {:?} to {:?}", bounds.min, bounds.max);
    if script.target != Vector3D::zero() || script.press_at.is_some() {
        log::info!("Mouse target at {:?}", script.target);
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let frame_duration = Duration::from_millis(args.frame_ms);

    for _ in 0..args.ticks {
        let started = Instant::now();

        if let Some(frame) = runner.step() {
            if let Some(distance) = frame.mean_distance_to_target() {
                log::debug!("tick {}: mean distance to target {:.2}", frame.tick, distance);
            }
            write_frame(&mut out, &frame)?;
        }

        if let Some(remaining) = frame_duration.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    out.flush().context("Failed to flush output")?;
    log::info!("Finished after {} ticks", runner.flock().tick());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    run(&args).context("Simulation error")?;

    Ok(())
}
