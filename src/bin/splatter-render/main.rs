// splatter-render - Headless render of the autonomous brush
//
// Pipeline:
//   1. Load settings (defaults, or a JSON file)
//   2. Run N frames at a fixed timestep with the wandering brush
//   3. Write the final surface as a PNG
//
// Usage: cargo run --bin splatter-render -- --frames 600 --out splatter.png

mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use splatter_engine::scheduler::{FrameScheduler, run_fixed};
use splatter_engine::{PixelSurface, Result, SimConfig, World};

#[derive(Parser, Debug)]
#[command(name = "splatter-render", about = "Render paint splatter frames to a PNG")]
struct Args {
    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Frames to simulate before writing the image
    #[arg(long, default_value_t = 300)]
    frames: u64,

    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// JSON settings file (camelCase keys, missing keys keep defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "splatter.png")]
    out: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("splatter-render: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    config.auto_move = true;

    info!(
        width = args.width,
        height = args.height,
        frames = args.frames,
        "rendering"
    );

    let surface = PixelSurface::new(args.width, args.height);
    let mut world = World::new(surface, config, args.seed);
    let mut scheduler = FrameScheduler::new();
    let step_ms = 1000.0 / args.fps.max(1.0);

    run_fixed(&mut scheduler, args.frames, step_ms, |elapsed| {
        world.frame((elapsed / 1000.0) as f32);
    });

    info!(
        live = world.particles().len(),
        created = world.created(),
        "simulation finished"
    );

    output::write_png(&args.out, world.surface())?;
    info!(path = %args.out.display(), "wrote image");
    Ok(())
}
