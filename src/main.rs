// What you SEE:
// • Move the mouse: a vine follows the pointer and slowly fades behind it.
// • Flowers open along the vine and outlive it, fading on their own.
// • Left click cycles the background. S saves the current frame as PNG. ESC quits.
// • --preset classic draws the raw trail with simple flowers;
//   --preset realistic (default) smooths it into a curve with layered petals.

mod bloom;
mod clock;
mod config;
mod curve;
mod decay;
mod draw;
mod error;
mod export;
mod palette;
mod raster;
mod scene;
mod spawner;
mod trail;
mod types;
mod vine;

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use clock::FrameClock;
use config::{Config, DEFAULT_FPS, Preset, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use draw::Drawer;
use error::Error;
use scene::{Control, Scene};
use types::FrameBuffer;

#[derive(Parser, Debug)]
#[command(name = "mucha-vines", about = "Art-nouveau vines and flowers that follow your mouse")]
struct Args {
    /// drawing style
    #[arg(long, value_enum, default_value_t = Preset::Realistic)]
    preset: Preset,

    /// seed for a reproducible drawing (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// frame cap (0 = uncapped)
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// where S writes its PNGs
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<(), Error> {
    // Init logging (RUST_LOG overrides)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let args = Args::parse();
    info!(seed = ?args.seed, fps = args.fps, "Mucha vines starting");

    /* --- Scene + window setup ---
       Visual: window opens on the first background color. */
    let config = Config::new(args.preset);
    let art_name = config.art_name;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut scene = Scene::new(config, WINDOW_WIDTH, WINDOW_HEIGHT, rng);
    let mut drawer = Drawer::new(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)?;

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame (and what S saves). */
    let mut screen = FrameBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut clock = FrameClock::new(args.fps);

    /* ------------------------------ Main loop ------------------------------ */
    'frames: loop {
        /* 1) Inputs. Saving writes the frame presented last time round. */
        for event in drawer.poll_events() {
            match scene.handle_event(event) {
                Control::Quit => break 'frames,
                Control::Save => export::save_frame(&screen, &args.out_dir, art_name),
                Control::Continue => {}
            }
        }

        /* 2) Grow, fade, spawn and composite. */
        scene.frame(drawer.pointer(), &mut screen);

        /* 3) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;

        /* 4) Hold the frame rate; FPS to the debug log once per second. */
        if let Some(fps) = clock.tick() {
            scene.log_stats(fps);
        }
    }

    info!("bye");
    Ok(())
}
