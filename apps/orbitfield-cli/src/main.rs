mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use orbitfield_kernel::{CursorState, DecayMode, SceneConfig, Stage};
use orbitfield_render::DebugTextRenderer;
use orbitfield_tools::SceneInspector;
use script::{Simulation, WheelImpulse};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orbitfield-cli", about = "Headless tool for the orbitfield scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default scene summary
    Info,
    /// Run the animation driver headless and print debug frames
    Simulate {
        /// Number of frames to tick
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Wheel event before a frame's tick, as FRAME:DELTA_Y (repeatable)
        #[arg(long, value_parser = script::parse_wheel)]
        wheel: Vec<WheelImpulse>,
        /// Cursor offset from the window center, as X,Y
        #[arg(long, value_parser = script::parse_cursor, allow_hyphen_values = true)]
        cursor: Option<CursorState>,
        /// Scale rotation and decay by frame time
        #[arg(long)]
        time_scaled: bool,
        /// Scene configuration file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print every k-th frame (0 = last frame only)
        #[arg(long, default_value = "0")]
        every: u64,
        /// Also list the first particle positions
        #[arg(long)]
        particles: bool,
    },
    /// Print the default configuration as YAML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let config = SceneConfig::default();
            let stage = Stage::from_config(&config);
            println!("orbitfield-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", SceneInspector::summary(&stage));
            println!(
                "orbit: center=({}, {}) radius={} decay={} mode={:?}",
                config.orbit.center.x,
                config.orbit.center.y,
                config.orbit.radius,
                config.driver.decay,
                config.driver.decay_mode
            );
            for id in SceneInspector::list_meshes(stage.scene()) {
                if let Some(info) = SceneInspector::inspect_mesh(stage.scene(), id) {
                    println!("  {info}");
                }
            }
        }
        Commands::Simulate {
            frames,
            dt,
            wheel,
            cursor,
            time_scaled,
            config,
            every,
            particles,
        } => {
            let mut scene_config = match &config {
                Some(path) => SceneConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => SceneConfig::default(),
            };
            if time_scaled {
                scene_config.driver.decay_mode = DecayMode::TimeScaled {
                    reference_fps: 60.0,
                };
            }
            anyhow::ensure!(dt.is_finite() && dt >= 0.0, "--dt must be a non-negative number");

            let mut stage = Stage::from_config(&scene_config);
            let sim = Simulation {
                frames,
                dt,
                wheel,
                cursor,
                every,
            };
            let renderer = DebugTextRenderer {
                show_particles: particles,
            };
            print!("{}", sim.run(&mut stage, &renderer));
            println!("{}", SceneInspector::summary(&stage));
            println!("state hash: {:#018x}", stage.scene().state_hash());
        }
        Commands::Config => {
            print!("{}", SceneConfig::default().to_yaml()?);
        }
    }

    Ok(())
}
