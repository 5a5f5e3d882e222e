use anyhow::Context;
use clap::Parser;
use gesture_control_lib::core::config::Config;
use gesture_control_lib::core::logging;
use gesture_control_lib::platform::{self, camera::list_cameras};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// JSON config file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera index, overrides the config file
    #[arg(long)]
    camera: Option<u32>,

    /// Track hands only (no eyebrow zoom)
    #[arg(long)]
    hands_only: bool,

    /// Log actions instead of injecting them
    #[arg(long)]
    dry_run: bool,

    /// Print the available cameras and exit
    #[arg(long)]
    list_cameras: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.list_cameras {
        let cameras = list_cameras().context("Failed to list cameras")?;
        if cameras.is_empty() {
            println!("No cameras found");
        }
        for camera in cameras {
            println!("{}: {} ({})", camera.index, camera.name, camera.description);
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(index) = cli.camera {
        config.camera_index = index;
    }
    if cli.hands_only {
        config.enable_face_tracking = false;
    }

    tracing::info!(
        os = platform::get_os_name(),
        camera = config.camera_index,
        face_tracking = config.enable_face_tracking,
        dry_run = cli.dry_run,
        "Starting gesture control"
    );

    let reason = gesture_control_lib::run(&config, cli.dry_run)?;
    println!("Stopped: {}", reason.to_string());
    Ok(())
}
