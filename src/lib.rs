pub mod core;
pub mod models;
pub mod platform;

use anyhow::Context;
use crate::core::config::Config;
use crate::core::gesture_loop::{GestureLoop, LoopSettings, StopReason};
use crate::models::pose::MediaPipeModel;
use crate::platform::camera::NokhwaCamera;
use crate::platform::display::MinifbDisplay;
use crate::platform::input::{get_input_injector, DryRunInjector, InputInjector};
use crate::platform::pose::create_detector;

/// Open every device, run the gesture loop until it stops, and release everything.
///
/// Startup failures (camera, detectors, injector, window) are errors. Once the
/// loop is running, every exit is a clean `StopReason`.
pub fn run(config: &Config, dry_run: bool) -> anyhow::Result<StopReason> {
    config.validate().context("Invalid configuration")?;

    let camera = NokhwaCamera::open(config.camera_index)
        .with_context(|| format!("Failed to open camera {}", config.camera_index))?;

    let detector_config = config.detector_config();
    let hand_detector = create_detector(MediaPipeModel::Hands, &detector_config)
        .context("Failed to load hand landmark model")?;

    let injector: Box<dyn InputInjector> = if dry_run {
        Box::new(DryRunInjector::new())
    } else {
        get_input_injector().context("Failed to set up input injection")?
    };

    let (width, height) = camera.resolution();
    let display = MinifbDisplay::open(&config.window_title, config.quit_key, width, height)
        .context("Failed to open preview window")?;

    let mut gesture_loop = GestureLoop::new(
        Box::new(camera),
        hand_detector,
        injector,
        Box::new(display),
        LoopSettings::from(config),
    );

    if config.enable_face_tracking {
        let face_detector = create_detector(MediaPipeModel::FaceMesh, &detector_config)
            .context("Failed to load face mesh model")?;
        gesture_loop = gesture_loop.with_face_detector(face_detector);
    }

    Ok(gesture_loop.run())
}
