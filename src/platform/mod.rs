// OS and device integrations: camera, preview window, landmark models, input injection

pub mod camera;
pub mod display;
pub mod input;
pub mod pose;

pub use camera::{list_cameras, CameraSource, NokhwaCamera};
pub use display::{DisplaySurface, MinifbDisplay};
pub use input::{get_input_injector, DryRunInjector, InputInjector};
pub use pose::{create_detector, LandmarkDetector};

/// Name of the operating system the binary was built for
pub fn get_os_name() -> &'static str {
    std::env::consts::OS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_name_matches_target() {
        let os_name = get_os_name();

        #[cfg(target_os = "macos")]
        assert_eq!(os_name, "macos");

        #[cfg(target_os = "windows")]
        assert_eq!(os_name, "windows");

        #[cfg(target_os = "linux")]
        assert_eq!(os_name, "linux");
    }
}
