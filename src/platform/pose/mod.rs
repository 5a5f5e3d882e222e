// Landmark detection platform integration
// Provides the MediaPipe bridge and backend selection

pub mod mediapipe_bridge;

pub use mediapipe_bridge::{create_detector, DefaultMediaPipe, LandmarkDetector};
