pub mod config;
pub mod logging;

// Gesture pipeline
pub mod debounce;
pub mod gesture_classifier;
pub mod gesture_loop;
pub mod overlay;
