use crate::models::pose::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CAMERA_INDEX: u32 = 0;
pub const DEFAULT_CONFIDENCE: f32 = 0.7;
pub const DEFAULT_SCROLL_AMOUNT: i32 = 10;
pub const DEFAULT_ZOOM_OUT_THRESHOLD_PX: f32 = 25.0;
pub const DEFAULT_ZOOM_IN_THRESHOLD_PX: f32 = 10.0;
pub const DEFAULT_ZOOM_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_KEY_POLL_MS: u64 = 10;
pub const MAX_SCROLL_AMOUNT: i32 = 1000;

/// Error types for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Capture device index
    pub camera_index: u32,
    /// Run the face detector and the eyebrow zoom gesture
    pub enable_face_tracking: bool,
    /// Flip frames horizontally before detection
    pub mirror: bool,
    /// Minimum confidence for detection (0.0-1.0)
    pub min_detection_confidence: f32,
    /// Minimum confidence for tracking (0.0-1.0)
    pub min_tracking_confidence: f32,
    /// Maximum number of hands the detector reports
    pub max_num_hands: u32,
    /// Wheel notches per thumbs-up/down frame
    pub scroll_amount: i32,
    /// Eyebrow-to-eye distance above which zoom-out fires (pixels)
    pub zoom_out_threshold_px: f32,
    /// Eyebrow-to-eye distance below which zoom-in fires (pixels)
    pub zoom_in_threshold_px: f32,
    /// Minimum time between two zoom actions, either direction
    pub zoom_debounce_ms: u64,
    /// Quit-key poll timeout, also the frame pacing delay
    pub key_poll_ms: u64,
    /// Key that ends the loop
    pub quit_key: char,
    /// Preview window title
    pub window_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: DEFAULT_CAMERA_INDEX,
            enable_face_tracking: true,
            mirror: true,
            min_detection_confidence: DEFAULT_CONFIDENCE,
            min_tracking_confidence: DEFAULT_CONFIDENCE,
            max_num_hands: 2,
            scroll_amount: DEFAULT_SCROLL_AMOUNT,
            zoom_out_threshold_px: DEFAULT_ZOOM_OUT_THRESHOLD_PX,
            zoom_in_threshold_px: DEFAULT_ZOOM_IN_THRESHOLD_PX,
            zoom_debounce_ms: DEFAULT_ZOOM_DEBOUNCE_MS,
            key_poll_ms: DEFAULT_KEY_POLL_MS,
            quit_key: 'q',
            window_title: "Thumbs Up/Down Gesture Control".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{}: {}. Must be between 0.0 and 1.0",
                    name, value
                )));
            }
        }

        if self.max_num_hands == 0 {
            return Err(ConfigError::Invalid(
                "max_num_hands must be at least 1".to_string(),
            ));
        }

        if self.scroll_amount == 0 || self.scroll_amount.unsigned_abs() > MAX_SCROLL_AMOUNT as u32 {
            return Err(ConfigError::Invalid(format!(
                "scroll_amount: {}. Must be non-zero and at most {} in magnitude",
                self.scroll_amount, MAX_SCROLL_AMOUNT
            )));
        }

        if !self.zoom_in_threshold_px.is_finite()
            || !self.zoom_out_threshold_px.is_finite()
            || self.zoom_in_threshold_px < 0.0
            || self.zoom_in_threshold_px > self.zoom_out_threshold_px
        {
            return Err(ConfigError::Invalid(format!(
                "zoom thresholds: in={} out={}. Need 0 <= in <= out",
                self.zoom_in_threshold_px, self.zoom_out_threshold_px
            )));
        }

        if self.key_poll_ms == 0 || self.key_poll_ms > 1000 {
            return Err(ConfigError::Invalid(format!(
                "key_poll_ms: {}. Must be between 1 and 1000",
                self.key_poll_ms
            )));
        }

        if !self.quit_key.is_ascii_alphanumeric() {
            return Err(ConfigError::Invalid(format!(
                "quit_key: {:?}. Must be an ASCII letter or digit",
                self.quit_key
            )));
        }

        Ok(())
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            min_detection_confidence: self.min_detection_confidence,
            min_tracking_confidence: self.min_tracking_confidence,
            max_num_hands: self.max_num_hands,
            ..DetectorConfig::default()
        }
    }

    pub fn zoom_debounce(&self) -> Duration {
        Duration::from_millis(self.zoom_debounce_ms)
    }

    pub fn key_poll_timeout(&self) -> Duration {
        Duration::from_millis(self.key_poll_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn get_test_config_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push("gesture_control_test_config");
        path.push(name);
        path
    }

    fn write_test_config(name: &str, contents: &str) -> PathBuf {
        let path = get_test_config_path(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.camera_index, 0);
        assert_eq!(config.min_detection_confidence, 0.7);
        assert_eq!(config.min_tracking_confidence, 0.7);
        assert_eq!(config.scroll_amount, 10);
        assert_eq!(config.zoom_out_threshold_px, 25.0);
        assert_eq!(config.zoom_in_threshold_px, 10.0);
        assert_eq!(config.zoom_debounce(), Duration::from_millis(500));
        assert_eq!(config.key_poll_timeout(), Duration::from_millis(10));
        assert_eq!(config.quit_key, 'q');
        assert!(config.mirror);
        assert!(config.enable_face_tracking);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.min_detection_confidence = 1.5;
        assert!(config.validate().is_err());
        config.min_detection_confidence = 0.7;

        config.scroll_amount = 0;
        assert!(config.validate().is_err());
        config.scroll_amount = 10;

        config.zoom_in_threshold_px = 30.0;
        assert!(config.validate().is_err());
        config.zoom_in_threshold_px = 10.0;

        config.key_poll_ms = 0;
        assert!(config.validate().is_err());
        config.key_poll_ms = 10;

        config.quit_key = ' ';
        assert!(config.validate().is_err());
        config.quit_key = 'q';

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scroll_amount_is_bounded() {
        let mut config = Config::default();

        for amount in [i32::MIN, -(MAX_SCROLL_AMOUNT + 1), MAX_SCROLL_AMOUNT + 1, i32::MAX] {
            config.scroll_amount = amount;
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "scroll_amount {} should be rejected",
                amount
            );
        }

        for amount in [-MAX_SCROLL_AMOUNT, -1, 1, MAX_SCROLL_AMOUNT] {
            config.scroll_amount = amount;
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let mut config = Config::default();
        config.zoom_out_threshold_px = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.zoom_in_threshold_px = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.zoom_out_threshold_px = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_tracking_confidence = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_load_partial_config() {
        let path = write_test_config(
            "partial.json",
            r#"{ "camera_index": 2, "enable_face_tracking": false }"#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.camera_index, 2);
        assert!(!config.enable_face_tracking);
        assert_eq!(config.scroll_amount, DEFAULT_SCROLL_AMOUNT);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_invalid_config() {
        let path = write_test_config("invalid.json", r#"{ "key_poll_ms": 5000 }"#);
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Invalid(_))));
        let _ = fs::remove_file(path);

        let path = write_test_config("garbage.json", "not json");
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_detector_config_from_config() {
        let mut config = Config::default();
        config.min_detection_confidence = 0.6;
        config.max_num_hands = 1;

        let detector = config.detector_config();
        assert_eq!(detector.min_detection_confidence, 0.6);
        assert_eq!(detector.min_tracking_confidence, 0.7);
        assert_eq!(detector.max_num_hands, 1);
        assert_eq!(detector.max_num_faces, 1);
    }
}
