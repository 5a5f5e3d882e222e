// Gesture classifications and per-frame loop results

use crate::models::input::{HotkeyChord, InputAction};
use serde::{Deserialize, Serialize};

// ==============================================================================
// Hand Gestures
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandGesture {
    ThumbsUp,
    ThumbsDown,
}

impl HandGesture {
    pub fn action(&self, scroll_amount: i32) -> InputAction {
        match self {
            HandGesture::ThumbsUp => InputAction::Scroll {
                delta: scroll_amount,
            },
            HandGesture::ThumbsDown => InputAction::Scroll {
                delta: scroll_amount.saturating_neg(),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HandGesture::ThumbsUp => "Thumbs Up - Scroll Up",
            HandGesture::ThumbsDown => "Thumbs Down - Scroll Down",
        }
    }
}

// ==============================================================================
// Eyebrow Gestures
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyebrowGesture {
    ZoomIn,
    ZoomOut,
}

impl EyebrowGesture {
    pub fn action(&self) -> InputAction {
        match self {
            EyebrowGesture::ZoomIn => InputAction::Hotkey(HotkeyChord::ZOOM_IN),
            EyebrowGesture::ZoomOut => InputAction::Hotkey(HotkeyChord::ZOOM_OUT),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EyebrowGesture::ZoomIn => "Zoom In",
            EyebrowGesture::ZoomOut => "Zoom Out",
        }
    }
}

/// Eyebrow measurement for one detected face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyebrowReading {
    pub distance_px: f32,
    pub candidate: Option<EyebrowGesture>,
    /// False when the candidate was suppressed by the zoom debounce
    pub fired: bool,
}

// ==============================================================================
// Frame Report
// ==============================================================================

/// What one loop iteration classified and injected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub timestamp: i64,
    pub hands_detected: usize,
    pub faces_detected: usize,
    pub hand_gestures: Vec<HandGesture>,
    pub eyebrow_readings: Vec<EyebrowReading>,
    pub actions: Vec<InputAction>,
}

impl FrameReport {
    pub fn is_idle(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_gesture_actions() {
        assert_eq!(
            HandGesture::ThumbsUp.action(10),
            InputAction::Scroll { delta: 10 }
        );
        assert_eq!(
            HandGesture::ThumbsDown.action(10),
            InputAction::Scroll { delta: -10 }
        );
    }

    #[test]
    fn test_eyebrow_gesture_actions() {
        assert_eq!(
            EyebrowGesture::ZoomOut.action(),
            InputAction::Hotkey(HotkeyChord::ZOOM_OUT)
        );
        assert_eq!(
            EyebrowGesture::ZoomIn.action(),
            InputAction::Hotkey(HotkeyChord::ZOOM_IN)
        );
    }

    #[test]
    fn test_thumbs_down_never_overflows() {
        assert_eq!(
            HandGesture::ThumbsDown.action(i32::MIN),
            InputAction::Scroll { delta: i32::MAX }
        );
    }

    #[test]
    fn test_default_report_is_idle() {
        assert!(FrameReport::default().is_idle());
    }
}
