// Gesture classification - fixed geometric predicates over landmark coordinates

use crate::models::gesture::{EyebrowGesture, HandGesture};
use crate::models::pose::{FaceLandmark, FaceMesh, HandLandmark, HandPose};

/// Eyebrow-to-eye distance band, in pixels. Distances inside
/// `[zoom_in_below, zoom_out_above]` are neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyebrowThresholds {
    pub zoom_out_above: f32,
    pub zoom_in_below: f32,
}

impl Default for EyebrowThresholds {
    fn default() -> Self {
        Self {
            zoom_out_above: 25.0,
            zoom_in_below: 10.0,
        }
    }
}

/// Classify thumb orientation for one detected hand
pub fn classify_hand(hand: &HandPose) -> Option<HandGesture> {
    let thumb_tip = hand.landmark(HandLandmark::ThumbTip)?;
    let index_mcp = hand.landmark(HandLandmark::IndexFingerMcp)?;
    let pinky_tip = hand.landmark(HandLandmark::PinkyTip)?;

    classify_thumb(thumb_tip.y, index_mcp.y, pinky_tip.y)
}

/// Thumb above both reference points is thumbs-up, below both is thumbs-down.
/// Image y grows downwards. Ties and in-between positions give no gesture.
pub fn classify_thumb(thumb_y: f32, index_mcp_y: f32, pinky_y: f32) -> Option<HandGesture> {
    if thumb_y < index_mcp_y && thumb_y < pinky_y {
        Some(HandGesture::ThumbsUp)
    } else if thumb_y > index_mcp_y && thumb_y > pinky_y {
        Some(HandGesture::ThumbsDown)
    } else {
        None
    }
}

/// Vertical gap between the right eyebrow top and the right eye top, in pixels
pub fn eyebrow_distance_px(face: &FaceMesh, frame_height: u32) -> Option<f32> {
    let eyebrow_top = face.landmark(FaceLandmark::RightEyebrowTop)?;
    let eye_top = face.landmark(FaceLandmark::RightEyeTop)?;

    let height = frame_height as f32;
    Some(eye_top.y * height - eyebrow_top.y * height)
}

pub fn classify_eyebrow_distance(
    distance_px: f32,
    thresholds: &EyebrowThresholds,
) -> Option<EyebrowGesture> {
    if distance_px > thresholds.zoom_out_above {
        Some(EyebrowGesture::ZoomOut)
    } else if distance_px < thresholds.zoom_in_below {
        Some(EyebrowGesture::ZoomIn)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pose::{Handedness, Keypoint3D, HAND_LANDMARK_COUNT};

    fn hand(thumb_y: f32, index_mcp_y: f32, pinky_y: f32) -> HandPose {
        let mut landmarks = vec![Keypoint3D::new(0.5, 0.5, 0.0, 1.0); HAND_LANDMARK_COUNT];
        landmarks[HandLandmark::ThumbTip as usize].y = thumb_y;
        landmarks[HandLandmark::IndexFingerMcp as usize].y = index_mcp_y;
        landmarks[HandLandmark::PinkyTip as usize].y = pinky_y;
        HandPose {
            handedness: Handedness::Right,
            landmarks,
            confidence: 0.9,
        }
    }

    fn face(eyebrow_y: f32, eye_y: f32) -> FaceMesh {
        let mut landmarks = vec![Keypoint3D::new(0.5, 0.5, 0.0, 1.0); 468];
        landmarks[FaceLandmark::RightEyebrowTop as usize].y = eyebrow_y;
        landmarks[FaceLandmark::RightEyeTop as usize].y = eye_y;
        FaceMesh { landmarks }
    }

    #[test]
    fn test_thumbs_up() {
        assert_eq!(classify_hand(&hand(0.10, 0.40, 0.45)), Some(HandGesture::ThumbsUp));
    }

    #[test]
    fn test_thumbs_down() {
        assert_eq!(classify_hand(&hand(0.50, 0.20, 0.25)), Some(HandGesture::ThumbsDown));
    }

    #[test]
    fn test_thumb_between_references_is_no_gesture() {
        assert_eq!(classify_hand(&hand(0.30, 0.20, 0.40)), None);
        assert_eq!(classify_hand(&hand(0.30, 0.40, 0.20)), None);
    }

    #[test]
    fn test_thumb_ties_are_no_gesture() {
        assert_eq!(classify_thumb(0.20, 0.20, 0.40), None);
        assert_eq!(classify_thumb(0.40, 0.20, 0.40), None);
        assert_eq!(classify_thumb(0.30, 0.30, 0.30), None);
    }

    #[test]
    fn test_incomplete_hand_is_no_gesture() {
        let mut partial = hand(0.10, 0.40, 0.45);
        partial.landmarks.truncate(HandLandmark::PinkyTip as usize);
        assert_eq!(classify_hand(&partial), None);
    }

    #[test]
    fn test_eyebrow_distance_in_pixels() {
        // 0.30 * 100 - 0.25 * 100
        let distance = eyebrow_distance_px(&face(0.25, 0.30), 100).unwrap();
        assert!((distance - 5.0).abs() < 1e-4);

        let distance = eyebrow_distance_px(&face(0.40, 0.50), 480).unwrap();
        assert!((distance - 48.0).abs() < 1e-3);
    }

    #[test]
    fn test_eyebrow_distance_missing_points() {
        let mesh = FaceMesh {
            landmarks: vec![Keypoint3D::new(0.5, 0.5, 0.0, 1.0); 100],
        };
        assert_eq!(eyebrow_distance_px(&mesh, 480), None);
    }

    #[test]
    fn test_eyebrow_bands() {
        let thresholds = EyebrowThresholds::default();
        assert_eq!(
            classify_eyebrow_distance(30.0, &thresholds),
            Some(EyebrowGesture::ZoomOut)
        );
        assert_eq!(
            classify_eyebrow_distance(5.0, &thresholds),
            Some(EyebrowGesture::ZoomIn)
        );
        assert_eq!(classify_eyebrow_distance(-3.0, &thresholds), Some(EyebrowGesture::ZoomIn));
    }

    #[test]
    fn test_eyebrow_neutral_band_is_inclusive() {
        let thresholds = EyebrowThresholds::default();
        for distance in [10.0, 10.5, 17.0, 24.9, 25.0] {
            assert_eq!(classify_eyebrow_distance(distance, &thresholds), None);
        }
    }
}
