// Data models for hand and face landmark tracking

use serde::{Deserialize, Serialize};

// ==============================================================================
// Landmark Set (Unified Detector Result)
// ==============================================================================

/// Landmarks for one detected subject in one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "subject", rename_all = "snake_case")]
pub enum LandmarkSet {
    Hand(HandPose),
    Face(FaceMesh),
}

// ==============================================================================
// Hand Tracking (21 keypoints per hand)
// ==============================================================================

/// Hand pose tracking result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandPose {
    pub handedness: Handedness,
    pub landmarks: Vec<Keypoint3D>, // 21 hand landmarks
    pub confidence: f32,
}

impl HandPose {
    pub fn landmark(&self, index: HandLandmark) -> Option<&Keypoint3D> {
        self.landmarks.get(index as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

/// MediaPipe Hand Landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

pub const HAND_LANDMARK_COUNT: usize = 21;

/// Bone connections of the MediaPipe hand skeleton
pub const HAND_CONNECTIONS: [(HandLandmark, HandLandmark); 21] = {
    use HandLandmark::*;
    [
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        (Wrist, IndexFingerMcp),
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        (RingFingerMcp, PinkyMcp),
        (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

// ==============================================================================
// Face Mesh (468 landmarks, 478 with iris refinement)
// ==============================================================================

/// Facial tracking result using MediaPipe Face Mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceMesh {
    pub landmarks: Vec<Keypoint3D>,
}

impl FaceMesh {
    pub fn landmark(&self, index: FaceLandmark) -> Option<&Keypoint3D> {
        self.landmarks.get(index as usize)
    }
}

/// Face mesh indices read by the eyebrow gesture. "Right" is the subject's right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FaceLandmark {
    RightEyebrowTop = 105,
    RightEyeTop = 159,
}

// ==============================================================================
// Shared: 3D Keypoint
// ==============================================================================

/// A 3D keypoint with confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint3D {
    pub x: f32, // Normalized [0, 1] for image coordinates
    pub y: f32, // Normalized [0, 1] for image coordinates
    pub z: f32, // Depth relative to the wrist (hands) or face centre
    pub confidence: f32,
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            z,
            confidence,
        }
    }

    /// Map normalized coordinates onto a `width` x `height` pixel grid
    pub fn to_pixel(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }
}

// ==============================================================================
// Detector Configuration
// ==============================================================================

/// MediaPipe model types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaPipeModel {
    Hands,    // 21 keypoints per hand
    FaceMesh, // 468 facial landmarks
}

impl MediaPipeModel {
    pub fn to_string(&self) -> &'static str {
        match self {
            MediaPipeModel::Hands => "hands",
            MediaPipeModel::FaceMesh => "face_mesh",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub min_detection_confidence: f32, // default: 0.7
    pub min_tracking_confidence: f32,  // default: 0.7
    pub max_num_hands: u32,
    pub max_num_faces: u32,
    pub refine_face_landmarks: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
            max_num_hands: 2,
            max_num_faces: 1,
            refine_face_landmarks: false,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PoseResult<T> = Result<T, PoseError>;
