// Data structures for camera capture and frame presentation

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// A camera device that can be opened for capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraInfo {
    pub index: u32,
    pub name: String,
    pub description: String,
}

/// One captured camera frame, always stored as packed RGB
#[derive(Debug, Clone)]
pub struct Frame {
    pub timestamp: i64,
    pub image: RgbImage,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            image,
        }
    }

    /// Build a frame from a packed RGB buffer, row-major
    pub fn from_raw(width: u32, height: u32, data: &[u8]) -> CaptureResult<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() < expected {
            return Err(CaptureError::ReadFailed(format!(
                "Frame buffer too small: got {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }

        let image = RgbImage::from_raw(width, height, data[..expected].to_vec()).ok_or_else(|| {
            CaptureError::ReadFailed(format!("Invalid frame size {}x{}", width, height))
        })?;

        Ok(Self::new(image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Flip the frame horizontally so on-screen motion follows the user
    pub fn mirror(&mut self) {
        image::imageops::flip_horizontal_in_place(&mut self.image);
    }

    /// Packed RGB bytes, row-major
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Fill `buffer` with 0RGB words as window surfaces expect
    pub fn write_0rgb(&self, buffer: &mut Vec<u32>) {
        buffer.clear();
        buffer.extend(self.image.pixels().map(|Rgb([r, g, b])| {
            ((*r as u32) << 16) | ((*g as u32) << 8) | (*b as u32)
        }));
    }
}

/// Error types for camera capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Camera not found: {0}")]
    CameraNotFound(u32),

    #[error("Failed to open camera: {0}")]
    OpenFailed(String),

    #[error("Frame read failed: {0}")]
    ReadFailed(String),

    #[error("Camera stream ended")]
    EndOfStream,
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Error types for the preview window
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to create window: {0}")]
    CreateFailed(String),

    #[error("Failed to present frame: {0}")]
    PresentFailed(String),
}

pub type DisplayResult<T> = Result<T, DisplayError>;
