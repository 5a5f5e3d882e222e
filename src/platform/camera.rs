// Webcam capture backed by nokhwa

use crate::models::capture::{CameraInfo, CaptureError, CaptureResult, Frame};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// A source of camera frames, polled once per loop iteration
pub trait CameraSource {
    /// Block until the next frame is available
    fn read_frame(&mut self) -> CaptureResult<Frame>;

    /// Stop the stream. Safe to call more than once.
    fn release(&mut self);

    fn name(&self) -> String;
}

/// List capture devices the native backend can see
pub fn list_cameras() -> CaptureResult<Vec<CameraInfo>> {
    let cameras = nokhwa::query(ApiBackend::Auto)
        .map_err(|e| CaptureError::OpenFailed(format!("Failed to query cameras: {}", e)))?;

    Ok(cameras
        .into_iter()
        .filter_map(|camera| {
            let index = camera.index().as_index().ok()?;
            Some(CameraInfo {
                index,
                name: camera.human_name(),
                description: camera.description().to_string(),
            })
        })
        .collect())
}

pub struct NokhwaCamera {
    camera: Camera,
    index: u32,
    scratch: Vec<u8>,
    streaming: bool,
}

impl NokhwaCamera {
    pub fn open(index: u32) -> CaptureResult<Self> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);

        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(|e| {
            CaptureError::OpenFailed(format!("Camera {}: {}", index, e))
        })?;
        camera
            .open_stream()
            .map_err(|e| CaptureError::OpenFailed(format!("Camera {} stream: {}", index, e)))?;

        let resolution = camera.resolution();
        tracing::info!(
            index,
            name = %camera.info().human_name(),
            width = resolution.width(),
            height = resolution.height(),
            "Camera opened"
        );

        Ok(Self {
            camera,
            index,
            scratch: Vec::new(),
            streaming: true,
        })
    }
}

impl NokhwaCamera {
    /// Negotiated frame size as (width, height)
    pub fn resolution(&self) -> (u32, u32) {
        let resolution = self.camera.resolution();
        (resolution.width(), resolution.height())
    }
}

impl CameraSource for NokhwaCamera {
    fn read_frame(&mut self) -> CaptureResult<Frame> {
        if !self.streaming {
            return Err(CaptureError::EndOfStream);
        }

        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::ReadFailed(e.to_string()))?;

        let resolution = buffer.resolution();
        let (width, height) = (resolution.width(), resolution.height());
        self.scratch.resize(width as usize * height as usize * 3, 0);

        // Decodes MJPEG/YUYV from the device into packed RGB
        buffer
            .decode_image_to_buffer::<RgbFormat>(&mut self.scratch)
            .map_err(|e| CaptureError::ReadFailed(format!("Decode failed: {}", e)))?;

        Frame::from_raw(width, height, &self.scratch)
    }

    fn release(&mut self) {
        if !self.streaming {
            return;
        }
        self.streaming = false;

        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!(index = self.index, error = %e, "Failed to stop camera stream");
        } else {
            tracing::info!(index = self.index, "Camera released");
        }
    }

    fn name(&self) -> String {
        self.camera.info().human_name()
    }
}

impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        self.release();
    }
}
