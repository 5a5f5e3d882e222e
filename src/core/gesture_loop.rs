// Capture-classify-act loop
// One synchronous iteration per frame: capture, detect, classify, act, render, poll quit

use crate::core::config::Config;
use crate::core::debounce::{Clock, Debouncer, SystemClock};
use crate::core::gesture_classifier::{
    classify_eyebrow_distance, classify_hand, eyebrow_distance_px, EyebrowThresholds,
};
use crate::core::overlay;
use crate::models::capture::{CaptureError, Frame};
use crate::models::gesture::{EyebrowReading, FrameReport};
use crate::models::pose::LandmarkSet;
use crate::platform::camera::CameraSource;
use crate::platform::display::DisplaySurface;
use crate::platform::input::InputInjector;
use crate::platform::pose::LandmarkDetector;
use std::time::{Duration, Instant};

/// Why the loop stopped. Every variant is a clean shutdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    QuitRequested,
    EndOfStream,
    CameraError(String),
}

impl StopReason {
    pub fn to_string(&self) -> String {
        match self {
            StopReason::QuitRequested => "quit requested".to_string(),
            StopReason::EndOfStream => "end of stream".to_string(),
            StopReason::CameraError(e) => format!("camera error: {}", e),
        }
    }
}

/// Outcome of a single `step`
#[derive(Debug, Clone, PartialEq)]
pub enum LoopControl {
    Continue(FrameReport),
    /// The report is present when the frame was processed before stopping
    Stop(StopReason, Option<FrameReport>),
}

/// Per-iteration knobs taken from `Config`
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSettings {
    pub mirror: bool,
    pub scroll_amount: i32,
    pub thresholds: EyebrowThresholds,
    pub key_poll: Duration,
    pub zoom_debounce: Duration,
}

impl From<&Config> for LoopSettings {
    fn from(config: &Config) -> Self {
        Self {
            mirror: config.mirror,
            scroll_amount: config.scroll_amount,
            thresholds: EyebrowThresholds {
                zoom_out_above: config.zoom_out_threshold_px,
                zoom_in_below: config.zoom_in_threshold_px,
            },
            key_poll: config.key_poll_timeout(),
            zoom_debounce: config.zoom_debounce(),
        }
    }
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

pub struct GestureLoop {
    camera: Box<dyn CameraSource>,
    hand_detector: Box<dyn LandmarkDetector>,
    face_detector: Option<Box<dyn LandmarkDetector>>,
    injector: Box<dyn InputInjector>,
    display: Box<dyn DisplaySurface>,
    clock: Box<dyn Clock>,
    zoom_debouncer: Debouncer,
    settings: LoopSettings,
    released: bool,
}

impl GestureLoop {
    /// Hands-only loop. Add a face detector with `with_face_detector`.
    pub fn new(
        camera: Box<dyn CameraSource>,
        hand_detector: Box<dyn LandmarkDetector>,
        injector: Box<dyn InputInjector>,
        display: Box<dyn DisplaySurface>,
        settings: LoopSettings,
    ) -> Self {
        Self {
            camera,
            hand_detector,
            face_detector: None,
            injector,
            display,
            clock: Box::new(SystemClock),
            zoom_debouncer: Debouncer::new(settings.zoom_debounce),
            settings,
            released: false,
        }
    }

    pub fn with_face_detector(mut self, face_detector: Box<dyn LandmarkDetector>) -> Self {
        self.face_detector = Some(face_detector);
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run one iteration
    pub fn step(&mut self) -> LoopControl {
        let mut frame = match self.camera.read_frame() {
            Ok(frame) => frame,
            Err(CaptureError::EndOfStream) => {
                return LoopControl::Stop(StopReason::EndOfStream, None)
            }
            Err(e) => return LoopControl::Stop(StopReason::CameraError(e.to_string()), None),
        };

        if self.settings.mirror {
            frame.mirror();
        }

        let mut landmarks = detect_or_empty(&mut *self.hand_detector, &frame);
        if let Some(face_detector) = self.face_detector.as_mut() {
            landmarks.extend(detect_or_empty(&mut **face_detector, &frame));
        }

        let now = self.clock.now();
        let mut report = classify_frame(
            &landmarks,
            frame.height(),
            &self.settings,
            &mut self.zoom_debouncer,
            now,
        );
        report.timestamp = frame.timestamp;

        for action in &report.actions {
            match self.injector.perform(action) {
                Ok(()) => tracing::info!(
                    action = %action.to_string(),
                    injector = self.injector.name(),
                    "Input injected"
                ),
                Err(e) => tracing::warn!(error = %e, "Failed to inject input"),
            }
        }
        if !report.is_idle() {
            tracing::debug!(?report, "Frame processed");
        }

        overlay::render(&mut frame, &landmarks, &report);
        if let Err(e) = self.display.present(&frame) {
            tracing::warn!(error = %e, "Failed to present frame");
        }

        if self.display.poll_quit(self.settings.key_poll) {
            LoopControl::Stop(StopReason::QuitRequested, Some(report))
        } else {
            LoopControl::Continue(report)
        }
    }

    /// Step until a stop condition, then release the camera and display
    pub fn run(&mut self) -> StopReason {
        tracing::info!(
            camera = %self.camera.name(),
            hands = self.hand_detector.model().to_string(),
            face_tracking = self.face_detector.is_some(),
            injector = self.injector.name(),
            "Gesture loop started"
        );

        let reason = loop {
            if let LoopControl::Stop(reason, _) = self.step() {
                break reason;
            }
        };

        self.release();
        tracing::info!(reason = %reason.to_string(), "Gesture loop stopped");
        reason
    }

    /// Release the camera and close the display. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.camera.release();
        self.display.close();
    }
}

impl Drop for GestureLoop {
    fn drop(&mut self) {
        self.release();
    }
}

fn detect_or_empty(detector: &mut dyn LandmarkDetector, frame: &Frame) -> Vec<LandmarkSet> {
    detector.detect(frame).unwrap_or_else(|e| {
        tracing::warn!(
            model = detector.model().to_string(),
            error = %e,
            "Landmark detection failed"
        );
        Vec::new()
    })
}

/// Classify every detected subject and decide which actions fire at `now`.
///
/// Each hand fires its own scroll. Zoom candidates from all faces pass
/// through the shared debouncer, so at most one zoom fires per window.
pub fn classify_frame(
    landmarks: &[LandmarkSet],
    frame_height: u32,
    settings: &LoopSettings,
    zoom_debouncer: &mut Debouncer,
    now: Instant,
) -> FrameReport {
    let mut report = FrameReport::default();

    for set in landmarks {
        match set {
            LandmarkSet::Hand(hand) => {
                report.hands_detected += 1;
                if let Some(gesture) = classify_hand(hand) {
                    report.hand_gestures.push(gesture);
                    report.actions.push(gesture.action(settings.scroll_amount));
                }
            }
            LandmarkSet::Face(face) => {
                report.faces_detected += 1;
                let Some(distance_px) = eyebrow_distance_px(face, frame_height) else {
                    continue;
                };

                let candidate = classify_eyebrow_distance(distance_px, &settings.thresholds);
                let fired = candidate.is_some() && zoom_debouncer.try_fire(now);
                if let (Some(gesture), true) = (candidate, fired) {
                    report.actions.push(gesture.action());
                }

                report.eyebrow_readings.push(EyebrowReading {
                    distance_px,
                    candidate,
                    fired,
                });
            }
        }
    }

    report
}
