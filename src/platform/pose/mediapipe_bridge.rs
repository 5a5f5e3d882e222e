// MediaPipe integration bridge
// Keeps the landmark model behind one interface so the perception engine can be swapped

use crate::models::capture::Frame;
use crate::models::pose::{DetectorConfig, LandmarkSet, MediaPipeModel, PoseResult};

/// A landmark detector for one MediaPipe model.
/// Finding nothing is an empty result, not an error.
pub trait LandmarkDetector {
    /// Load the model
    fn new(model: MediaPipeModel, config: &DetectorConfig) -> PoseResult<Self>
    where
        Self: Sized;

    /// Run inference on an RGB frame
    fn detect(&mut self, frame: &Frame) -> PoseResult<Vec<LandmarkSet>>;

    fn model(&self) -> MediaPipeModel;

    /// Check if the model is loaded
    fn is_initialized(&self) -> bool;

    fn get_model_info(&self) -> String;
}

/// Build the default backend for `model`
pub fn create_detector(
    model: MediaPipeModel,
    config: &DetectorConfig,
) -> PoseResult<Box<dyn LandmarkDetector>> {
    let detector = DefaultMediaPipe::new(model, config)?;
    tracing::info!(model = model.to_string(), info = %detector.get_model_info(), "Landmark detector ready");
    Ok(Box::new(detector))
}

// ==============================================================================
// PyO3 Implementation (Python MediaPipe)
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub mod pyo3_backend {
    use super::*;
    use crate::models::pose::{FaceMesh, HandPose, Handedness, Keypoint3D, PoseError};
    use pyo3::prelude::*;
    use pyo3::types::{PyBytes, PyDict};

    fn py_err(
        kind: fn(String) -> PoseError,
        context: &'static str,
    ) -> impl FnOnce(PyErr) -> PoseError {
        move |e| kind(format!("{}: {}", context, e))
    }

    pub struct PyO3MediaPipe {
        model: MediaPipeModel,
        // mediapipe.solutions.<model> instance
        solution: Py<PyAny>,
        numpy: Py<PyModule>,
        config: DetectorConfig,
    }

    impl LandmarkDetector for PyO3MediaPipe {
        fn new(model: MediaPipeModel, config: &DetectorConfig) -> PoseResult<Self> {
            Python::with_gil(|py| {
                let mediapipe = py.import_bound("mediapipe").map_err(|e| {
                    PoseError::ModelLoadFailed(format!(
                        "Failed to import mediapipe: {}. Make sure Python dependencies are installed (pip install mediapipe numpy)",
                        e
                    ))
                })?;
                let numpy = py
                    .import_bound("numpy")
                    .map_err(py_err(PoseError::ModelLoadFailed, "Failed to import numpy"))?;
                let solutions = mediapipe
                    .getattr("solutions")
                    .map_err(py_err(PoseError::ModelLoadFailed, "Failed to get mediapipe.solutions"))?;

                let kwargs = PyDict::new_bound(py);
                kwargs
                    .set_item("min_detection_confidence", config.min_detection_confidence)
                    .map_err(py_err(PoseError::InvalidConfig, "min_detection_confidence"))?;
                kwargs
                    .set_item("min_tracking_confidence", config.min_tracking_confidence)
                    .map_err(py_err(PoseError::InvalidConfig, "min_tracking_confidence"))?;

                let (module, class) = match model {
                    MediaPipeModel::Hands => {
                        kwargs
                            .set_item("max_num_hands", config.max_num_hands)
                            .map_err(py_err(PoseError::InvalidConfig, "max_num_hands"))?;
                        ("hands", "Hands")
                    }
                    MediaPipeModel::FaceMesh => {
                        kwargs
                            .set_item("max_num_faces", config.max_num_faces)
                            .map_err(py_err(PoseError::InvalidConfig, "max_num_faces"))?;
                        kwargs
                            .set_item("refine_landmarks", config.refine_face_landmarks)
                            .map_err(py_err(PoseError::InvalidConfig, "refine_landmarks"))?;
                        ("face_mesh", "FaceMesh")
                    }
                };

                let solution = solutions
                    .getattr(module)
                    .and_then(|m| m.getattr(class))
                    .and_then(|c| c.call((), Some(&kwargs)))
                    .map_err(|e| {
                        PoseError::ModelLoadFailed(format!(
                            "Failed to create mediapipe.solutions.{}.{}: {}",
                            module, class, e
                        ))
                    })?;

                Ok(Self {
                    model,
                    solution: solution.unbind(),
                    numpy: numpy.unbind(),
                    config: config.clone(),
                })
            })
        }

        fn detect(&mut self, frame: &Frame) -> PoseResult<Vec<LandmarkSet>> {
            Python::with_gil(|py| {
                // (height, width, 3) uint8 view over the RGB bytes
                let bytes = PyBytes::new_bound(py, frame.as_rgb_bytes());
                let image = self
                    .numpy
                    .bind(py)
                    .call_method1("frombuffer", (bytes, "uint8"))
                    .and_then(|a| {
                        a.call_method1("reshape", ((frame.height(), frame.width(), 3),))
                    })
                    .map_err(py_err(PoseError::InferenceFailed, "Failed to build image array"))?;

                let results = self
                    .solution
                    .bind(py)
                    .call_method1("process", (image,))
                    .map_err(py_err(PoseError::InferenceFailed, "MediaPipe inference failed"))?;

                let parsed = match self.model {
                    MediaPipeModel::Hands => Self::parse_hands(&results),
                    MediaPipeModel::FaceMesh => Self::parse_faces(&results),
                };
                parsed.map_err(py_err(PoseError::InferenceFailed, "Failed to read landmarks"))
            })
        }

        fn model(&self) -> MediaPipeModel {
            self.model
        }

        fn is_initialized(&self) -> bool {
            true
        }

        fn get_model_info(&self) -> String {
            format!(
                "PyO3 MediaPipe Bridge (Python backend) - {} (detection {:.2}, tracking {:.2})",
                self.model.to_string(),
                self.config.min_detection_confidence,
                self.config.min_tracking_confidence
            )
        }
    }

    impl PyO3MediaPipe {
        fn parse_landmarks(landmark_list: &Bound<'_, PyAny>) -> PyResult<Vec<Keypoint3D>> {
            landmark_list
                .getattr("landmark")?
                .iter()?
                .map(|lm| -> PyResult<Keypoint3D> {
                    let lm = lm?;
                    Ok(Keypoint3D {
                        x: lm.getattr("x")?.extract()?,
                        y: lm.getattr("y")?.extract()?,
                        z: lm.getattr("z")?.extract()?,
                        confidence: 1.0,
                    })
                })
                .collect()
        }

        fn parse_hands(results: &Bound<'_, PyAny>) -> PyResult<Vec<LandmarkSet>> {
            let hands = results.getattr("multi_hand_landmarks")?;
            if hands.is_none() {
                return Ok(vec![]);
            }
            let handedness = results.getattr("multi_handedness")?;

            let mut sets = Vec::new();
            for (i, hand) in hands.iter()?.enumerate() {
                let landmarks = Self::parse_landmarks(&hand?)?;

                let (label, score) = if handedness.is_none() {
                    ("Right".to_string(), 0.0)
                } else {
                    let classification = handedness
                        .get_item(i)?
                        .getattr("classification")?
                        .get_item(0)?;
                    (
                        classification.getattr("label")?.extract::<String>()?,
                        classification.getattr("score")?.extract::<f32>()?,
                    )
                };

                let handedness = if label == "Left" {
                    Handedness::Left
                } else {
                    Handedness::Right
                };

                sets.push(LandmarkSet::Hand(HandPose {
                    handedness,
                    landmarks,
                    confidence: score,
                }));
            }

            Ok(sets)
        }

        fn parse_faces(results: &Bound<'_, PyAny>) -> PyResult<Vec<LandmarkSet>> {
            let faces = results.getattr("multi_face_landmarks")?;
            if faces.is_none() {
                return Ok(vec![]);
            }

            faces
                .iter()?
                .map(|face| -> PyResult<LandmarkSet> {
                    let landmarks = Self::parse_landmarks(&face?)?;
                    Ok(LandmarkSet::Face(FaceMesh { landmarks }))
                })
                .collect()
        }
    }

    impl Drop for PyO3MediaPipe {
        fn drop(&mut self) {
            Python::with_gil(|py| {
                if let Err(e) = self.solution.bind(py).call_method0("close") {
                    tracing::warn!(error = %e, "Failed to close MediaPipe solution");
                }
            });
        }
    }
}

// ==============================================================================
// Dummy Implementation (for compilation without features)
// ==============================================================================

#[cfg(not(feature = "ml-pyo3"))]
pub struct DummyMediaPipe {
    model: MediaPipeModel,
}

#[cfg(not(feature = "ml-pyo3"))]
impl LandmarkDetector for DummyMediaPipe {
    fn new(model: MediaPipeModel, _config: &DetectorConfig) -> PoseResult<Self> {
        tracing::warn!(
            model = model.to_string(),
            "Using dummy MediaPipe implementation (no inference); enable the 'ml-pyo3' feature for landmark detection"
        );
        Ok(Self { model })
    }

    fn detect(&mut self, _frame: &Frame) -> PoseResult<Vec<LandmarkSet>> {
        Ok(vec![])
    }

    fn model(&self) -> MediaPipeModel {
        self.model
    }

    fn is_initialized(&self) -> bool {
        false
    }

    fn get_model_info(&self) -> String {
        "Dummy MediaPipe (no ML inference - enable 'ml-pyo3' feature)".to_string()
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub type DefaultMediaPipe = pyo3_backend::PyO3MediaPipe;

#[cfg(not(feature = "ml-pyo3"))]
pub type DefaultMediaPipe = DummyMediaPipe;

#[cfg(all(test, not(feature = "ml-pyo3")))]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_dummy_detector_finds_nothing() {
        let mut detector =
            create_detector(MediaPipeModel::Hands, &DetectorConfig::default()).unwrap();
        let frame = Frame::new(RgbImage::new(4, 4));

        assert!(detector.detect(&frame).unwrap().is_empty());
        assert_eq!(detector.model(), MediaPipeModel::Hands);
        assert!(!detector.is_initialized());
    }
}
