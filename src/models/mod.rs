// Data models for camera capture, landmark tracking, gestures and input injection

pub mod capture;
pub mod gesture;
pub mod input;
pub mod pose;
