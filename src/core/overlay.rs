// Debug overlay - landmark skeletons and status text drawn onto the frame

use crate::models::capture::Frame;
use crate::models::gesture::{FrameReport, HandGesture};
use crate::models::pose::{FaceLandmark, FaceMesh, HandPose, LandmarkSet, HAND_CONNECTIONS};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::Rgb;

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);

const TEXT_SCALE: u32 = 2;
const JOINT_RADIUS: i32 = 2;
const GLYPH_SIZE: u32 = 8;

/// Draw every detected subject, then the status lines for this iteration
pub fn render(frame: &mut Frame, landmarks: &[LandmarkSet], report: &FrameReport) {
    for set in landmarks {
        match set {
            LandmarkSet::Hand(hand) => draw_hand(frame, hand),
            LandmarkSet::Face(face) => draw_face(frame, face),
        }
    }
    draw_status(frame, report);
}

pub fn draw_hand(frame: &mut Frame, hand: &HandPose) {
    let (width, height) = (frame.width(), frame.height());

    for (from, to) in HAND_CONNECTIONS {
        if let (Some(a), Some(b)) = (hand.landmark(from), hand.landmark(to)) {
            let (x0, y0) = a.to_pixel(width, height);
            let (x1, y1) = b.to_pixel(width, height);
            draw_line(frame, x0 as i32, y0 as i32, x1 as i32, y1 as i32, WHITE);
        }
    }

    for point in &hand.landmarks {
        let (x, y) = point.to_pixel(width, height);
        fill_square(frame, x as i32, y as i32, JOINT_RADIUS, RED);
    }
}

pub fn draw_face(frame: &mut Frame, face: &FaceMesh) {
    let (width, height) = (frame.width(), frame.height());

    for point in &face.landmarks {
        let (x, y) = point.to_pixel(width, height);
        put_pixel(frame, x as i32, y as i32, WHITE);
    }

    for index in [FaceLandmark::RightEyebrowTop, FaceLandmark::RightEyeTop] {
        if let Some(point) = face.landmark(index) {
            let (x, y) = point.to_pixel(width, height);
            fill_square(frame, x as i32, y as i32, JOINT_RADIUS, CYAN);
        }
    }
}

/// Gesture labels and the raw eyebrow distance.
///
/// With several hands in view every hand scrolls, but only the last
/// classified hand is labelled. The zoom label appears only on frames where
/// the zoom actually fired.
pub fn draw_status(frame: &mut Frame, report: &FrameReport) {
    if let Some(gesture) = report.hand_gestures.last() {
        let color = match gesture {
            HandGesture::ThumbsUp => GREEN,
            HandGesture::ThumbsDown => RED,
        };
        draw_text(frame, 10, 50, gesture.label(), color);
    }

    if let Some(reading) = report.eyebrow_readings.first() {
        let line = format!("Eyebrow distance: {:.1}", reading.distance_px);
        draw_text(frame, 10, 90, &line, YELLOW);

        if let (Some(gesture), true) = (reading.candidate, reading.fired) {
            draw_text(frame, 10, 130, gesture.label(), YELLOW);
        }
    }
}

/// 8x8 bitmap text scaled by `TEXT_SCALE`; `y` is the baseline
pub fn draw_text(frame: &mut Frame, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let glyph_px = (GLYPH_SIZE * TEXT_SCALE) as i32;
    let top = y - glyph_px;

    for (i, c) in text.chars().enumerate() {
        let glyph = match BASIC_FONTS.get(c) {
            Some(glyph) => glyph,
            None => continue,
        };
        let left = x + i as i32 * glyph_px;

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = left + (col * TEXT_SCALE) as i32;
                let py = top + (row as u32 * TEXT_SCALE) as i32;
                for dy in 0..TEXT_SCALE as i32 {
                    for dx in 0..TEXT_SCALE as i32 {
                        put_pixel(frame, px + dx, py + dy, color);
                    }
                }
            }
        }
    }
}

pub fn draw_line(frame: &mut Frame, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let x = x0 as f32 + (x1 - x0) as f32 * t;
        let y = y0 as f32 + (y1 - y0) as f32 * t;
        put_pixel(frame, x.round() as i32, y.round() as i32, color);
    }
}

fn fill_square(frame: &mut Frame, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            put_pixel(frame, x, y, color);
        }
    }
}

/// Writes are clipped to the frame
fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    frame.image.put_pixel(x as u32, y as u32, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gesture::{EyebrowGesture, EyebrowReading};
    use crate::models::pose::{Handedness, Keypoint3D, HAND_LANDMARK_COUNT};
    use image::RgbImage;

    fn blank(width: u32, height: u32) -> Frame {
        Frame::new(RgbImage::new(width, height))
    }

    fn count(frame: &Frame, color: Rgb<u8>) -> usize {
        frame.image.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut frame = blank(20, 20);
        draw_line(&mut frame, 2, 3, 12, 8, WHITE);
        assert_eq!(frame.image.get_pixel(2, 3), &WHITE);
        assert_eq!(frame.image.get_pixel(12, 8), &WHITE);
        assert_eq!(count(&frame, WHITE), 11);
    }

    #[test]
    fn test_drawing_clips_at_edges() {
        let mut frame = blank(10, 10);
        draw_line(&mut frame, -5, -5, 20, 20, WHITE);
        draw_text(&mut frame, -30, 500, "clipped", GREEN);
        assert_eq!(count(&frame, WHITE), 10);
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let mut frame = blank(64, 32);
        draw_text(&mut frame, 0, 20, "A", GREEN);
        assert!(count(&frame, GREEN) > 0);

        let mut blank_text = blank(64, 32);
        draw_text(&mut blank_text, 0, 20, " ", GREEN);
        assert_eq!(count(&blank_text, GREEN), 0);
    }

    #[test]
    fn test_draw_hand_skeleton() {
        let mut frame = blank(100, 100);
        let hand = HandPose {
            handedness: Handedness::Left,
            landmarks: (0..HAND_LANDMARK_COUNT)
                .map(|i| {
                    let x = 0.1 + (i % 5) as f32 * 0.2;
                    let y = 0.1 + (i / 5) as f32 * 0.2;
                    Keypoint3D::new(x, y, 0.0, 1.0)
                })
                .collect(),
            confidence: 1.0,
        };
        draw_hand(&mut frame, &hand);
        assert_eq!(frame.image.get_pixel(10, 10), &RED);
        assert!(count(&frame, WHITE) > 0);
    }

    #[test]
    fn test_status_shows_gesture_and_distance() {
        let mut frame = blank(640, 480);
        let report = FrameReport {
            hand_gestures: vec![HandGesture::ThumbsUp],
            eyebrow_readings: vec![EyebrowReading {
                distance_px: 30.0,
                candidate: Some(EyebrowGesture::ZoomOut),
                fired: true,
            }],
            ..FrameReport::default()
        };
        draw_status(&mut frame, &report);
        assert!(count(&frame, GREEN) > 0);
        assert!(count_in_rows(&frame, YELLOW, ZOOM_ROWS) > 0);
        assert_eq!(count(&frame, RED), 0);
    }

    // Glyph rows of the zoom label drawn with baseline y = 130
    const ZOOM_ROWS: std::ops::Range<u32> = 114..130;

    fn count_in_rows(frame: &Frame, color: Rgb<u8>, rows: std::ops::Range<u32>) -> usize {
        frame
            .image
            .enumerate_pixels()
            .filter(|(_, y, p)| rows.contains(y) && **p == color)
            .count()
    }

    #[test]
    fn test_suppressed_zoom_is_not_labelled() {
        let mut frame = blank(640, 480);
        let report = FrameReport {
            eyebrow_readings: vec![EyebrowReading {
                distance_px: 30.0,
                candidate: Some(EyebrowGesture::ZoomOut),
                fired: false,
            }],
            ..FrameReport::default()
        };
        draw_status(&mut frame, &report);

        // Distance line is still drawn, the zoom label is not
        assert!(count_in_rows(&frame, YELLOW, 74..90) > 0);
        assert_eq!(count_in_rows(&frame, YELLOW, ZOOM_ROWS), 0);
    }

    #[test]
    fn test_last_hand_is_labelled() {
        let mut frame = blank(640, 480);
        let report = FrameReport {
            hand_gestures: vec![HandGesture::ThumbsUp, HandGesture::ThumbsDown],
            ..FrameReport::default()
        };
        draw_status(&mut frame, &report);
        assert!(count(&frame, RED) > 0);
        assert_eq!(count(&frame, GREEN), 0);
    }
}
