// Preview window backed by minifb

use crate::models::capture::{DisplayError, DisplayResult, Frame};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Duration;

/// A surface that shows the annotated frame and reports quit requests
pub trait DisplaySurface {
    fn present(&mut self, frame: &Frame) -> DisplayResult<()>;

    /// Wait up to `timeout` for input, then report whether the user asked to quit
    fn poll_quit(&mut self, timeout: Duration) -> bool;

    /// Close the surface. Safe to call more than once.
    fn close(&mut self);
}

pub struct MinifbDisplay {
    title: String,
    quit_key: Key,
    // `None` once closed or after a failed resize
    window: Option<Window>,
    buffer: Vec<u32>,
    closed: bool,
}

impl MinifbDisplay {
    /// Open the preview window at the camera resolution
    pub fn open(title: &str, quit_key: char, width: u32, height: u32) -> DisplayResult<Self> {
        let quit_key = key_for_char(quit_key).ok_or_else(|| {
            DisplayError::CreateFailed(format!("Unsupported quit key: {:?}", quit_key))
        })?;

        let mut display = Self {
            title: title.to_string(),
            quit_key,
            window: None,
            buffer: Vec::new(),
            closed: false,
        };
        display.window_for(width as usize, height as usize)?;
        tracing::info!(title, width, height, "Preview window opened");

        Ok(display)
    }

    /// The open window, recreated when the frame size changes
    fn window_for(&mut self, width: usize, height: usize) -> DisplayResult<&mut Window> {
        let stale = self
            .window
            .as_ref()
            .map_or(true, |w| w.get_size() != (width, height));

        if stale {
            // Drop the old window first; a failed recreate leaves none
            self.window = None;
            let window = Window::new(&self.title, width, height, WindowOptions::default())
                .map_err(|e| DisplayError::CreateFailed(e.to_string()))?;
            self.window = Some(window);
        }

        self.window
            .as_mut()
            .ok_or_else(|| DisplayError::CreateFailed("Window missing".to_string()))
    }
}

impl DisplaySurface for MinifbDisplay {
    fn present(&mut self, frame: &Frame) -> DisplayResult<()> {
        if self.closed {
            return Ok(());
        }

        let (width, height) = (frame.width() as usize, frame.height() as usize);
        let mut buffer = std::mem::take(&mut self.buffer);
        frame.write_0rgb(&mut buffer);

        let result = self
            .window_for(width, height)
            .and_then(|window| {
                window
                    .update_with_buffer(&buffer, width, height)
                    .map_err(|e| DisplayError::PresentFailed(e.to_string()))
            });

        self.buffer = buffer;
        result
    }

    fn poll_quit(&mut self, timeout: Duration) -> bool {
        std::thread::sleep(timeout);

        // Without a window there is nothing left to show or read keys from
        let Some(window) = self.window.as_mut() else {
            return true;
        };

        window.update();
        !window.is_open()
            || window.is_key_down(self.quit_key)
            || window.is_key_pressed(self.quit_key, KeyRepeat::No)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if self.window.take().is_some() {
            tracing::info!(title = %self.title, "Preview window closed");
        }
    }
}

impl Drop for MinifbDisplay {
    fn drop(&mut self) {
        self.close();
    }
}

/// Map an ASCII letter or digit onto the window key it produces
pub fn key_for_char(c: char) -> Option<Key> {
    let key = match c.to_ascii_lowercase() {
        'a' => Key::A,
        'b' => Key::B,
        'c' => Key::C,
        'd' => Key::D,
        'e' => Key::E,
        'f' => Key::F,
        'g' => Key::G,
        'h' => Key::H,
        'i' => Key::I,
        'j' => Key::J,
        'k' => Key::K,
        'l' => Key::L,
        'm' => Key::M,
        'n' => Key::N,
        'o' => Key::O,
        'p' => Key::P,
        'q' => Key::Q,
        'r' => Key::R,
        's' => Key::S,
        't' => Key::T,
        'u' => Key::U,
        'v' => Key::V,
        'w' => Key::W,
        'x' => Key::X,
        'y' => Key::Y,
        'z' => Key::Z,
        '0' => Key::Key0,
        '1' => Key::Key1,
        '2' => Key::Key2,
        '3' => Key::Key3,
        '4' => Key::Key4,
        '5' => Key::Key5,
        '6' => Key::Key6,
        '7' => Key::Key7,
        '8' => Key::Key8,
        '9' => Key::Key9,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_char() {
        assert_eq!(key_for_char('q'), Some(Key::Q));
        assert_eq!(key_for_char('Q'), Some(Key::Q));
        assert_eq!(key_for_char('7'), Some(Key::Key7));
        assert_eq!(key_for_char('-'), None);
    }

    #[test]
    fn test_unsupported_quit_key_is_rejected() {
        assert!(matches!(
            MinifbDisplay::open("test", '!', 64, 48),
            Err(DisplayError::CreateFailed(_))
        ));
    }

    fn without_window() -> MinifbDisplay {
        MinifbDisplay {
            title: "test".to_string(),
            quit_key: Key::Q,
            window: None,
            buffer: Vec::new(),
            closed: false,
        }
    }

    #[test]
    fn test_missing_window_requests_quit() {
        let mut display = without_window();
        assert!(display.poll_quit(Duration::from_millis(1)));
    }

    #[test]
    fn test_closed_display_ignores_frames() {
        let mut display = without_window();
        display.close();
        let frame = Frame::new(image::RgbImage::new(2, 2));
        assert!(display.present(&frame).is_ok());
        assert!(display.poll_quit(Duration::from_millis(1)));
    }
}
