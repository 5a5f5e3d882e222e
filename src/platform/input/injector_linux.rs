#![cfg(target_os = "linux")]

use super::{injection_failed, InputInjector};
use crate::models::input::{ChordKey, HotkeyChord, InputAction, InputError, InputResult, Modifier};
use std::os::raw::{c_int, c_uint};
use std::ptr;
use x11::keysym::{XK_Control_L, XK_KP_Add, XK_KP_Subtract, XK_minus, XK_plus};
use x11::xlib::{Display, XCloseDisplay, XFlush, XKeysymToKeycode, XOpenDisplay};
use x11::xtest::{XTestFakeButtonEvent, XTestFakeKeyEvent, XTestQueryExtension};

// Core protocol wheel buttons
const BUTTON_WHEEL_UP: c_uint = 4;
const BUTTON_WHEEL_DOWN: c_uint = 5;

/// Display server the session is running under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    X11,
    Wayland,
    Unknown,
}

impl DisplayServer {
    pub fn detect() -> Self {
        // XWayland also sets DISPLAY, so check Wayland first
        if std::env::var("WAYLAND_DISPLAY").is_ok() {
            DisplayServer::Wayland
        } else if std::env::var("DISPLAY").is_ok() {
            DisplayServer::X11
        } else {
            DisplayServer::Unknown
        }
    }
}

/// XTest-based injector. Holds one display connection for its lifetime.
pub struct X11Injector {
    display: *mut Display,
}

impl X11Injector {
    pub fn new() -> InputResult<Self> {
        match DisplayServer::detect() {
            DisplayServer::Wayland => tracing::warn!(
                "Wayland session detected; injected input only reaches XWayland clients"
            ),
            DisplayServer::Unknown => {
                return Err(InputError::Unavailable(
                    "No display server found (DISPLAY is not set)".to_string(),
                ))
            }
            DisplayServer::X11 => {}
        }

        let display = unsafe { XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(InputError::Unavailable(
                "Failed to open X display".to_string(),
            ));
        }

        let (mut event_base, mut error_base, mut major, mut minor): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        let has_xtest = unsafe {
            XTestQueryExtension(
                display,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if has_xtest == 0 {
            unsafe { XCloseDisplay(display) };
            return Err(InputError::Unavailable(
                "XTest extension is not available".to_string(),
            ));
        }

        tracing::info!(major, minor, "XTest input injector ready");
        Ok(Self { display })
    }

    fn keycode(&self, primary: c_uint, fallback: c_uint) -> Option<c_uint> {
        [primary, fallback].into_iter().find_map(|keysym| {
            let code = unsafe { XKeysymToKeycode(self.display, keysym as _) };
            (code != 0).then_some(code as c_uint)
        })
    }

    fn flush(&self) {
        unsafe {
            XFlush(self.display);
        }
    }
}

impl InputInjector for X11Injector {
    fn scroll(&mut self, delta: i32) -> InputResult<()> {
        let button = if delta >= 0 {
            BUTTON_WHEEL_UP
        } else {
            BUTTON_WHEEL_DOWN
        };

        // One click per notch
        for _ in 0..delta.unsigned_abs() {
            let ok = unsafe {
                XTestFakeButtonEvent(self.display, button, 1, 0) != 0
                    && XTestFakeButtonEvent(self.display, button, 0, 0) != 0
            };
            if !ok {
                return Err(injection_failed(
                    &InputAction::Scroll { delta },
                    "XTestFakeButtonEvent rejected the event",
                ));
            }
        }

        self.flush();
        Ok(())
    }

    fn hotkey(&mut self, chord: HotkeyChord) -> InputResult<()> {
        let action = InputAction::Hotkey(chord);

        let modifier = match chord.modifier {
            Modifier::Control => self.keycode(XK_Control_L, XK_Control_L),
        }
        .ok_or_else(|| injection_failed(&action, "No keycode for modifier"))?;

        let key = match chord.key {
            ChordKey::Plus => self.keycode(XK_plus, XK_KP_Add),
            ChordKey::Minus => self.keycode(XK_minus, XK_KP_Subtract),
        }
        .ok_or_else(|| injection_failed(&action, "No keycode for key"))?;

        let ok = unsafe {
            XTestFakeKeyEvent(self.display, modifier, 1, 0) != 0
                && XTestFakeKeyEvent(self.display, key, 1, 0) != 0
                && XTestFakeKeyEvent(self.display, key, 0, 0) != 0
                && XTestFakeKeyEvent(self.display, modifier, 0, 0) != 0
        };

        self.flush();
        if ok {
            Ok(())
        } else {
            Err(injection_failed(&action, "XTestFakeKeyEvent rejected the event"))
        }
    }

    fn name(&self) -> &'static str {
        "x11-xtest"
    }
}

impl Drop for X11Injector {
    fn drop(&mut self) {
        unsafe {
            XCloseDisplay(self.display);
        }
    }
}
