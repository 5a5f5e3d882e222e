#![cfg(target_os = "macos")]

use super::{injection_failed, InputInjector};
use crate::models::input::{ChordKey, HotkeyChord, InputAction, InputError, InputResult, Modifier};
use core_graphics::event::{
    CGEvent, CGEventFlags, CGEventTapLocation, CGKeyCode, ScrollEventUnit,
};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

// ANSI virtual keycodes
const KEY_EQUAL: CGKeyCode = 0x18;
const KEY_MINUS: CGKeyCode = 0x1B;

/// CGEvent-based injector. Requires the Accessibility permission.
pub struct MacOSInjector;

impl MacOSInjector {
    pub fn new() -> InputResult<Self> {
        Self::source().map_err(|_| {
            InputError::Unavailable(
                "Failed to create event source; grant Accessibility access".to_string(),
            )
        })?;
        tracing::info!("CGEvent input injector ready");
        Ok(Self)
    }

    fn source() -> Result<CGEventSource, ()> {
        CGEventSource::new(CGEventSourceStateID::HIDSystemState)
    }
}

impl InputInjector for MacOSInjector {
    fn scroll(&mut self, delta: i32) -> InputResult<()> {
        let action = InputAction::Scroll { delta };

        let source = Self::source().map_err(|_| injection_failed(&action, "No event source"))?;
        let event = CGEvent::new_scroll_event(source, ScrollEventUnit::LINE, 1, delta, 0, 0)
            .map_err(|_| injection_failed(&action, "Failed to create scroll event"))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn hotkey(&mut self, chord: HotkeyChord) -> InputResult<()> {
        let action = InputAction::Hotkey(chord);

        let flags = match chord.modifier {
            Modifier::Control => CGEventFlags::CGEventFlagControl,
        };
        let keycode = match chord.key {
            ChordKey::Plus => KEY_EQUAL,
            ChordKey::Minus => KEY_MINUS,
        };

        for keydown in [true, false] {
            let source =
                Self::source().map_err(|_| injection_failed(&action, "No event source"))?;
            let event = CGEvent::new_keyboard_event(source, keycode, keydown)
                .map_err(|_| injection_failed(&action, "Failed to create key event"))?;
            event.set_flags(flags);
            event.post(CGEventTapLocation::HID);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "macos-cgevent"
    }
}
