#![cfg(target_os = "windows")]

use super::{injection_failed, InputInjector};
use crate::models::input::{ChordKey, HotkeyChord, InputAction, InputResult, Modifier};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, MOUSEEVENTF_WHEEL, MOUSEINPUT, VIRTUAL_KEY, VK_CONTROL, VK_OEM_MINUS,
    VK_OEM_PLUS,
};

// One wheel notch
const WHEEL_DELTA: i32 = 120;

/// SendInput-based injector
pub struct WindowsInjector;

impl WindowsInjector {
    pub fn new() -> Self {
        tracing::info!("SendInput input injector ready");
        Self
    }

    fn send(action: &InputAction, inputs: &[INPUT]) -> InputResult<()> {
        let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
        if sent as usize == inputs.len() {
            Ok(())
        } else {
            Err(injection_failed(
                action,
                format!(
                    "SendInput delivered {} of {} events: {}",
                    sent,
                    inputs.len(),
                    windows::core::Error::from_win32()
                ),
            ))
        }
    }

    fn key(vk: VIRTUAL_KEY, up: bool) -> INPUT {
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: vk,
                    wScan: 0,
                    dwFlags: if up { KEYEVENTF_KEYUP } else { KEYBD_EVENT_FLAGS(0) },
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }
}

impl InputInjector for WindowsInjector {
    fn scroll(&mut self, delta: i32) -> InputResult<()> {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: 0,
                    dy: 0,
                    mouseData: delta.saturating_mul(WHEEL_DELTA) as _,
                    dwFlags: MOUSEEVENTF_WHEEL,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };

        Self::send(&InputAction::Scroll { delta }, &[input])
    }

    fn hotkey(&mut self, chord: HotkeyChord) -> InputResult<()> {
        let modifier = match chord.modifier {
            Modifier::Control => VK_CONTROL,
        };
        let key = match chord.key {
            ChordKey::Plus => VK_OEM_PLUS,
            ChordKey::Minus => VK_OEM_MINUS,
        };

        let inputs = [
            Self::key(modifier, false),
            Self::key(key, false),
            Self::key(key, true),
            Self::key(modifier, true),
        ];
        Self::send(&InputAction::Hotkey(chord), &inputs)
    }

    fn name(&self) -> &'static str {
        "windows-sendinput"
    }
}
