// Synthetic input injection - scroll wheel and hotkey chords

use crate::models::input::{HotkeyChord, InputAction, InputError, InputResult};

pub mod dry_run;
pub use dry_run::DryRunInjector;

#[cfg(target_os = "linux")]
pub mod injector_linux;
#[cfg(target_os = "linux")]
pub use injector_linux::X11Injector;

#[cfg(target_os = "windows")]
pub mod injector_windows;
#[cfg(target_os = "windows")]
pub use injector_windows::WindowsInjector;

#[cfg(target_os = "macos")]
pub mod injector_macos;
#[cfg(target_os = "macos")]
pub use injector_macos::MacOSInjector;

/// Delivers input events to whichever application holds OS focus
pub trait InputInjector {
    /// Scroll the vertical wheel by `delta` notches; positive scrolls up
    fn scroll(&mut self, delta: i32) -> InputResult<()>;

    /// Press and release a modifier + key chord
    fn hotkey(&mut self, chord: HotkeyChord) -> InputResult<()>;

    fn name(&self) -> &'static str;

    fn perform(&mut self, action: &InputAction) -> InputResult<()> {
        match action {
            InputAction::Scroll { delta } => self.scroll(*delta),
            InputAction::Hotkey(chord) => self.hotkey(*chord),
        }
    }
}

/// Get the native injector for the current platform
pub fn get_input_injector() -> InputResult<Box<dyn InputInjector>> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(X11Injector::new()?))
    }

    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(WindowsInjector::new()))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(MacOSInjector::new()?))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        Err(InputError::NotSupported)
    }
}

pub(crate) fn injection_failed(action: &InputAction, reason: impl Into<String>) -> InputError {
    InputError::InjectionFailed {
        action: action.to_string(),
        reason: reason.into(),
    }
}
