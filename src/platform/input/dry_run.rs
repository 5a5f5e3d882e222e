use super::InputInjector;
use crate::models::input::{HotkeyChord, InputAction, InputResult};

/// Logs actions instead of delivering them. Used by `--dry-run`.
#[derive(Debug, Default)]
pub struct DryRunInjector {
    performed: Vec<InputAction>,
}

impl DryRunInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything that would have been injected, oldest first
    pub fn performed(&self) -> &[InputAction] {
        &self.performed
    }
}

impl InputInjector for DryRunInjector {
    fn scroll(&mut self, delta: i32) -> InputResult<()> {
        let action = InputAction::Scroll { delta };
        tracing::info!(action = %action.to_string(), "dry run: input not delivered");
        self.performed.push(action);
        Ok(())
    }

    fn hotkey(&mut self, chord: HotkeyChord) -> InputResult<()> {
        let action = InputAction::Hotkey(chord);
        tracing::info!(action = %action.to_string(), "dry run: input not delivered");
        self.performed.push(action);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_records_in_order() {
        let mut injector = DryRunInjector::new();
        injector.perform(&InputAction::Scroll { delta: 10 }).unwrap();
        injector
            .perform(&InputAction::Hotkey(HotkeyChord::ZOOM_OUT))
            .unwrap();
        injector.scroll(-10).unwrap();

        assert_eq!(
            injector.performed(),
            &[
                InputAction::Scroll { delta: 10 },
                InputAction::Hotkey(HotkeyChord::ZOOM_OUT),
                InputAction::Scroll { delta: -10 },
            ]
        );
        assert_eq!(injector.name(), "dry-run");
    }
}
