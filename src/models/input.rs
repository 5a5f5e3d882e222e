// Data models for synthetic input events (scroll and hotkeys)

use serde::{Deserialize, Serialize};

// ==============================================================================
// Input Actions
// ==============================================================================

/// An OS-level input event to inject into the focused application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputAction {
    /// Vertical wheel scroll in notches; positive scrolls up
    Scroll { delta: i32 },
    Hotkey(HotkeyChord),
}

impl InputAction {
    pub fn to_string(&self) -> String {
        match self {
            InputAction::Scroll { delta } => format!("scroll({:+})", delta),
            InputAction::Hotkey(chord) => chord.to_string(),
        }
    }
}

// ==============================================================================
// Hotkey Chords
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyChord {
    pub modifier: Modifier,
    pub key: ChordKey,
}

impl HotkeyChord {
    pub const ZOOM_IN: HotkeyChord = HotkeyChord {
        modifier: Modifier::Control,
        key: ChordKey::Plus,
    };

    pub const ZOOM_OUT: HotkeyChord = HotkeyChord {
        modifier: Modifier::Control,
        key: ChordKey::Minus,
    };

    pub fn to_string(&self) -> String {
        format!("{}+{}", self.modifier.to_string(), self.key.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Control,
}

impl Modifier {
    pub fn to_string(&self) -> &'static str {
        match self {
            Modifier::Control => "Ctrl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordKey {
    Plus,
    Minus,
}

impl ChordKey {
    pub fn to_string(&self) -> &'static str {
        match self {
            ChordKey::Plus => "Plus",
            ChordKey::Minus => "Minus",
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input injection unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to inject {action}: {reason}")]
    InjectionFailed { action: String, reason: String },

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type InputResult<T> = Result<T, InputError>;
