//! Keyboard state and the two configurable key bindings.
//!
//! Keys are matched by physical position ([`PhysicalKey`]), so bindings do not
//! move with the keyboard layout.

use std::collections::HashSet;

use orrery_config::InputConfig;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::error::AppError;

/// Minimal description of a key event.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

/// Per-frame keyboard state.
///
/// Forward every [`KeyEvent`] to [`process_event`](Self::process_event), query
/// during the frame, then call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// OS auto-repeat is ignored, so holding a key counts as one press.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.pressed.insert(event.key) {
                    self.just_pressed.insert(event.key);
                }
            }
            ElementState::Released => {
                self.pressed.remove(&event.key);
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&PhysicalKey::Code(key))
    }

    /// True only in the frame the key went down.
    #[must_use]
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&PhysicalKey::Code(key))
    }

    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
    }
}

/// Keys that end the run and capture a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub quit: KeyCode,
    pub capture: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: KeyCode::Escape,
            capture: KeyCode::KeyP,
        }
    }
}

impl KeyBindings {
    /// Resolve the configured key names.
    pub fn from_config(config: &InputConfig) -> Result<Self, AppError> {
        let resolve = |binding: &'static str, name: &str| {
            parse_key_code(name).ok_or_else(|| AppError::UnknownKey {
                binding,
                name: name.to_string(),
            })
        };
        Ok(Self {
            quit: resolve("quit_key", &config.quit_key)?,
            capture: resolve("capture_key", &config.capture_key)?,
        })
    }

    pub fn quit_requested(&self, keyboard: &KeyboardState) -> bool {
        keyboard.just_pressed(self.quit)
    }

    /// Edge-triggered: holding the key yields a single capture.
    pub fn capture_requested(&self, keyboard: &KeyboardState) -> bool {
        keyboard.just_pressed(self.capture)
    }
}

/// Parse a winit [`KeyCode`] variant name such as `"KeyP"` or `"Escape"`.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    Some(match name.trim() {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "F6" => KeyCode::F6,
        "F7" => KeyCode::F7,
        "F8" => KeyCode::F8,
        "F9" => KeyCode::F9,
        "F10" => KeyCode::F10,
        "F11" => KeyCode::F11,
        "F12" => KeyCode::F12,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "PrintScreen" => KeyCode::PrintScreen,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}
