//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the transient pointer state and the key-binding
//! map. It is the only thing that sits between raw window events and the
//! engine's [`execute`](crate::CarouselEngine::execute) method.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::engine::CarouselCommand;

/// Maps physical key strings to [`CarouselCommand`] variants.
///
/// Key strings use the `KeyboardEvent.code` / `winit::keyboard::KeyCode`
/// debug format: `"ArrowLeft"`, `"Minus"`, `"Equal"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`CarouselCommand`] that can be
/// key-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Bring the previous item to the front.
    RotateLeft,
    /// Send the front item to the back.
    RotateRight,
}

impl KeyCommandTag {
    fn to_command(self) -> CarouselCommand {
        match self {
            Self::RotateLeft => CarouselCommand::RotateLeft,
            Self::RotateRight => CarouselCommand::RotateRight,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("ArrowLeft".into(), KeyCommandTag::RotateLeft),
            ("Minus".into(), KeyCommandTag::RotateLeft),
            ("ArrowRight".into(), KeyCommandTag::RotateRight),
            ("Equal".into(), KeyCommandTag::RotateRight),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<CarouselCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: &str) {
        let _ = self.bindings.remove(key);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`CarouselCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("ArrowLeft") {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last cursor position inside the viewport.
    pointer: Option<Vec2>,
    /// Whether the primary button went down inside the viewport.
    primary_down: bool,
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::default()
        }
    }

    /// Current cursor position in physical pixels, if inside the viewport.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeyBindings) {
        self.key_bindings = key_bindings;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<CarouselCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<CarouselCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.pointer = Some(Vec2::new(x, y));
                Some(CarouselCommand::PointerMoved { x, y })
            }
            InputEvent::CursorLeft => {
                self.pointer = None;
                self.primary_down = false;
                Some(CarouselCommand::PointerLeft)
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
        }
    }

    /// A primary press followed by a release inside the viewport is a
    /// click.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<CarouselCommand> {
        if button != MouseButton::Left {
            return None;
        }
        if pressed {
            self.primary_down = true;
            return None;
        }
        let was_down = std::mem::replace(&mut self.primary_down, false);
        was_down.then_some(CarouselCommand::Activate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn default_bindings_rotate_both_ways() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.handle_key_press("ArrowLeft"),
            Some(CarouselCommand::RotateLeft)
        );
        assert_eq!(
            processor.handle_key_press("Minus"),
            Some(CarouselCommand::RotateLeft)
        );
        assert_eq!(
            processor.handle_key_press("ArrowRight"),
            Some(CarouselCommand::RotateRight)
        );
        assert_eq!(processor.handle_key_press("Space"), None);
    }

    #[test]
    fn rebinding_replaces_previous_command() {
        let mut bindings = KeyBindings::default();
        bindings.bind("ArrowLeft", KeyCommandTag::RotateRight);
        bindings.unbind("Minus");
        let processor = InputProcessor::with_key_bindings(bindings);
        assert_eq!(
            processor.handle_key_press("ArrowLeft"),
            Some(CarouselCommand::RotateRight)
        );
        assert_eq!(processor.handle_key_press("Minus"), None);
    }

    #[test]
    fn cursor_movement_is_tracked() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.handle_event(InputEvent::CursorMoved { x: 3.0, y: 4.0 }),
            Some(CarouselCommand::PointerMoved { x: 3.0, y: 4.0 })
        );
        assert_eq!(processor.pointer(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(
            processor.handle_event(InputEvent::CursorLeft),
            Some(CarouselCommand::PointerLeft)
        );
        assert_eq!(processor.pointer(), None);
    }

    #[test]
    fn press_then_release_activates_once() {
        let mut processor = InputProcessor::new();
        assert_eq!(processor.handle_event(left(true)), None);
        assert_eq!(
            processor.handle_event(left(false)),
            Some(CarouselCommand::Activate)
        );
        assert_eq!(processor.handle_event(left(false)), None);
    }

    #[test]
    fn leaving_cancels_pending_click() {
        let mut processor = InputProcessor::new();
        let _ = processor.handle_event(left(true));
        let _ = processor.handle_event(InputEvent::CursorLeft);
        assert_eq!(processor.handle_event(left(false)), None);
    }

    #[test]
    fn secondary_buttons_are_ignored() {
        let mut processor = InputProcessor::new();
        for pressed in [true, false] {
            let event = InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed,
            };
            assert_eq!(processor.handle_event(event), None);
        }
    }

    #[test]
    fn bindings_round_trip_through_toml() {
        let bindings = KeyBindings::default();
        let text = toml::to_string(&bindings).unwrap();
        let back: KeyBindings = toml::from_str(&text).unwrap();
        assert_eq!(back, bindings);
    }
}
