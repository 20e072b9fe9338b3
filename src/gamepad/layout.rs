//! Positional button layout of one hardware platform

use crate::error::{ActionSpaceError, Result};
use std::collections::HashSet;

/// Upper bound on slots per layout, one bit per slot in a [`ButtonMask`](crate::encoder::ButtonMask)
pub const MAX_SLOTS: usize = 64;

/// Ordered button slots of one gamepad.
///
/// A `None` slot is a physical position without a usable button. It still
/// counts towards the width and shifts every later slot, but it can never be
/// pressed by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamepadLayout {
    name: String,
    slots: Vec<Option<String>>,
}

impl GamepadLayout {
    /// Builds a layout, rejecting empty or oversized slot lists and repeated labels
    pub fn new(name: impl Into<String>, slots: Vec<Option<String>>) -> Result<Self> {
        let name = name.into();

        if slots.is_empty() {
            return Err(ActionSpaceError::MalformedConfig(format!(
                "gamepad '{}' has no slots",
                name
            )));
        }
        if slots.len() > MAX_SLOTS {
            return Err(ActionSpaceError::MalformedConfig(format!(
                "gamepad '{}' has {} slots, at most {} are supported",
                name,
                slots.len(),
                MAX_SLOTS
            )));
        }

        let mut seen = HashSet::new();
        for label in slots.iter().flatten() {
            if !seen.insert(label.as_str()) {
                return Err(ActionSpaceError::DuplicateButton {
                    gamepad: name,
                    button: label.clone(),
                });
            }
        }

        Ok(Self { name, slots })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slots exactly as configured, placeholders included
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Number of physical slots, which is also the mask width
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Position of a pressable button, `None` for unknown labels
    pub fn slot_index(&self, label: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_deref() == Some(label))
    }

    pub fn has_button(&self, label: &str) -> bool {
        self.slot_index(label).is_some()
    }

    /// Label at `slot`, `None` for placeholders and positions past the end
    pub fn label(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.as_deref())
    }

    /// Pressable buttons in slot order
    pub fn buttons(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|s| s.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atari() -> GamepadLayout {
        let slots = ["BUTTON", "", "SELECT", "RESET", "UP", "DOWN", "LEFT", "RIGHT"]
            .iter()
            .map(|s| (!s.is_empty()).then(|| s.to_string()))
            .collect();
        GamepadLayout::new("atari", slots).unwrap()
    }

    #[test]
    fn placeholder_keeps_its_position() {
        let layout = atari();
        assert_eq!(layout.width(), 8);
        assert_eq!(layout.slots()[1], None);
        assert_eq!(layout.slot_index("SELECT"), Some(2));
        assert_eq!(layout.label(1), None);
        assert_eq!(layout.buttons().count(), 7);
    }

    #[test]
    fn rejects_repeated_label() {
        let slots = vec![Some("A".to_string()), None, Some("A".to_string())];
        let err = GamepadLayout::new("broken", slots).unwrap_err();
        assert!(matches!(
            err,
            ActionSpaceError::DuplicateButton { ref gamepad, ref button }
                if gamepad == "broken" && button == "A"
        ));
    }

    #[test]
    fn repeated_placeholders_are_fine() {
        let slots = vec![None, Some("A".to_string()), None];
        assert!(GamepadLayout::new("sparse", slots).is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_layouts() {
        assert!(matches!(
            GamepadLayout::new("empty", Vec::new()),
            Err(ActionSpaceError::MalformedConfig(_))
        ));

        let wide = (0..=MAX_SLOTS).map(|i| Some(format!("B{}", i))).collect();
        assert!(matches!(
            GamepadLayout::new("wide", wide),
            Err(ActionSpaceError::MalformedConfig(_))
        ));
    }
}
