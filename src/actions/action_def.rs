//! Abstract action and per-game action specification

use std::collections::BTreeSet;
use std::fmt;

/// Buttons pressed together for one decision step.
///
/// Stored as a set: two definitions pressing the same buttons are equal no
/// matter how the configuration ordered them. The empty set is the no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionDef {
    buttons: BTreeSet<String>,
}

impl ActionDef {
    pub fn new<I, S>(buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buttons: buttons.into_iter().map(Into::into).collect(),
        }
    }

    pub fn noop() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &str> {
        self.buttons.iter().map(String::as_str)
    }

    pub fn contains(&self, button: &str) -> bool {
        self.buttons.contains(button)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_noop(&self) -> bool {
        self.buttons.is_empty()
    }
}

impl fmt::Display for ActionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.buttons().collect();
        write!(f, "{}", joined.join(", "))
    }
}

/// Validated action list of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameActionSpec {
    pub game_id: String,
    /// Name of the layout in the [`GamepadRegistry`](crate::gamepad::GamepadRegistry)
    pub gamepad_ref: String,
    /// Declaration order is the discrete action index
    pub actions: Vec<ActionDef>,
}

impl GameActionSpec {
    pub fn new(
        game_id: impl Into<String>,
        gamepad_ref: impl Into<String>,
        actions: Vec<ActionDef>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            gamepad_ref: gamepad_ref.into(),
            actions,
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
