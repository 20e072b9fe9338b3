//! Registry of named gamepad layouts

use super::GamepadLayout;
use crate::error::{ActionSpaceError, Result};
use indexmap::IndexMap;
use tracing::debug;

/// Owns every known [`GamepadLayout`], keyed by name.
///
/// Filled once by the loader and only read afterwards. Registration order is
/// kept so listings stay stable between runs.
#[derive(Debug, Clone, Default)]
pub struct GamepadRegistry {
    layouts: IndexMap<String, GamepadLayout>,
}

impl GamepadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layout under `name`
    ///
    /// # Errors
    /// `DuplicateGamepad` if the name is taken, plus every error
    /// [`GamepadLayout::new`] reports for the slot list.
    pub fn register(&mut self, name: impl Into<String>, slots: Vec<Option<String>>) -> Result<()> {
        let name = name.into();
        if self.layouts.contains_key(&name) {
            return Err(ActionSpaceError::DuplicateGamepad(name));
        }

        let layout = GamepadLayout::new(name.clone(), slots)?;
        debug!("Registered gamepad '{}' with {} slots", name, layout.width());
        self.layouts.insert(name, layout);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&GamepadLayout> {
        self.layouts
            .get(name)
            .ok_or_else(|| ActionSpaceError::unknown_gamepad(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GamepadLayout> {
        self.layouts.values()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
