//! Immutable bundle of everything a controller needs
//!
//! [`ActionSpaces`] owns the registry, the table and every game's encoded
//! space. It is built in one go, never mutated, and shared behind an `Arc`.
//! Replacing the configuration means building a new bundle and swapping the
//! `Arc` (see [`crate::reload`]).

use crate::actions::ActionTable;
use crate::encoder::{ActionEncoder, ActionSpace, ButtonMask};
use crate::error::{ActionSpaceError, Result};
use crate::gamepad::{GamepadLayout, GamepadRegistry};
use crate::loader::ActionSpaceLoader;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::path::Path;

/// Bundled configuration with the four console layouts and a curated game set
pub const DEFAULT_ACTION_CONFIG: &str = include_str!("../config/actions.yaml");

#[derive(Debug, Clone)]
pub struct ActionSpaces {
    registry: GamepadRegistry,
    table: ActionTable,
    spaces: IndexMap<String, ActionSpace>,
    loaded_at: DateTime<Utc>,
}

impl ActionSpaces {
    /// Encodes every game of an already validated registry and table
    pub fn build(registry: GamepadRegistry, table: ActionTable) -> Result<Self> {
        let spaces = ActionEncoder::new(&registry, &table).encode_all()?;
        Ok(Self {
            registry,
            table,
            spaces,
            loaded_at: Utc::now(),
        })
    }

    pub fn from_source(loader: &ActionSpaceLoader, source: &str) -> Result<Self> {
        let (registry, table) = loader.load_str(source)?;
        Self::build(registry, table)
    }

    pub fn from_file(loader: &ActionSpaceLoader, path: impl AsRef<Path>) -> Result<Self> {
        let (registry, table) = loader.load_file(path)?;
        Self::build(registry, table)
    }

    pub async fn from_file_async(
        loader: &ActionSpaceLoader,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let (registry, table) = loader.load_file_async(path).await?;
        Self::build(registry, table)
    }

    /// Loads [`DEFAULT_ACTION_CONFIG`]
    pub fn bundled(loader: &ActionSpaceLoader) -> Result<Self> {
        Self::from_source(loader, DEFAULT_ACTION_CONFIG)
    }

    pub fn get_action_space(&self, game_id: &str) -> Result<&ActionSpace> {
        self.spaces
            .get(game_id)
            .ok_or_else(|| ActionSpaceError::UnknownGame(game_id.to_string()))
    }

    /// Mask for action `index` of `game_id`
    pub fn decode_index(&self, game_id: &str, index: usize) -> Result<ButtonMask> {
        self.get_action_space(game_id)?.get(index)
    }

    /// Layout a game's masks are laid out over
    pub fn layout_for(&self, game_id: &str) -> Result<&GamepadLayout> {
        let space = self.get_action_space(game_id)?;
        self.registry.lookup(space.gamepad())
    }

    pub fn registry(&self) -> &GamepadRegistry {
        &self.registry
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    pub fn spaces(&self) -> impl Iterator<Item = &ActionSpace> {
        self.spaces.values()
    }

    pub fn game_count(&self) -> usize {
        self.spaces.len()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
