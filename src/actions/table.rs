//! Game id to action specification table

use super::GameActionSpec;
use crate::error::{ActionSpaceError, Result};
use indexmap::IndexMap;
use tracing::debug;

/// Every game's [`GameActionSpec`], in declaration order.
///
/// Built by the loader and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    games: IndexMap<String, GameActionSpec>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the spec for `game_id`, failing with `DuplicateGame` if present
    pub fn add(&mut self, game_id: impl Into<String>, spec: GameActionSpec) -> Result<()> {
        let game_id = game_id.into();
        if self.games.contains_key(&game_id) {
            return Err(ActionSpaceError::DuplicateGame(game_id));
        }

        debug!(
            "Added game '{}' on gamepad '{}' with {} actions",
            game_id,
            spec.gamepad_ref,
            spec.len()
        );
        self.games.insert(game_id, spec);
        Ok(())
    }

    pub fn get(&self, game_id: &str) -> Result<&GameActionSpec> {
        self.games
            .get(game_id)
            .ok_or_else(|| ActionSpaceError::UnknownGame(game_id.to_string()))
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.games.contains_key(game_id)
    }

    pub fn game_ids(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameActionSpec> {
        self.games.values()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
