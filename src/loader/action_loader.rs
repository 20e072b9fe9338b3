//! Action configuration loader
//!
//! ## Load order
//! Gamepads are registered before any game is looked at, since games only
//! reference layouts by name. Games are then validated one by one:
//! 1. the gamepad reference must resolve
//! 2. every button label must be a pressable slot of that layout
//! 3. no two actions may press the same set of buttons
//!
//! ## Failure semantics
//! The first violation aborts the load. Registry and table are built in
//! locals and only handed out once everything passed, so a caller never sees
//! a partially filled structure.

use super::raw::{RawActionConfig, RawGame};
use crate::actions::{ActionDef, ActionTable, GameActionSpec};
use crate::error::{ActionSpaceError, Result};
use crate::gamepad::{GamepadLayout, GamepadRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// What to do when one game lists the same button set twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateActionPolicy {
    /// Fail the load with `DuplicateAction`
    #[default]
    Reject,
    /// Keep the first occurrence, drop later ones with a warning
    Dedupe,
}

/// Turns raw configuration text into a validated registry and table
#[derive(Debug, Clone, Default)]
pub struct ActionSpaceLoader {
    duplicate_policy: DuplicateActionPolicy,
}

impl ActionSpaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateActionPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicateActionPolicy {
        self.duplicate_policy
    }

    /// Loads from YAML text
    pub fn load_str(&self, source: &str) -> Result<(GamepadRegistry, ActionTable)> {
        let raw = RawActionConfig::parse(source)?;
        self.load_raw(raw)
    }

    /// Reads `path` and loads it
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(GamepadRegistry, ActionTable)> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ActionSpaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read action configuration from {}", path.display());
        self.load_str(&content)
    }

    /// Same as [`load_file`](Self::load_file) but reads through tokio
    pub async fn load_file_async(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(GamepadRegistry, ActionTable)> {
        let path = path.as_ref();
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ActionSpaceError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
        debug!("Read action configuration from {}", path.display());
        self.load_str(&content)
    }

    /// Semantic validation of an already structurally valid document
    pub fn load_raw(&self, raw: RawActionConfig) -> Result<(GamepadRegistry, ActionTable)> {
        let mut registry = GamepadRegistry::new();
        for (name, slots) in raw.gamepads {
            registry.register(name, slots)?;
        }

        let mut table = ActionTable::new();
        for (game_id, game) in raw.games {
            let spec = self.build_game(&registry, &game_id, game)?;
            table.add(game_id, spec)?;
        }

        info!(
            "Loaded action configuration: {} gamepads, {} games",
            registry.len(),
            table.len()
        );
        Ok((registry, table))
    }

    fn build_game(
        &self,
        registry: &GamepadRegistry,
        game_id: &str,
        game: RawGame,
    ) -> Result<GameActionSpec> {
        let layout = registry
            .lookup(&game.gamepad)
            .map_err(|e| e.referenced_by(game_id))?;

        let mut actions = Vec::with_capacity(game.actions.len());
        // button set -> index of its first occurrence in the raw list
        let mut first_seen: HashMap<ActionDef, usize> = HashMap::new();

        for (index, labels) in game.actions.into_iter().enumerate() {
            check_buttons(layout, game_id, &labels)?;

            let label_count = labels.len();
            let action = ActionDef::new(labels);
            if action.len() != label_count {
                debug!(
                    "Game '{}' action #{} repeats a button, treated as [{}]",
                    game_id, index, action
                );
            }

            if let Some(&first_index) = first_seen.get(&action) {
                match self.duplicate_policy {
                    DuplicateActionPolicy::Reject => {
                        return Err(ActionSpaceError::DuplicateAction {
                            game: game_id.to_string(),
                            index,
                            first_index,
                            buttons: action.to_string(),
                        });
                    }
                    DuplicateActionPolicy::Dedupe => {
                        warn!(
                            "Dropping action #{} [{}] of game '{}', duplicates action #{}",
                            index, action, game_id, first_index
                        );
                        continue;
                    }
                }
            }

            first_seen.insert(action.clone(), index);
            actions.push(action);
        }

        Ok(GameActionSpec::new(game_id, layout.name(), actions))
    }
}

fn check_buttons(layout: &GamepadLayout, game_id: &str, labels: &[String]) -> Result<()> {
    match labels.iter().find(|label| !layout.has_button(label)) {
        Some(label) => Err(ActionSpaceError::UnknownButton {
            button: label.clone(),
            game: game_id.to_string(),
            gamepad: layout.name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Loads `source` with the default loader (duplicates rejected)
pub fn load(source: &str) -> Result<(GamepadRegistry, ActionTable)> {
    ActionSpaceLoader::new().load_str(source)
}
