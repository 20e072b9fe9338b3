//! Compiles validated action specs into discrete action spaces

use super::ButtonMask;
use crate::actions::{ActionTable, GameActionSpec};
use crate::error::{ActionSpaceError, Result};
use crate::gamepad::{GamepadLayout, GamepadRegistry};
use indexmap::IndexMap;
use tracing::debug;

/// Ordered masks of one game; the position is the action index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpace {
    game_id: String,
    gamepad: String,
    masks: Vec<ButtonMask>,
}

impl ActionSpace {
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn gamepad(&self) -> &str {
        &self.gamepad
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Mask for action `index`
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<ButtonMask> {
        self.masks
            .get(index)
            .copied()
            .ok_or_else(|| ActionSpaceError::IndexOutOfRange {
                game: self.game_id.clone(),
                index,
                len: self.masks.len(),
            })
    }

    pub fn masks(&self) -> &[ButtonMask] {
        &self.masks
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ButtonMask)> + '_ {
        self.masks.iter().copied().enumerate()
    }

    /// Action index producing exactly `mask`, if any
    pub fn index_of(&self, mask: ButtonMask) -> Option<usize> {
        self.masks.iter().position(|m| *m == mask)
    }
}

/// Borrows a registry and table and encodes games on demand.
///
/// Encoding is a pure function of the validated inputs: the same spec always
/// yields the same masks in the same order.
#[derive(Debug, Clone, Copy)]
pub struct ActionEncoder<'a> {
    registry: &'a GamepadRegistry,
    table: &'a ActionTable,
}

impl<'a> ActionEncoder<'a> {
    pub fn new(registry: &'a GamepadRegistry, table: &'a ActionTable) -> Self {
        Self { registry, table }
    }

    /// Masks for every action of `game_id`, in declared order
    pub fn encode(&self, game_id: &str) -> Result<Vec<ButtonMask>> {
        let spec = self.table.get(game_id)?;
        let layout = self.layout_for(spec)?;
        encode_spec(layout, spec)
    }

    /// Mask for a single action index of `game_id`
    pub fn decode_index(&self, game_id: &str, index: usize) -> Result<ButtonMask> {
        let spec = self.table.get(game_id)?;
        let action = spec
            .actions
            .get(index)
            .ok_or_else(|| ActionSpaceError::IndexOutOfRange {
                game: game_id.to_string(),
                index,
                len: spec.len(),
            })?;

        let layout = self.layout_for(spec)?;
        let mut mask = ButtonMask::empty(layout.width());
        for button in action.buttons() {
            mask.press(slot_of(layout, spec, button)?);
        }
        Ok(mask)
    }

    /// Action space of `game_id`
    pub fn action_space(&self, game_id: &str) -> Result<ActionSpace> {
        let spec = self.table.get(game_id)?;
        let layout = self.layout_for(spec)?;
        Ok(ActionSpace {
            game_id: spec.game_id.clone(),
            gamepad: layout.name().to_string(),
            masks: encode_spec(layout, spec)?,
        })
    }

    /// Action spaces of all games, in table order
    pub fn encode_all(&self) -> Result<IndexMap<String, ActionSpace>> {
        let mut spaces = IndexMap::with_capacity(self.table.len());
        for game_id in self.table.game_ids() {
            let space = self.action_space(game_id)?;
            debug!(
                "Encoded game '{}': {} actions over {} slots",
                game_id,
                space.len(),
                self.registry.lookup(space.gamepad())?.width()
            );
            spaces.insert(game_id.to_string(), space);
        }
        Ok(spaces)
    }

    fn layout_for(&self, spec: &GameActionSpec) -> Result<&'a GamepadLayout> {
        self.registry
            .lookup(&spec.gamepad_ref)
            .map_err(|e| e.referenced_by(&spec.game_id))
    }
}

fn encode_spec(layout: &GamepadLayout, spec: &GameActionSpec) -> Result<Vec<ButtonMask>> {
    spec.actions
        .iter()
        .map(|action| {
            action
                .buttons()
                .try_fold(ButtonMask::empty(layout.width()), |mask, button| {
                    Ok::<_, ActionSpaceError>(mask.with_pressed(slot_of(layout, spec, button)?))
                })
        })
        .collect()
}

// The loader already guarantees this; specs built by hand go through the same check.
fn slot_of(layout: &GamepadLayout, spec: &GameActionSpec, button: &str) -> Result<usize> {
    layout
        .slot_index(button)
        .ok_or_else(|| ActionSpaceError::UnknownButton {
            button: button.to_string(),
            game: spec.game_id.clone(),
            gamepad: layout.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionDef;

    fn genesis() -> GamepadRegistry {
        let mut registry = GamepadRegistry::new();
        let slots = [
            "B", "A", "MODE", "START", "UP", "DOWN", "LEFT", "RIGHT", "C", "Y", "X", "Z",
        ]
        .iter()
        .map(|s| Some(s.to_string()))
        .collect();
        registry.register("genesis", slots).unwrap();
        registry
    }

    fn columns() -> ActionTable {
        let mut table = ActionTable::new();
        table
            .add(
                "Columns-Genesis",
                GameActionSpec::new(
                    "Columns-Genesis",
                    "genesis",
                    vec![
                        ActionDef::new(["DOWN"]),
                        ActionDef::new(["LEFT"]),
                        ActionDef::new(["RIGHT"]),
                        ActionDef::new(["A"]),
                        ActionDef::new(["RIGHT", "A"]),
                    ],
                ),
            )
            .unwrap();
        table
    }

    #[test]
    fn encodes_in_declared_order() {
        let registry = genesis();
        let table = columns();
        let masks = ActionEncoder::new(&registry, &table)
            .encode("Columns-Genesis")
            .unwrap();

        let slots: Vec<Vec<usize>> = masks.iter().map(|m| m.pressed_slots().collect()).collect();
        assert_eq!(slots, vec![vec![5], vec![6], vec![7], vec![1], vec![1, 7]]);
        assert!(masks.iter().all(|m| m.width() == 12));
    }

    #[test]
    fn decode_index_matches_encode() {
        let registry = genesis();
        let table = columns();
        let encoder = ActionEncoder::new(&registry, &table);
        let masks = encoder.encode("Columns-Genesis").unwrap();
        for (index, mask) in masks.iter().enumerate() {
            assert_eq!(encoder.decode_index("Columns-Genesis", index).unwrap(), *mask);
        }
    }

    #[test]
    fn decode_index_out_of_range() {
        let registry = genesis();
        let table = columns();
        let err = ActionEncoder::new(&registry, &table)
            .decode_index("Columns-Genesis", 5)
            .unwrap_err();
        assert!(matches!(
            err,
            ActionSpaceError::IndexOutOfRange { ref game, index: 5, len: 5 } if game == "Columns-Genesis"
        ));
    }

    #[test]
    fn unknown_game_is_reported() {
        let registry = genesis();
        let table = columns();
        assert!(matches!(
            ActionEncoder::new(&registry, &table).encode("Columns-Snes"),
            Err(ActionSpaceError::UnknownGame(_))
        ));
    }

    #[test]
    fn hand_built_spec_with_foreign_button_fails() {
        let registry = genesis();
        let mut table = ActionTable::new();
        table
            .add(
                "Broken-Genesis",
                GameActionSpec::new("Broken-Genesis", "genesis", vec![ActionDef::new(["L"])]),
            )
            .unwrap();
        assert!(matches!(
            ActionEncoder::new(&registry, &table).encode("Broken-Genesis"),
            Err(ActionSpaceError::UnknownButton { ref button, .. }) if button == "L"
        ));
    }

    #[test]
    fn action_space_reverse_lookup() {
        let registry = genesis();
        let table = columns();
        let space = ActionEncoder::new(&registry, &table)
            .action_space("Columns-Genesis")
            .unwrap();

        let right_a = ButtonMask::empty(12).with_pressed(7).with_pressed(1);
        assert_eq!(space.index_of(right_a), Some(4));
        assert_eq!(space.index_of(ButtonMask::empty(12)), None);
        assert_eq!(space.gamepad(), "genesis");
    }
}
