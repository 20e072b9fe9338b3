//! Serde model of the action configuration document
//!
//! Mirrors the file one to one. Typed deserialization with unknown-field
//! rejection plus the label type checks below form the structural validation
//! layer; nothing here knows whether a gamepad or button actually exists.

use crate::error::{ActionSpaceError, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::fmt;
use std::marker::PhantomData;

/// Top level document: `gamepads` and `games`, nothing else
#[derive(Debug, Clone)]
pub struct RawActionConfig {
    /// Layout name to slot labels, `None` for unused slots
    pub gamepads: Vec<(String, Vec<Option<String>>)>,
    pub games: Vec<(String, RawGame)>,
}

#[derive(Debug, Clone)]
pub struct RawGame {
    pub gamepad: String,
    /// One inner list of button labels per action
    pub actions: Vec<Vec<String>>,
}

/// Document as read from YAML. Labels stay untyped values so a bare `null`,
/// number or boolean is not coerced into a label string.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(deserialize_with = "ordered_entries")]
    gamepads: Vec<(String, Vec<Value>)>,
    #[serde(deserialize_with = "ordered_entries")]
    games: Vec<(String, DocumentGame)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentGame {
    gamepad: String,
    actions: Vec<Vec<Value>>,
}

/// Collects a mapping as written, repeated keys included, so the registry and
/// table get to report them instead of a map silently keeping the last one.
fn ordered_entries<'de, D, V>(deserializer: D) -> std::result::Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

impl RawActionConfig {
    pub fn parse(source: &str) -> Result<Self> {
        let document: Document = serde_yaml::from_str(source)
            .map_err(|e| ActionSpaceError::MalformedConfig(e.to_string()))?;
        let raw = Self::from_document(document)?;
        raw.check_structure()?;
        Ok(raw)
    }

    fn from_document(document: Document) -> Result<Self> {
        let gamepads = document
            .gamepads
            .into_iter()
            .map(|(name, slots)| -> Result<(String, Vec<Option<String>>)> {
                let slots = slots
                    .into_iter()
                    .enumerate()
                    .map(|(slot, value)| match value {
                        Value::Null => Ok(None),
                        Value::String(label) => Ok(Some(label)),
                        other => Err(ActionSpaceError::MalformedConfig(format!(
                            "gamepads.{}[{}]: expected a button label or null, found {}",
                            name,
                            slot,
                            value_kind(&other)
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((name, slots))
            })
            .collect::<Result<Vec<_>>>()?;

        let games = document
            .games
            .into_iter()
            .map(|(game_id, game)| -> Result<(String, RawGame)> {
                let actions = game
                    .actions
                    .into_iter()
                    .enumerate()
                    .map(|(index, buttons)| {
                        buttons
                            .into_iter()
                            .map(|value| match value {
                                Value::String(label) => Ok(label),
                                other => Err(ActionSpaceError::MalformedConfig(format!(
                                    "games.{}.actions[{}]: expected button labels, found {}",
                                    game_id,
                                    index,
                                    value_kind(&other)
                                ))),
                            })
                            .collect::<Result<Vec<_>>>()
                    })
                    .collect::<Result<Vec<_>>>()?;
                let raw = RawGame {
                    gamepad: game.gamepad,
                    actions,
                };
                Ok((game_id, raw))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { gamepads, games })
    }

    /// Shape checks serde cannot express: no empty slot or action lists
    fn check_structure(&self) -> Result<()> {
        for (name, slots) in &self.gamepads {
            if slots.is_empty() {
                return Err(ActionSpaceError::MalformedConfig(format!(
                    "gamepads.{}: slot list is empty",
                    name
                )));
            }
        }

        for (game_id, game) in &self.games {
            if game.gamepad.trim().is_empty() {
                return Err(ActionSpaceError::MalformedConfig(format!(
                    "games.{}.gamepad: empty gamepad name",
                    game_id
                )));
            }
            if game.actions.is_empty() {
                return Err(ActionSpaceError::MalformedConfig(format!(
                    "games.{}.actions: action list is empty",
                    game_id
                )));
            }
        }

        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nulls_as_placeholders() {
        let raw = RawActionConfig::parse(
            "gamepads:\n  atari: [BUTTON, null, SELECT]\ngames: {}\n",
        )
        .unwrap();
        assert_eq!(raw.gamepads[0].0, "atari");
        assert_eq!(
            raw.gamepads[0].1,
            vec![Some("BUTTON".to_string()), None, Some("SELECT".to_string())]
        );
    }

    #[test]
    fn missing_key_is_malformed() {
        let err = RawActionConfig::parse("gamepads: {}\n").unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(ref m) if m.contains("games")));
    }

    #[test]
    fn unknown_key_is_malformed() {
        let err = RawActionConfig::parse(
            "gamepads: {}\ngames:\n  Foo-Nes:\n    gamepad: nes\n    actions: [[]]\n    state: Level1\n",
        )
        .unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(ref m) if m.contains("state")));
    }

    #[test]
    fn wrong_value_type_is_malformed() {
        let err = RawActionConfig::parse("gamepads:\n  nes: B\ngames: {}\n").unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(_)));

        let err = RawActionConfig::parse(
            "gamepads: {}\ngames:\n  Foo-Nes:\n    gamepad: nes\n    actions: [A, B]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(_)));
    }

    #[test]
    fn non_string_action_labels_are_malformed() {
        for label in ["null", "~", "true", "7"] {
            let source = format!(
                "gamepads:\n  p: [A, B]\ngames:\n  G:\n    gamepad: p\n    actions: [[], [{}]]\n",
                label
            );
            let err = RawActionConfig::parse(&source).unwrap_err();
            assert!(
                matches!(err, ActionSpaceError::MalformedConfig(ref m) if m.contains("games.G.actions[1]")),
                "{}: {}",
                label,
                err
            );
        }
    }

    #[test]
    fn non_string_slot_labels_are_malformed() {
        let err = RawActionConfig::parse("gamepads:\n  p: [1]\ngames: {}\n").unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(ref m) if m.contains("gamepads.p[0]")));

        let err = RawActionConfig::parse("gamepads:\n  p: [A, true, null]\ngames: {}\n").unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(ref m) if m.contains("gamepads.p[1]")));
    }

    #[test]
    fn quoted_null_is_a_label() {
        let raw = RawActionConfig::parse(
            "gamepads:\n  p: ['null', ~]\ngames:\n  G:\n    gamepad: p\n    actions: [['null']]\n",
        )
        .unwrap();
        assert_eq!(raw.gamepads[0].1, vec![Some("null".to_string()), None]);
        assert_eq!(raw.games[0].1.actions, vec![vec!["null".to_string()]]);
    }

    #[test]
    fn empty_lists_are_malformed() {
        let err = RawActionConfig::parse("gamepads:\n  nes: []\ngames: {}\n").unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(ref m) if m.contains("gamepads.nes")));

        let err = RawActionConfig::parse(
            "gamepads: {}\ngames:\n  Foo-Nes:\n    gamepad: nes\n    actions: []\n",
        )
        .unwrap_err();
        assert!(matches!(err, ActionSpaceError::MalformedConfig(ref m) if m.contains("games.Foo-Nes")));
    }
}
