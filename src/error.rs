//! Error definitions for loading and encoding action spaces.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the loader, registries and encoder can report.
///
/// Load-time variants abort the whole load. `IndexOutOfRange` is the only
/// variant a caller is expected to recover from (clamp or resample).
#[derive(Debug, Error)]
pub enum ActionSpaceError {
    /// A gamepad name was registered twice
    #[error("gamepad '{0}' is already registered")]
    DuplicateGamepad(String),

    /// A gamepad name does not resolve to a registered layout
    #[error("unknown gamepad '{gamepad}'{}", referenced_by_suffix(.game))]
    UnknownGamepad {
        gamepad: String,
        game: Option<String>,
    },

    /// A non-null slot label occurs more than once in one layout
    #[error("gamepad '{gamepad}' declares button '{button}' more than once")]
    DuplicateButton { gamepad: String, button: String },

    /// A game id was added twice
    #[error("game '{0}' is already defined")]
    DuplicateGame(String),

    /// A game id is not part of the action table
    #[error("unknown game '{0}'")]
    UnknownGame(String),

    /// An action references a label that is not a non-null slot of the layout
    #[error("game '{game}' references button '{button}' which gamepad '{gamepad}' does not have")]
    UnknownButton {
        button: String,
        game: String,
        gamepad: String,
    },

    /// Two actions of one game press the same set of buttons
    #[error("game '{game}' action #{index} [{buttons}] duplicates action #{first_index}")]
    DuplicateAction {
        game: String,
        index: usize,
        first_index: usize,
        buttons: String,
    },

    /// A discrete action index outside `[0, len)`
    #[error("action index {index} out of range for game '{game}' ({len} actions)")]
    IndexOutOfRange {
        game: String,
        index: usize,
        len: usize,
    },

    /// Structural violation: missing keys, wrong types, empty lists
    #[error("malformed action configuration: {0}")]
    MalformedConfig(String),

    /// The configuration file could not be read
    #[error("failed to read action configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn referenced_by_suffix(game: &Option<String>) -> String {
    match game {
        Some(game) => format!(" referenced by game '{}'", game),
        None => String::new(),
    }
}

impl ActionSpaceError {
    pub(crate) fn unknown_gamepad(gamepad: impl Into<String>) -> Self {
        Self::UnknownGamepad {
            gamepad: gamepad.into(),
            game: None,
        }
    }

    /// Attaches the referencing game to an `UnknownGamepad` error, other
    /// variants pass through unchanged.
    pub(crate) fn referenced_by(self, game_id: &str) -> Self {
        match self {
            Self::UnknownGamepad { gamepad, .. } => Self::UnknownGamepad {
                gamepad,
                game: Some(game_id.to_string()),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ActionSpaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_gamepad_names_the_game_when_known() {
        let bare = ActionSpaceError::unknown_gamepad("snse");
        assert_eq!(bare.to_string(), "unknown gamepad 'snse'");

        let with_game = ActionSpaceError::unknown_gamepad("snse").referenced_by("GradiusIII-Snes");
        assert_eq!(
            with_game.to_string(),
            "unknown gamepad 'snse' referenced by game 'GradiusIII-Snes'"
        );
    }

    #[test]
    fn referenced_by_leaves_other_variants_alone() {
        let err = ActionSpaceError::UnknownGame("Qbert-Atari2600".into()).referenced_by("x");
        assert!(matches!(err, ActionSpaceError::UnknownGame(ref g) if g == "Qbert-Atari2600"));
    }
}
