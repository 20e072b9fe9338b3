//! Harness settings
//!
//! Small TOML file next to the other per-user configuration:
//!
//! ```toml
//! action_config = "/srv/retro/actions.yaml"
//! duplicate_policy = "reject"
//! log_level = "info"
//! ```
//!
//! A missing file falls back to defaults so the harness still starts with
//! the bundled action configuration. A file that exists but does not parse
//! is an error.

use crate::loader::{ActionSpaceLoader, DuplicateActionPolicy};
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "retro-actions";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessSettings {
    /// Action configuration file, `None` uses the bundled one
    pub action_config: Option<PathBuf>,
    pub duplicate_policy: DuplicateActionPolicy,
    /// Default tracing level, `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            action_config: None,
            duplicate_policy: DuplicateActionPolicy::Reject,
            log_level: "info".to_string(),
        }
    }
}

impl HarnessSettings {
    /// `<config dir>/retro-actions/settings.toml`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("Could not determine config directory, using current directory");
            PathBuf::from(".")
        });
        path.push(CONFIG_DIR);
        path.push(SETTINGS_FILE);
        path
    }

    /// Reads settings from `path`, defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Settings file {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .map_err(|e| eyre!("Failed to parse settings file {}: {}", path.display(), e))?;
        debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    /// Writes default settings to `path` unless a file is already there
    pub fn ensure_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| eyre!("Failed to serialize default settings: {}", e))?;
        std::fs::write(path, content)
            .wrap_err_with(|| format!("Failed to write settings file {}", path.display()))?;
        info!("Created default settings at {}", path.display());
        Ok(())
    }

    pub fn loader(&self) -> ActionSpaceLoader {
        ActionSpaceLoader::new().with_duplicate_policy(self.duplicate_policy)
    }
}
