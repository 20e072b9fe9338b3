//! Loading and validation of the action configuration
//!
//! Two layers run in order:
//!
//! 1. [`raw`] - structural checks (keys, value types, non-empty lists)
//! 2. [`action_loader`] - semantic checks (gamepad references, buttons, duplicates)
//!
//! ```text
//! YAML ──► RawActionConfig ──► ActionSpaceLoader ──► (GamepadRegistry, ActionTable)
//! ```

pub mod action_loader;
pub mod raw;

pub use action_loader::{load, ActionSpaceLoader, DuplicateActionPolicy};
pub use raw::{RawActionConfig, RawGame};
