//! Action-space constraints for emulator-driven agent training
//!
//! Loads a per-game list of legal button combinations, validates it against
//! the gamepad layouts of the emulated consoles and compiles it into discrete
//! action spaces a controller can index into.
//!
//! ```text
//! actions.yaml ──► loader ──► GamepadRegistry + ActionTable ──► encoder ──► ActionSpace
//! ```
//!
//! Everything built from one configuration is immutable and bundled in
//! [`ActionSpaces`]; [`reload`] swaps whole bundles for running harnesses.

pub mod actions;
pub mod config;
pub mod encoder;
pub mod error;
pub mod gamepad;
pub mod loader;
pub mod reload;
pub mod spaces;

pub use actions::{ActionDef, ActionTable, GameActionSpec};
pub use config::HarnessSettings;
pub use encoder::{ActionEncoder, ActionSpace, ButtonMask};
pub use error::{ActionSpaceError, Result};
pub use gamepad::{GamepadLayout, GamepadRegistry};
pub use loader::{load, ActionSpaceLoader, DuplicateActionPolicy};
pub use spaces::{ActionSpaces, DEFAULT_ACTION_CONFIG};
