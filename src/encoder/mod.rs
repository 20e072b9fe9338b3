//! Discrete action encoding
//!
//! Turns each game's ordered action list into masks over the gamepad slots:
//!
//! ```text
//! GameActionSpec ──► ActionEncoder ──► ActionSpace (index ──► ButtonMask)
//! ```
//!
//! A controller picks an index, the emulator receives the mask.

pub mod action_encoder;
pub mod mask;

pub use action_encoder::{ActionEncoder, ActionSpace};
pub use mask::ButtonMask;
