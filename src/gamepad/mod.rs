//! Gamepad hardware model
//!
//! Each supported console exposes a fixed, positional list of button slots.
//! The position of a slot is what an emulator reads, so layouts are kept
//! verbatim, unused slots included.
//!
//! - [`layout`] - a single platform's slot list
//! - [`registry`] - name to layout lookup

pub mod layout;
pub mod registry;

pub use layout::{GamepadLayout, MAX_SLOTS};
pub use registry::GamepadRegistry;
