//! Per-game action definitions
//!
//! An action is a set of buttons pressed together. Each game carries an
//! ordered list of them; the position in that list is the index a trained
//! policy refers to, so the order must never change between loads.

pub mod action_def;
pub mod table;

pub use action_def::{ActionDef, GameActionSpec};
pub use table::ActionTable;
