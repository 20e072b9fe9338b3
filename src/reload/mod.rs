//! Hot reload of the action configuration
//!
//! ```text
//! ReloadAction ──► ReloadWorker ──► ActionSpaces::from_file_async ──► ActionSpaceHandle::swap
//!                                                                         │
//!                                            readers ◄── current()/subscribe()
//! ```
//!
//! - [`space_handle`] - lock-free read access and atomic swap
//! - [`reload_worker`] - async command loop that rebuilds and swaps

pub mod reload_worker;
pub mod space_handle;

pub use reload_worker::{ReloadAction, ReloadError, ReloadStatus, ReloadWorker};
pub use space_handle::ActionSpaceHandle;
