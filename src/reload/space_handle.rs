//! Shared, atomically swappable access to the active action spaces

use crate::spaces::ActionSpaces;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Hands out the active [`ActionSpaces`] to any number of readers.
///
/// # Consistency
///
/// Readers receive an `Arc` to a complete, validated bundle. A swap replaces
/// the whole bundle at once, so a reader sees either the old or the new
/// configuration, never a mix. Readers holding an old `Arc` keep using it
/// until they ask again.
///
/// # Threading Model
///
/// Built on a `tokio::sync::watch` channel. Readers only hold its internal
/// read guard long enough to clone the `Arc`, and the handle is cheap to
/// clone into worker tasks. The generation is bumped under the channel's
/// write guard, so [`snapshot`](Self::snapshot) always pairs a bundle with
/// its own generation.
#[derive(Clone, Debug)]
pub struct ActionSpaceHandle {
    sender: Arc<watch::Sender<Arc<ActionSpaces>>>,
    generation: Arc<AtomicU64>,
}

impl ActionSpaceHandle {
    pub fn new(spaces: ActionSpaces) -> Self {
        let (sender, _) = watch::channel(Arc::new(spaces));
        Self {
            sender: Arc::new(sender),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Currently active bundle
    pub fn current(&self) -> Arc<ActionSpaces> {
        self.sender.borrow().clone()
    }

    /// Receiver that is notified on every swap
    pub fn subscribe(&self) -> watch::Receiver<Arc<ActionSpaces>> {
        debug!("New subscriber to action spaces");
        self.sender.subscribe()
    }

    /// Active bundle together with the generation it was swapped in as
    pub fn snapshot(&self) -> (u64, Arc<ActionSpaces>) {
        let current = self.sender.borrow();
        (self.generation.load(Ordering::SeqCst), current.clone())
    }

    /// Replaces the active bundle and returns the new generation
    pub fn swap(&self, spaces: ActionSpaces) -> u64 {
        let game_count = spaces.game_count();
        let spaces = Arc::new(spaces);
        let mut generation = 0;
        self.sender.send_modify(|current| {
            *current = spaces;
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        });
        info!(
            "Swapped in action spaces generation {} ({} games)",
            generation, game_count
        );
        generation
    }

    /// Number of swaps since construction
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
