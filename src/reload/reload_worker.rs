//! Background task that reloads the action configuration on request
//!
//! Commands arrive over an mpsc channel, each carrying a oneshot responder.
//! A reload always builds a brand new [`ActionSpaces`] from the file; only a
//! fully validated bundle is swapped in. A failing reload is reported to the
//! caller and the active bundle stays in place.

use super::ActionSpaceHandle;
use crate::error::ActionSpaceError;
use crate::loader::ActionSpaceLoader;
use crate::spaces::ActionSpaces;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{channel, Sender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

macro_rules! respond {
    ($response_tx:expr, $value:expr) => {
        if $response_tx.send($value).is_err() {
            warn!("Reload requester went away before the response was sent");
        }
    };
}

#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The new configuration did not validate; the old one is still active
    #[error("reload rejected: {0}")]
    Load(#[from] ActionSpaceError),

    /// The worker is no longer running
    #[error("reload worker channel closed")]
    ChannelClosed,
}

/// Snapshot of what the worker currently serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadStatus {
    pub generation: u64,
    pub game_count: usize,
    pub loaded_at: DateTime<Utc>,
    pub source: PathBuf,
}

#[derive(Debug)]
pub enum ReloadAction {
    /// Reload from the current source path
    Reload {
        response_tx: oneshot::Sender<Result<ReloadStatus, ReloadError>>,
    },
    /// Reload from `path`; on success it becomes the source path
    ReloadFrom {
        path: PathBuf,
        response_tx: oneshot::Sender<Result<ReloadStatus, ReloadError>>,
    },
    Status {
        response_tx: oneshot::Sender<ReloadStatus>,
    },
}

pub struct ReloadWorker {
    tx: Sender<ReloadAction>,
    worker_handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl ReloadWorker {
    /// Spawns the worker task on the current tokio runtime
    pub fn spawn(
        handle: ActionSpaceHandle,
        loader: ActionSpaceLoader,
        source: PathBuf,
        cancel: CancellationToken,
    ) -> Self {
        let (tx, mut rx) = channel::<ReloadAction>(16);
        let token = cancel.clone();

        let worker_handle = tokio::spawn(async move {
            let mut source = source;
            info!("Reload worker started for {}", source.display());

            loop {
                let action = tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Reload worker cancelled");
                        break;
                    }
                    action = rx.recv() => match action {
                        Some(action) => action,
                        None => break,
                    },
                };

                match action {
                    ReloadAction::Reload { response_tx } => {
                        let result = reload(&handle, &loader, &source).await;
                        respond!(response_tx, result);
                    }
                    ReloadAction::ReloadFrom { path, response_tx } => {
                        let result = reload(&handle, &loader, &path).await;
                        if result.is_ok() {
                            source = path;
                        }
                        respond!(response_tx, result);
                    }
                    ReloadAction::Status { response_tx } => {
                        respond!(response_tx, status(&handle, &source));
                    }
                }
            }

            info!("Reload worker stopped");
        });

        Self {
            tx,
            worker_handle,
            cancel,
        }
    }

    pub fn sender(&self) -> Sender<ReloadAction> {
        self.tx.clone()
    }

    /// Reloads the current source and waits for the outcome
    pub async fn reload(&self) -> Result<ReloadStatus, ReloadError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.tx
            .send(ReloadAction::Reload { response_tx })
            .await
            .map_err(|_| ReloadError::ChannelClosed)?;
        response_rx.await.map_err(|_| ReloadError::ChannelClosed)?
    }

    pub async fn reload_from(&self, path: impl Into<PathBuf>) -> Result<ReloadStatus, ReloadError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.tx
            .send(ReloadAction::ReloadFrom {
                path: path.into(),
                response_tx,
            })
            .await
            .map_err(|_| ReloadError::ChannelClosed)?;
        response_rx.await.map_err(|_| ReloadError::ChannelClosed)?
    }

    pub async fn status(&self) -> Result<ReloadStatus, ReloadError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.tx
            .send(ReloadAction::Status { response_tx })
            .await
            .map_err(|_| ReloadError::ChannelClosed)?;
        response_rx.await.map_err(|_| ReloadError::ChannelClosed)
    }

    /// Cancels the worker and waits for it to finish
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.worker_handle.await {
            error!("Reload worker panicked: {}", e);
        }
    }
}

async fn reload(
    handle: &ActionSpaceHandle,
    loader: &ActionSpaceLoader,
    path: &Path,
) -> Result<ReloadStatus, ReloadError> {
    match ActionSpaces::from_file_async(loader, path).await {
        Ok(spaces) => {
            handle.swap(spaces);
            Ok(status(handle, path))
        }
        Err(e) => {
            error!(
                "Reload of {} failed, keeping generation {}: {}",
                path.display(),
                handle.generation(),
                e
            );
            Err(e.into())
        }
    }
}

fn status(handle: &ActionSpaceHandle, source: &Path) -> ReloadStatus {
    let (generation, current) = handle.snapshot();
    ReloadStatus {
        generation,
        game_count: current.game_count(),
        loaded_at: current.loaded_at(),
        source: source.to_path_buf(),
    }
}
