// ── Rehydration and background write-through ──
//
// Rehydration runs once, before the store is handed to consumers. After
// that a single writer task mirrors every committed state to storage.
// Control signals (flush, pause, resume, purge) travel on their own
// channel and may carry reply senders, so they never pass through the
// serializable `Action` pipeline.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::snapshot;
use super::storage::Storage;
use crate::error::CoreError;
use crate::store::{AppState, Store};

/// What the initial rehydration attempt found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RehydrateOutcome {
    /// A well-formed snapshot was applied.
    Restored,
    /// Nothing stored under the key; defaults kept.
    Empty,
    /// A blob existed but could not be decoded; defaults kept.
    Discarded,
    /// Storage could not be read; defaults kept.
    Unavailable,
}

/// Load the persisted snapshot into `store` and open its readiness gate.
///
/// Never fails: every problem degrades to the default state and is
/// logged.
pub async fn rehydrate(store: &Store, storage: &dyn Storage, key: &str) -> RehydrateOutcome {
    let outcome = match storage.get_item(key).await {
        Ok(Some(blob)) => match snapshot::decode(&blob) {
            Ok(state) => {
                store.rehydrate(state);
                RehydrateOutcome::Restored
            }
            Err(e) => {
                warn!(key, error = %e, "discarding malformed persisted snapshot");
                RehydrateOutcome::Discarded
            }
        },
        Ok(None) => RehydrateOutcome::Empty,
        Err(e) => {
            warn!(key, error = %e, "persisted snapshot unreadable");
            RehydrateOutcome::Unavailable
        }
    };

    store.mark_ready();
    debug!(key, ?outcome, "rehydration complete");
    outcome
}

// ── Writer ───────────────────────────────────────────────────────────

/// Lifecycle signals for the writer task.
#[derive(Debug)]
pub enum PersistControl {
    /// Write the latest state now and report the result.
    Flush(oneshot::Sender<Result<(), CoreError>>),
    /// Stop writing on change until `Persist` arrives.
    Pause,
    /// Resume writing. Writes the latest state if a change was skipped
    /// while paused.
    Persist,
    /// Remove the stored snapshot and report the result. Changes
    /// committed before the purge are not written back.
    Purge(oneshot::Sender<Result<(), CoreError>>),
}

/// Serializes and stores snapshots, one write at a time.
struct SnapshotWriter {
    storage: Arc<dyn Storage>,
    key: String,
    lock: Mutex<()>,
}

impl SnapshotWriter {
    async fn write(&self, state: &AppState) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        let blob = snapshot::encode(state)?;
        self.storage.set_item(&self.key, blob).await?;
        Ok(())
    }

    /// Write, logging instead of returning failures.
    async fn write_logged(&self, state: &AppState) {
        if let Err(e) = self.write(state).await {
            warn!(key = %self.key, error = %e, "snapshot write failed");
        }
    }

    async fn purge(&self) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        self.storage.remove_item(&self.key).await?;
        Ok(())
    }
}

/// Handle to the background writer task.
pub struct PersistHandle {
    control: mpsc::UnboundedSender<PersistControl>,
    task: JoinHandle<()>,
}

impl PersistHandle {
    /// Write the current state immediately.
    pub async fn flush(&self) -> Result<(), CoreError> {
        self.request(PersistControl::Flush).await
    }

    /// Remove the persisted snapshot.
    pub async fn purge(&self) -> Result<(), CoreError> {
        self.request(PersistControl::Purge).await
    }

    pub fn pause(&self) {
        let _ = self.control.send(PersistControl::Pause);
    }

    pub fn resume(&self) {
        let _ = self.control.send(PersistControl::Persist);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the writer task to exit (after cancellation).
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "persistence task panicked");
        }
    }

    async fn request(
        &self,
        make: fn(oneshot::Sender<Result<(), CoreError>>) -> PersistControl,
    ) -> Result<(), CoreError> {
        let (tx, rx) = oneshot::channel();
        self.control
            .send(make(tx))
            .map_err(|_| CoreError::Shutdown)?;
        rx.await.map_err(|_| CoreError::Shutdown)?
    }
}

/// Spawn the single writer that mirrors `store` into `storage`.
///
/// The state present at spawn time is assumed to be persisted already
/// (it was just rehydrated), so only subsequent changes are written.
/// Bursts of changes coalesce into one write of the latest state.
pub fn spawn_writer(
    store: &Store,
    storage: Arc<dyn Storage>,
    key: impl Into<String>,
    cancel: CancellationToken,
) -> PersistHandle {
    let (control, control_rx) = mpsc::unbounded_channel();
    let writer = SnapshotWriter {
        storage,
        key: key.into(),
        lock: Mutex::new(()),
    };
    let stream = store.subscribe();
    let task = tokio::spawn(writer_task(writer, stream, control_rx, cancel));

    PersistHandle { control, task }
}

async fn writer_task(
    writer: SnapshotWriter,
    mut stream: crate::store::StateStream,
    mut control_rx: mpsc::UnboundedReceiver<PersistControl>,
    cancel: CancellationToken,
) {
    info!(key = %writer.key, "persistence writer started");
    let mut paused = false;
    let mut dirty = false;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            Some(signal) = control_rx.recv() => match signal {
                PersistControl::Flush(reply) => {
                    let result = writer.write(&stream.latest()).await;
                    let _ = reply.send(result);
                }
                PersistControl::Pause => {
                    debug!("persistence paused");
                    paused = true;
                }
                PersistControl::Persist => {
                    debug!("persistence resumed");
                    paused = false;
                    if std::mem::take(&mut dirty) {
                        writer.write_logged(&stream.latest()).await;
                    }
                }
                PersistControl::Purge(reply) => {
                    stream.mark_seen();
                    dirty = false;
                    let _ = reply.send(writer.purge().await);
                }
            },
            changed = stream.changed() => {
                let Some(state) = changed else { break };
                if paused {
                    dirty = true;
                } else {
                    writer.write_logged(&state).await;
                }
            }
        }
    }

    debug!(key = %writer.key, "persistence writer stopped");
}
