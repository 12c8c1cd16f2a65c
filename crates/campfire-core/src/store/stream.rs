// ── Reactive state stream ──
//
// Subscription handle vended by the `Store`.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::state::AppState;

/// A subscription to the store's committed states.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed`](Self::changed) or by converting into a `Stream`. Rapid
/// successive dispatches may be observed as a single change.
pub struct StateStream {
    current: Arc<AppState>,
    receiver: watch::Receiver<Arc<AppState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<AppState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation time or at the last `changed()`.
    pub fn current(&self) -> &Arc<AppState> {
        &self.current
    }

    /// Latest committed snapshot.
    pub fn latest(&self) -> Arc<AppState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the `Store` has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<AppState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Treat the latest committed state as observed without yielding it.
    pub(crate) fn mark_seen(&mut self) {
        self.current = self.receiver.borrow_and_update().clone();
    }

    /// Convert into a `Stream` yielding the current snapshot first, then
    /// one item per observed change.
    pub fn into_stream(self) -> WatchStream<Arc<AppState>> {
        WatchStream::new(self.receiver)
    }
}
