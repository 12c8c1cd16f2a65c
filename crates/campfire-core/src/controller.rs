// ── Controller ──
//
// Async orchestration around the store: owns the API client, runs the
// collection fetches, submits comments, and owns the persistence writer.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use campfire_api::{ApiClient, TransportConfig};

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::model::{Comment, EntityId, Location, NewComment, Partner, Promotion};
use crate::persist::{self, PersistHandle, RehydrateOutcome, Storage};
use crate::store::{Action, AppState, Collection, FavoritesAction, SliceAction, StateStream, Store};

/// Per-collection outcome of [`Controller::refresh_all`].
#[derive(Debug)]
pub struct RefreshReport {
    pub campsites: Result<usize, CoreError>,
    pub comments: Result<usize, CoreError>,
    pub partners: Result<usize, CoreError>,
    pub promotions: Result<usize, CoreError>,
}

impl RefreshReport {
    /// Whether every collection loaded.
    pub fn all_ok(&self) -> bool {
        self.campsites.is_ok()
            && self.comments.is_ok()
            && self.partners.is_ok()
            && self.promotions.is_ok()
    }
}

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Each clone shares the
/// same store, client, and persistence writer.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: CoreConfig,
    api: ApiClient,
    store: Store,
    cancel: CancellationToken,
    persist: Mutex<Option<PersistHandle>>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
    rehydrated: RehydrateOutcome,
}

impl Controller {
    /// Build the client, rehydrate from `storage`, and start the
    /// persistence writer. Returns once the store is ready.
    pub async fn start(config: CoreConfig, storage: Arc<dyn Storage>) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let api = ApiClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_client(config, api, storage).await)
    }

    /// Like [`start`](Self::start) with a pre-built API client.
    pub async fn with_client(
        config: CoreConfig,
        api: ApiClient,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let store = Store::new();
        let key = config.storage_key();
        let rehydrated = persist::rehydrate(&store, storage.as_ref(), &key).await;

        let cancel = CancellationToken::new();
        let handle = persist::spawn_writer(&store, storage, key, cancel.child_token());

        info!(
            base_url = %api.base_url(),
            ?rehydrated,
            "controller started"
        );

        Self {
            inner: Arc::new(ControllerInner {
                config,
                api,
                store,
                cancel,
                persist: Mutex::new(Some(handle)),
                task_handles: Mutex::new(Vec::new()),
                rehydrated,
            }),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// What the startup rehydration found.
    pub fn rehydrated(&self) -> RehydrateOutcome {
        self.inner.rehydrated
    }

    pub fn snapshot(&self) -> Arc<AppState> {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> StateStream {
        self.inner.store.subscribe()
    }

    // ── Fetches ──────────────────────────────────────────────────────

    /// Fetch one collection, emitting `Start` then `Succeed` or `Fail`.
    ///
    /// The failure is recorded in the slice and also returned. Returns the
    /// number of items loaded on success.
    pub async fn refresh<T: Collection>(&self) -> Result<usize, CoreError> {
        let resource = T::RESOURCE;
        let store = &self.inner.store;
        store.dispatch(T::action(SliceAction::Start));

        match self.inner.api.fetch_collection::<T>(resource.path()).await {
            Ok(items) => {
                let count = items.len();
                debug!(%resource, count, "collection loaded");
                store.dispatch(T::action(SliceAction::Succeed(items)));
                Ok(count)
            }
            Err(e) => {
                warn!(
                    %resource,
                    error = %e,
                    transient = e.is_transient(),
                    "collection fetch failed"
                );
                store.dispatch(T::action(SliceAction::Fail(e.to_string())));
                Err(e.into())
            }
        }
    }

    /// Fetch all four collections concurrently. One failure never affects
    /// another collection.
    pub async fn refresh_all(&self) -> RefreshReport {
        let (campsites, comments, partners, promotions) = tokio::join!(
            self.refresh::<Location>(),
            self.refresh::<Comment>(),
            self.refresh::<Partner>(),
            self.refresh::<Promotion>(),
        );
        RefreshReport {
            campsites,
            comments,
            partners,
            promotions,
        }
    }

    /// Run [`refresh_all`](Self::refresh_all) in the background.
    ///
    /// The refresh is never aborted: [`shutdown`](Self::shutdown) waits
    /// for it, so every started fetch settles before the final flush.
    pub async fn spawn_refresh_all(&self) {
        let this = self.clone();
        let handle = tokio::spawn(async move {
            let report = this.refresh_all().await;
            debug!(ok = report.all_ok(), "background refresh complete");
        });

        let mut tasks = self.inner.task_handles.lock().await;
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Validate and submit a comment. On success the server's comment is
    /// appended to the comments collection and returned.
    pub async fn submit_comment(&self, comment: NewComment) -> Result<Comment, CoreError> {
        comment.validate()?;
        let store = &self.inner.store;
        store.dispatch(Action::Comments(SliceAction::Start));

        let body = comment.to_request(Utc::now());
        match self.inner.api.post::<_, Comment>("comments", &body).await {
            Ok(created) => {
                info!(id = %created.id, campsite = %created.campsite_id, "comment posted");
                store.dispatch(Action::Comments(SliceAction::Append(created.clone())));
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "comment submission failed");
                store.dispatch(Action::Comments(SliceAction::Fail(e.to_string())));
                Err(e.into())
            }
        }
    }

    /// Toggle a favorite. Returns whether `id` is a favorite afterwards.
    pub fn toggle_favorite(&self, id: EntityId) -> bool {
        let store = &self.inner.store;
        store.dispatch(Action::Favorites(FavoritesAction::Toggle(id)));
        store.snapshot().favorites.contains(id)
    }

    // ── Persistence lifecycle ────────────────────────────────────────

    /// Write the current state to storage now.
    pub async fn flush(&self) -> Result<(), CoreError> {
        match self.inner.persist.lock().await.as_ref() {
            Some(handle) => handle.flush().await,
            None => Err(CoreError::Shutdown),
        }
    }

    /// Reset the store to defaults and remove the persisted snapshot.
    pub async fn purge(&self) -> Result<(), CoreError> {
        let guard = self.inner.persist.lock().await;
        let handle = guard.as_ref().ok_or(CoreError::Shutdown)?;
        self.inner.store.reset();
        handle.purge().await?;
        info!("persisted state purged");
        Ok(())
    }

    /// Stop writing state changes until [`resume`](Self::resume).
    pub async fn pause(&self) {
        if let Some(handle) = self.inner.persist.lock().await.as_ref() {
            handle.pause();
        }
    }

    pub async fn resume(&self) {
        if let Some(handle) = self.inner.persist.lock().await.as_ref() {
            handle.resume();
        }
    }

    /// Wait for in-flight background fetches, flush the latest state,
    /// then stop the persistence writer.
    pub async fn shutdown(&self) {
        let tasks: Vec<_> = self.inner.task_handles.lock().await.drain(..).collect();
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "background task panicked");
            }
        }

        let handle = self.inner.persist.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.flush().await {
                warn!(error = %e, "final flush failed");
            }
            self.inner.cancel.cancel();
            handle.join().await;
        } else {
            self.inner.cancel.cancel();
        }
        debug!("controller shut down");
    }
}
