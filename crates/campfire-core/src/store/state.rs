// ── Composed application state ──
//
// Four resource slices plus favorites under fixed keys, a closed action
// set, and the `Store` container that serializes dispatches.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::trace;

use super::favorites::{Favorites, FavoritesAction};
use super::slice::{ResourceState, SliceAction};
use super::stream::StateStream;
use crate::model::{Comment, Entity, Location, Partner, Promotion, Resource};

/// Whole-application state. Every field falls back to its default when
/// absent from a persisted snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub campsites: ResourceState<Location>,
    pub comments: ResourceState<Comment>,
    pub partners: ResourceState<Partner>,
    pub promotions: ResourceState<Promotion>,
    pub favorites: Favorites,
}

/// Every transition the store accepts, routed to exactly one slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Campsites(SliceAction<Location>),
    Comments(SliceAction<Comment>),
    Partners(SliceAction<Partner>),
    Promotions(SliceAction<Promotion>),
    Favorites(FavoritesAction),
}

impl Action {
    /// `(slice, transition)` labels for logging.
    pub fn label(&self) -> (&'static str, &'static str) {
        match self {
            Self::Campsites(a) => ("campsites", a.kind()),
            Self::Comments(a) => ("comments", a.kind()),
            Self::Partners(a) => ("partners", a.kind()),
            Self::Promotions(a) => ("promotions", a.kind()),
            Self::Favorites(FavoritesAction::Toggle(_)) => ("favorites", "toggle"),
        }
    }
}

impl AppState {
    /// Apply an action, producing the next state. No slice sees another
    /// slice's action.
    #[must_use]
    pub fn reduce(&self, action: Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::Campsites(a) => next.campsites = self.campsites.reduce(a),
            Action::Comments(a) => next.comments = self.comments.reduce(a),
            Action::Partners(a) => next.partners = self.partners.reduce(a),
            Action::Promotions(a) => next.promotions = self.promotions.reduce(a),
            Action::Favorites(a) => next.favorites = self.favorites.reduce(a),
        }
        next
    }
}

// ── Collection binding ───────────────────────────────────────────────

/// Binds an entity type to its remote resource and its slice.
pub trait Collection: Entity + DeserializeOwned + Clone + Send + Sync + 'static {
    const RESOURCE: Resource;

    /// Wrap a slice transition into a store action.
    fn action(action: SliceAction<Self>) -> Action;

    /// Borrow this collection's slice from the whole state.
    fn slice(state: &AppState) -> &ResourceState<Self>;
}

macro_rules! impl_collection {
    ($ty:ty, $resource:ident, $variant:ident, $field:ident) => {
        impl Collection for $ty {
            const RESOURCE: Resource = Resource::$resource;

            fn action(action: SliceAction<Self>) -> Action {
                Action::$variant(action)
            }

            fn slice(state: &AppState) -> &ResourceState<Self> {
                &state.$field
            }
        }
    };
}

impl_collection!(Location, Campsites, Campsites, campsites);
impl_collection!(Comment, Comments, Comments, comments);
impl_collection!(Partner, Partners, Partners, partners);
impl_collection!(Promotion, Promotions, Promotions, promotions);

// ── Store ────────────────────────────────────────────────────────────

/// Explicit state container shared by every consumer.
///
/// Holds the current `Arc<AppState>` in a `watch` channel: a dispatch
/// runs the reducer under the channel's write lock, so transitions apply
/// one at a time, and subscribers observe each committed state.
///
/// A store starts *not ready*; consumers should render a placeholder
/// until [`wait_ready`](Self::wait_ready) resolves, which happens once
/// the initial rehydration attempt has completed.
pub struct Store {
    state: watch::Sender<Arc<AppState>>,
    ready: watch::Sender<bool>,
}

impl Store {
    /// An empty store awaiting rehydration.
    pub fn new() -> Self {
        let (state, _) = watch::channel(Arc::new(AppState::default()));
        let (ready, _) = watch::channel(false);
        Self { state, ready }
    }

    /// A store initialized from `state` that needs no rehydration.
    pub fn with_state(state: AppState) -> Self {
        let store = Self::new();
        store.rehydrate(state);
        store
    }

    /// Apply one action and notify subscribers.
    pub fn dispatch(&self, action: Action) {
        let (slice, kind) = action.label();
        self.state.send_modify(|current| {
            let next = current.reduce(action);
            *current = Arc::new(next);
        });
        trace!(slice, kind, "action dispatched");
    }

    /// Current state (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<AppState> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    /// Drop all state back to defaults. Readiness is unaffected.
    pub fn reset(&self) {
        self.state.send_replace(Arc::new(AppState::default()));
    }

    // ── Readiness gate ───────────────────────────────────────────────

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Resolve once the initial rehydration attempt has completed.
    pub async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Replace the whole state with a restored one and open the gate.
    pub(crate) fn rehydrate(&self, state: AppState) {
        self.state.send_replace(Arc::new(state));
        self.mark_ready();
    }

    /// Open the gate, keeping the current state.
    pub(crate) fn mark_ready(&self) {
        self.ready.send_replace(true);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
