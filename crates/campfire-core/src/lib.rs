//! Client-side state layer between `campfire-api` and presentation
//! consumers (the CLI).
//!
//! - **[`Controller`]**: Async facade. Rehydrates persisted state at
//!   [`start()`](Controller::start), runs the four collection fetches
//!   concurrently, submits comments, and owns the persistence writer.
//!
//! - **[`Store`]**: Explicit state container. Holds an `Arc<AppState>`
//!   in a `tokio::sync::watch` channel; [`Store::dispatch`] applies one
//!   [`Action`] at a time through the pure reducers and notifies every
//!   [`StateStream`] subscriber.
//!
//! - **Resource slices** ([`ResourceState`]): `Idle → Loading → Loaded |
//!   Failed` lifecycle per collection, plus the [`Favorites`] set.
//!
//! - **Persistence** ([`persist`]): Snapshot codec, the [`Storage`]
//!   trait with file and in-memory backends, rehydration, and a single
//!   background writer.
//!
//! - **Selectors** ([`selectors`]): Pure derived views over an
//!   [`AppState`] snapshot.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod persist;
pub mod selectors;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::CoreConfig;
pub use controller::{Controller, RefreshReport};
pub use error::CoreError;
pub use persist::{FileStorage, MemoryStorage, RehydrateOutcome, Storage, StorageError};
pub use store::{
    Action, AppState, Collection, Favorites, FavoritesAction, FetchStatus, ResourceState,
    SliceAction, StateStream, Store,
};

pub use model::{
    Comment, Entity, EntityId, Featured, Location, NewComment, Partner, Promotion, Resource,
};
