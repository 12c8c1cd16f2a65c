// ── Generic fetch-lifecycle slice ──
//
// One `ResourceState<T>` per remote collection. Transitions are pure: each
// returns a fresh state and leaves the receiver untouched. Items live
// behind an `Arc` so states that keep their items share the allocation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Lifecycle of the most recent fetch of a collection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FetchStatus {
    /// No fetch has started since the store was created.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Transitions accepted by a [`ResourceState`].
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T> {
    /// A fetch (or submission) has been issued.
    Start,
    /// The fetch resolved; the collection is replaced wholesale.
    Succeed(Vec<T>),
    /// A submission resolved; the created record is appended.
    Append(T),
    /// The fetch failed with a human-readable message.
    Fail(String),
}

impl<T> SliceAction<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Succeed(_) => "succeed",
            Self::Append(_) => "append",
            Self::Fail(_) => "fail",
        }
    }
}

/// State of one remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState<T> {
    pub status: FetchStatus,
    pub error: Option<String>,
    pub items: Arc<Vec<T>>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            error: None,
            items: Arc::new(Vec::new()),
        }
    }
}

impl<T: Clone> ResourceState<T> {
    /// Apply a transition, producing the next state.
    ///
    /// `Start` and `Fail` keep the current items; `Succeed` replaces them
    /// and `Append` extends a copy of them.
    #[must_use]
    pub fn reduce(&self, action: SliceAction<T>) -> Self {
        match action {
            SliceAction::Start => Self {
                status: FetchStatus::Loading,
                error: None,
                items: Arc::clone(&self.items),
            },
            SliceAction::Succeed(items) => Self {
                status: FetchStatus::Loaded,
                error: None,
                items: Arc::new(items),
            },
            SliceAction::Append(item) => {
                let mut items = Vec::with_capacity(self.items.len() + 1);
                items.extend(self.items.iter().cloned());
                items.push(item);
                Self {
                    status: FetchStatus::Loaded,
                    error: None,
                    items: Arc::new(items),
                }
            }
            SliceAction::Fail(message) => Self {
                status: FetchStatus::Failed,
                error: Some(message),
                items: Arc::clone(&self.items),
            },
        }
    }
}

impl<T> ResourceState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.status == FetchStatus::Failed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
