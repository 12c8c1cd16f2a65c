// ── Favorites ──
//
// Locally-owned set of campsite ids. Never synced to the service.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::model::EntityId;

/// Transitions accepted by [`Favorites`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesAction {
    Toggle(EntityId),
}

/// Set of favorited campsite ids, in the order they were added.
///
/// Backed by an `IndexSet` for O(1) membership while keeping the persisted
/// form stable across writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: IndexSet<EntityId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new set with `id` removed if present, added otherwise.
    #[must_use]
    pub fn toggled(&self, id: EntityId) -> Self {
        let mut ids = self.ids.clone();
        if !ids.shift_remove(&id) {
            ids.insert(id);
        }
        Self { ids }
    }

    #[must_use]
    pub fn reduce(&self, action: FavoritesAction) -> Self {
        match action {
            FavoritesAction::Toggle(id) => self.toggled(id),
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<EntityId> for Favorites {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
