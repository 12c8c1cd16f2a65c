//! Derived view queries.
//!
//! Pure functions over store state, recomputed on every read. None of
//! them allocate more than the returned `Vec` or reorder their input.

use crate::model::{Comment, EntityId, Featured, Location, Partner, Promotion};
use crate::store::{AppState, Favorites, FetchStatus, ResourceState};

/// First entity flagged as featured, if any.
pub fn featured<T: Featured>(items: &[T]) -> Option<&T> {
    items.iter().find(|item| item.is_featured())
}

/// Comments on one campsite, in collection order.
///
/// Not sorted by date; callers that need chronological order sort the
/// result themselves.
pub fn comments_for(comments: &[Comment], location: EntityId) -> Vec<&Comment> {
    comments
        .iter()
        .filter(|c| c.campsite_id == location)
        .collect()
}

/// Campsites whose id is favorited, in the campsites' own order.
pub fn favorite_locations<'a>(locations: &'a [Location], favorites: &Favorites) -> Vec<&'a Location> {
    locations
        .iter()
        .filter(|l| favorites.contains(l.id))
        .collect()
}

pub fn is_favorite(favorites: &Favorites, id: EntityId) -> bool {
    favorites.contains(id)
}

/// Campsite lookup by id.
pub fn location_by_id(locations: &[Location], id: EntityId) -> Option<&Location> {
    locations.iter().find(|l| l.id == id)
}

// ── Home screen ──────────────────────────────────────────────────────

/// One home-screen card: the featured item plus its slice lifecycle, so
/// the view can show a spinner or the error in place of the card.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight<'a, T> {
    pub item: Option<&'a T>,
    pub status: FetchStatus,
    pub error: Option<&'a str>,
}

impl<'a, T: Featured> Highlight<'a, T> {
    fn from_slice(slice: &'a ResourceState<T>) -> Self {
        Self {
            item: featured(slice.items()),
            status: slice.status,
            error: slice.error.as_deref(),
        }
    }
}

/// Featured campsite, promotion and partner.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeHighlights<'a> {
    pub campsite: Highlight<'a, Location>,
    pub promotion: Highlight<'a, Promotion>,
    pub partner: Highlight<'a, Partner>,
}

pub fn home_highlights(state: &AppState) -> HomeHighlights<'_> {
    HomeHighlights {
        campsite: Highlight::from_slice(&state.campsites),
        promotion: Highlight::from_slice(&state.promotions),
        partner: Highlight::from_slice(&state.partners),
    }
}
