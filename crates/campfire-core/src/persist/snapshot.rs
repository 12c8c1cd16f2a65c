// ── Persisted snapshot format ──
//
// The whole store serialized as one JSON object, plus a `_persist`
// metadata block. Unversioned: there is no migration path, and an
// undecodable blob is discarded in favour of defaults.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::{AppState, Favorites, ResourceState};
use crate::model::{Comment, Location, Partner, Promotion};

/// Format marker written alongside the state. Never checked on read.
pub const SNAPSHOT_VERSION: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistMeta {
    pub version: i32,
}

impl Default for PersistMeta {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
        }
    }
}

/// On-disk shape of the store. Slices missing from a stored blob come
/// back as their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSnapshot {
    pub campsites: ResourceState<Location>,
    pub comments: ResourceState<Comment>,
    pub partners: ResourceState<Partner>,
    pub promotions: ResourceState<Promotion>,
    pub favorites: Favorites,
    #[serde(rename = "_persist")]
    pub meta: PersistMeta,
}

impl From<&AppState> for PersistedSnapshot {
    fn from(state: &AppState) -> Self {
        Self {
            campsites: state.campsites.clone(),
            comments: state.comments.clone(),
            partners: state.partners.clone(),
            promotions: state.promotions.clone(),
            favorites: state.favorites.clone(),
            meta: PersistMeta::default(),
        }
    }
}

impl From<PersistedSnapshot> for AppState {
    fn from(snap: PersistedSnapshot) -> Self {
        Self {
            campsites: snap.campsites,
            comments: snap.comments,
            partners: snap.partners,
            promotions: snap.promotions,
            favorites: snap.favorites,
        }
    }
}

pub fn encode(state: &AppState) -> Result<String, CoreError> {
    Ok(serde_json::to_string(&PersistedSnapshot::from(state))?)
}

pub fn decode(blob: &str) -> Result<AppState, CoreError> {
    let snap: PersistedSnapshot = serde_json::from_str(blob)?;
    Ok(snap.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::EntityId;
    use crate::store::{Action, FavoritesAction, FetchStatus, SliceAction};

    fn populated() -> AppState {
        let campsite = Location {
            id: EntityId::new(0),
            name: "React Lake".into(),
            description: "Foothills".into(),
            image: "images/react-lake.jpg".into(),
            featured: true,
            elevation: Some(1233),
        };
        let comment = Comment {
            id: EntityId::new(0),
            campsite_id: EntityId::new(0),
            rating: 5,
            author: "Ada".into(),
            text: "Lovely".into(),
            date: "2018-10-25T16:30Z".into(),
        };
        let promotion = Promotion {
            id: EntityId::new(0),
            name: "Mountain Adventure".into(),
            description: String::new(),
            image: String::new(),
            featured: true,
            cost: Some(1299.0),
        };

        [
            Action::Campsites(SliceAction::Succeed(vec![campsite])),
            Action::Comments(SliceAction::Succeed(vec![comment])),
            Action::Promotions(SliceAction::Succeed(vec![promotion])),
            Action::Partners(SliceAction::Start),
            Action::Partners(SliceAction::Fail("Unable to fetch, status: 404".into())),
            Action::Favorites(FavoritesAction::Toggle(EntityId::new(0))),
            Action::Favorites(FavoritesAction::Toggle(EntityId::new(3))),
        ]
        .into_iter()
        .fold(AppState::default(), |s, a| s.reduce(a))
    }

    #[test]
    fn round_trip_preserves_state() {
        for state in [AppState::default(), populated()] {
            let blob = encode(&state).unwrap();
            assert_eq!(decode(&blob).unwrap(), state);
        }
    }

    #[test]
    fn encoded_blob_carries_persist_meta() {
        let value: serde_json::Value =
            serde_json::from_str(&encode(&AppState::default()).unwrap()).unwrap();
        assert_eq!(value["_persist"], json!({ "version": -1 }));
        assert_eq!(value["campsites"]["status"], json!("idle"));
        assert_eq!(value["favorites"], json!([]));
    }

    #[test]
    fn missing_slices_fall_back_to_defaults() {
        let state = decode(r#"{ "favorites": [5] }"#).unwrap();
        assert!(state.favorites.contains(EntityId::new(5)));
        assert_eq!(state.campsites.status, FetchStatus::Idle);
        assert!(state.comments.is_empty());
    }

    #[test]
    fn malformed_blob_is_rejected() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{ "favorites": "five" }"#).is_err());
    }
}
