// ── Domain model ──
//
// Canonical types for the four remote collections plus the traits that
// let the store and selectors treat them uniformly.

pub mod catalog;
pub mod comment;
pub mod entity_id;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use catalog::{Location, Partner, Promotion};
pub use comment::{Comment, CommentRequest, NewComment};
pub use entity_id::EntityId;

/// Anything stored in a resource collection.
pub trait Entity {
    fn id(&self) -> EntityId;
}

/// Entities that can be promoted to the home screen.
pub trait Featured {
    fn is_featured(&self) -> bool;
}

/// Remote collections exposed by the catalog service.
///
/// The string form is the URL path segment (`GET {base}/{resource}`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Campsites,
    Comments,
    Partners,
    Promotions,
}

impl Resource {
    /// URL path segment for this collection.
    pub fn path(self) -> &'static str {
        match self {
            Self::Campsites => "campsites",
            Self::Comments => "comments",
            Self::Partners => "partners",
            Self::Promotions => "promotions",
        }
    }
}
