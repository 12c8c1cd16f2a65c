// ── Comments ──
//
// Comments reference a campsite by id. The reference is soft: a comment
// may arrive before (or without) the campsite it points at.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};
use crate::error::CoreError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A user comment on a campsite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    pub campsite_id: EntityId,
    pub rating: u8,
    pub author: String,
    pub text: String,
    /// ISO-8601 timestamp as sent by the service. Kept verbatim; the
    /// service's own records omit seconds, so it is not parsed eagerly.
    #[serde(default)]
    pub date: String,
}

impl Entity for Comment {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// A comment as entered by the user, before the service assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub author: String,
    pub rating: u8,
    pub text: String,
    pub campsite_id: EntityId,
}

impl NewComment {
    pub fn new(
        campsite_id: EntityId,
        author: impl Into<String>,
        rating: u8,
        text: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            rating,
            text: text.into(),
            campsite_id,
        }
    }

    /// Reject submissions the service would store in a broken state.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(CoreError::ValidationFailed {
                message: format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                    self.rating
                ),
            });
        }
        if self.author.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "author must not be empty".into(),
            });
        }
        if self.text.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "comment text must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Build the request body, stamping the submission time.
    pub fn to_request(&self, now: DateTime<Utc>) -> CommentRequest<'_> {
        CommentRequest {
            author: self.author.trim(),
            rating: self.rating,
            text: self.text.trim(),
            campsite_id: self.campsite_id,
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Wire body for `POST /comments`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest<'a> {
    pub author: &'a str,
    pub rating: u8,
    pub text: &'a str,
    pub campsite_id: EntityId,
    pub date: String,
}
