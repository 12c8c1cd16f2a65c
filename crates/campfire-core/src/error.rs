// ── Core error types ──
//
// User-facing errors from campfire-core. The `From<campfire_api::Error>`
// impl translates transport-layer failures into domain variants; the
// slice-level message, by contrast, is always the API error's own text.

use thiserror::Error;

use crate::persist::StorageError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    #[error("Cannot reach catalog service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog request timed out")]
    Timeout,

    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Unexpected response from catalog service: {message}")]
    Decode { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Persistence errors ───────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Configuration / lifecycle ────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Background persistence task has stopped")]
    Shutdown,
}

impl CoreError {
    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<campfire_api::Error> for CoreError {
    fn from(err: campfire_api::Error) -> Self {
        match err {
            campfire_api::Error::Network { status } => CoreError::Api {
                message: err.to_string(),
                status: Some(status),
            },
            campfire_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            campfire_api::Error::Parse { message, body: _ } => CoreError::Decode { message },
            campfire_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            campfire_api::Error::Client(message) => CoreError::Config { message },
        }
    }
}
