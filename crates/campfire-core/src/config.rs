// ── Runtime configuration ──
//
// Describes where the catalog service lives and how the store persists.
// Never touches disk: campfire-config builds one of these and hands it in.

use std::time::Duration;

use url::Url;

/// Default storage namespace; the blob lives under `persist:{key}`.
pub const DEFAULT_PERSIST_KEY: &str = "root";

/// Configuration for a [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Catalog service base URL (e.g. `http://localhost:3001/`).
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Namespace key of the persisted snapshot.
    pub persist_key: String,
}

impl CoreConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            persist_key: DEFAULT_PERSIST_KEY.into(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_persist_key(mut self, key: impl Into<String>) -> Self {
        self.persist_key = key.into();
        self
    }

    /// The storage key the snapshot is written under.
    pub fn storage_key(&self) -> String {
        format!("persist:{}", self.persist_key)
    }
}
