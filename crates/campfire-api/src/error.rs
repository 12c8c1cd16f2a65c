use thiserror::Error;

/// Top-level error type for the `campfire-api` crate.
///
/// Every failure of a fetch or submission lands in one of these variants.
/// `campfire-core` flattens them into a human-readable message at the
/// slice boundary, so the `Display` text is what end users see.
#[derive(Debug, Error)]
pub enum Error {
    // ── Response ────────────────────────────────────────────────────
    /// The server answered with a non-success HTTP status.
    #[error("Unable to fetch, status: {status}")]
    Network { status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// The request could not be attempted or completed (DNS, refused
    /// connection, timeout, connectivity loss).
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Resource path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client itself could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Response body was not valid JSON for the expected type, with the
    /// raw body kept for debugging.
    #[error("Unable to parse response: {message}")]
    Parse { message: String, body: String },
}

impl Error {
    /// HTTP status carried by a `Network` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if repeating the request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Network { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_message_carries_status() {
        let err = Error::Network { status: 404 };
        assert_eq!(err.to_string(), "Unable to fetch, status: 404");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_transient());
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(Error::Network { status: 503 }.is_transient());
        assert!(Error::Network { status: 429 }.is_transient());
        assert!(!Error::Network { status: 400 }.is_transient());
    }

    #[test]
    fn parse_error_has_no_status() {
        let err = Error::Parse {
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Unable to parse response: expected value");
    }
}
