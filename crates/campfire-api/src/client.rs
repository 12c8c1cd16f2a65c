// Catalog service HTTP client
//
// Wraps `reqwest::Client` with base-URL resource joining and uniform
// status/body handling. The service speaks bare JSON (no envelope), so a
// successful response body is decoded straight into the caller's type.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the catalog service.
///
/// Every collection lives at `{base_url}/{resource}`. Reads return the
/// decoded JSON array; writes return the server's echo of the created
/// record.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` may be given with or without a trailing slash; resource
    /// names are always joined as children of it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
        }
    }

    /// The service base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the URL for a named resource: `{base}/{resource}`.
    pub fn resource_url(&self, resource: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(resource.trim_start_matches('/'))?)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// `GET {base}/{resource}`, decoding the body as an ordered sequence.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        resource: &str,
    ) -> Result<Vec<T>, Error> {
        let url = self.resource_url(resource)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        parse_response(resp).await
    }

    /// `POST {base}/{resource}` with a JSON body, decoding the created record.
    pub async fn post<B, T>(&self, resource: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resource_url(resource)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        parse_response(resp).await
    }
}

/// Map a non-success status to `Error::Network`, otherwise decode the body.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(Error::Network {
            status: status.as_u16(),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(bytes = body.len(), "response body received");

    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Parse {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
