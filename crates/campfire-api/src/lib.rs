//! Async HTTP client for the Campfire catalog service.
//!
//! The service exposes plain JSON collections (`campsites`, `comments`,
//! `partners`, `promotions`) under a single base URL and accepts new
//! comments via `POST`. This crate knows nothing about the domain types:
//! callers pick the `DeserializeOwned` type they expect for each resource.
//!
//! - **[`ApiClient`]**: URL construction and request/response handling.
//! - **[`TransportConfig`]**: timeout and user agent shared by clients.
//! - **[`Error`]**: non-success status, transport, and decode failures.

pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
