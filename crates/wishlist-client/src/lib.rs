pub mod auth;
pub mod movies;

use std::time::Duration;

pub use auth::{Auth0Credentials, Auth0TokenProvider, TokenCachePolicy};
pub use movies::MovieApiClient;

use wishlist_core::Error;

/// Build the HTTP client shared by the downstream clients.
///
/// # Errors
///
/// Returns `Error::Internal` when the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .user_agent(concat!("wishlist-mcp/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))
}
