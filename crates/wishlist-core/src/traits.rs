use async_trait::async_trait;

use crate::error::Error;
use crate::search::summarize;
use crate::types::{AccessToken, Movie};

/// Source of bearer tokens for the movie API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a usable token, exchanging credentials if necessary.
    ///
    /// # Errors
    ///
    /// `Error::Auth` or `Error::AuthRejected` when the exchange fails.
    async fn fetch(&self) -> Result<AccessToken, Error>;

    /// Force a credential exchange, replacing any cached token.
    ///
    /// # Errors
    ///
    /// Same as [`TokenProvider::fetch`].
    async fn refresh(&self) -> Result<AccessToken, Error>;

    /// Drop any cached token so the next `fetch` goes to the network.
    async fn invalidate(&self);
}

/// Read access to the movie wishlist.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Fetch the full collection in upstream order.
    ///
    /// # Errors
    ///
    /// `Error::Upstream` or `Error::UpstreamRejected` when the request fails,
    /// `Error::Internal` when the body is not a list of movies.
    async fn fetch_all(&self, token: &AccessToken) -> Result<Vec<Movie>, Error>;

    /// Search the collection and render a human-readable answer.
    ///
    /// # Errors
    ///
    /// Same as [`MovieCatalog::fetch_all`].
    async fn search(&self, query: &str, token: &AccessToken) -> Result<String, Error> {
        let movies = self.fetch_all(token).await?;
        Ok(summarize(query, &movies))
    }
}
