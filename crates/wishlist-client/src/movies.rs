use async_trait::async_trait;
use reqwest::Client;

use wishlist_core::{AccessToken, Error, Movie, MovieCatalog};

/// Client for the movie wishlist REST collection.
#[derive(Clone)]
pub struct MovieApiClient {
    http: Client,
    url: String,
}

impl MovieApiClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl MovieCatalog for MovieApiClient {
    async fn fetch_all(&self, token: &AccessToken) -> Result<Vec<Movie>, Error> {
        let resp = self
            .http
            .get(&self.url)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Movie API request failed: {e}");
                Error::Upstream(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("Movie API returned {status}: {body}");
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Vec<Movie>>()
            .await
            .map_err(|e| Error::Internal(format!("unexpected movie collection: {e}")))
    }
}
