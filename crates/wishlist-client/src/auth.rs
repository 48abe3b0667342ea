//! Machine-to-machine tokens from Auth0 via the client-credentials grant.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use wishlist_core::{AccessToken, Error, TokenProvider};

/// Tokens this close to expiry are replaced before use.
const REFRESH_MARGIN_SECS: i64 = 60;

const GRANT_TYPE: &str = "client_credentials";

/// Client credentials registered with the identity provider.
#[derive(Clone)]
pub struct Auth0Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
}

impl std::fmt::Debug for Auth0Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth0Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("audience", &self.audience)
            .finish()
    }
}

/// Whether tokens are reused across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenCachePolicy {
    /// Reuse a token until it is about to expire.
    #[default]
    ExpiryAware,
    /// Exchange credentials on every call.
    Disabled,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// Token provider backed by an OAuth token endpoint.
pub struct Auth0TokenProvider {
    http: Client,
    token_url: String,
    credentials: Auth0Credentials,
    policy: TokenCachePolicy,
    cached: Mutex<Option<AccessToken>>,
}

impl Auth0TokenProvider {
    pub fn new(
        http: Client,
        token_url: impl Into<String>,
        credentials: Auth0Credentials,
        policy: TokenCachePolicy,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            credentials,
            policy,
            cached: Mutex::new(None),
        }
    }

    /// Token endpoint for an Auth0 tenant.
    ///
    /// A domain that already carries a scheme is used as the base URL as-is.
    pub fn token_url_for_domain(domain: &str) -> String {
        let domain = domain.trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            format!("{domain}/oauth/token")
        } else {
            format!("https://{domain}/oauth/token")
        }
    }

    async fn exchange(&self) -> Result<AccessToken, Error> {
        tracing::debug!("Requesting M2M access token from {}", self.token_url);

        let resp = self
            .http
            .post(&self.token_url)
            .json(&serde_json::json!({
                "client_id": self.credentials.client_id,
                "client_secret": self.credentials.client_secret,
                "audience": self.credentials.audience,
                "grant_type": GRANT_TYPE,
            }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Token request failed: {e}");
                Error::Auth(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("Identity provider returned {status}: {body}");
            return Err(Error::AuthRejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::Auth(format!("unreadable token response: {e}")))?;

        let value = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Auth("token response missing access_token".to_string()))?;

        Ok(AccessToken::with_lifetime(value, Utc::now(), parsed.expires_in))
    }
}

#[async_trait]
impl TokenProvider for Auth0TokenProvider {
    async fn fetch(&self) -> Result<AccessToken, Error> {
        if self.policy == TokenCachePolicy::Disabled {
            return self.exchange().await;
        }

        // Held across the exchange so concurrent callers share one refresh.
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now(), Duration::seconds(REFRESH_MARGIN_SECS)) {
                return Ok(token.clone());
            }
        }

        let token = self.exchange().await?;
        *cached = token.expires_at().is_some().then(|| token.clone());
        Ok(token)
    }

    async fn refresh(&self) -> Result<AccessToken, Error> {
        let mut cached = self.cached.lock().await;
        *cached = None;
        let token = self.exchange().await?;
        if self.policy == TokenCachePolicy::ExpiryAware && token.expires_at().is_some() {
            *cached = Some(token.clone());
        }
        Ok(token)
    }

    async fn invalidate(&self) {
        self.cached.lock().await.take();
    }
}
