use std::time::Duration;

use clap::Parser;

use wishlist_client::{Auth0Credentials, TokenCachePolicy};

/// Server configuration, from flags or the environment.
#[derive(Parser)]
#[command(
    name = "wishlist-server",
    about = "MCP server exposing the movie wishlist search tool"
)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "WISHLIST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "WISHLIST_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Auth0 tenant domain (a full `http(s)://` base URL is also accepted)
    #[arg(long, env = "AUTH0_DOMAIN")]
    pub auth0_domain: String,

    #[arg(long, env = "AUTH0_CLIENT_ID")]
    pub auth0_client_id: String,

    #[arg(long, env = "AUTH0_CLIENT_SECRET", hide_env_values = true)]
    pub auth0_client_secret: String,

    /// API identifier the M2M token is requested for
    #[arg(long, env = "AUTH0_AUDIENCE")]
    pub auth0_audience: String,

    /// Movie collection endpoint
    #[arg(
        long,
        env = "MOVIES_API_URL",
        default_value = "http://localhost:3001/api/movies"
    )]
    pub movies_api_url: String,

    /// Static key callers must send as `Authorization: Bearer <key>`
    #[arg(long, env = "MCP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upper bound on handling one inbound request
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Timeout for calls to Auth0 and the movie API
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 15)]
    pub upstream_timeout_secs: u64,

    /// Largest request body buffered on the root route
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Exchange credentials for a fresh token on every tool call
    #[arg(long, env = "NO_TOKEN_CACHE")]
    pub no_token_cache: bool,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn credentials(&self) -> Auth0Credentials {
        Auth0Credentials {
            client_id: self.auth0_client_id.clone(),
            client_secret: self.auth0_client_secret.clone(),
            audience: self.auth0_audience.clone(),
        }
    }

    pub fn token_cache_policy(&self) -> TokenCachePolicy {
        if self.no_token_cache {
            TokenCachePolicy::Disabled
        } else {
            TokenCachePolicy::ExpiryAware
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
