use std::sync::Arc;
use std::time::Duration;

use wishlist_client::{build_http_client, Auth0TokenProvider, MovieApiClient};
use wishlist_core::Error;
use wishlist_mcp::{SearchMoviesTool, ToolRegistry};

use crate::config::Config;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolRegistry>,
    /// When set, every request except the health check must present this bearer key.
    pub api_key: Option<Arc<str>>,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools: Arc::new(tools),
            api_key: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Wire the downstream clients and register the tools.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let http = build_http_client(config.upstream_timeout())?;

        let tokens = Arc::new(Auth0TokenProvider::new(
            http.clone(),
            Auth0TokenProvider::token_url_for_domain(&config.auth0_domain),
            config.credentials(),
            config.token_cache_policy(),
        ));
        let catalog = Arc::new(MovieApiClient::new(http, config.movies_api_url.clone()));

        let tools = ToolRegistry::new().with_tool(Arc::new(SearchMoviesTool::new(tokens, catalog)));

        let mut state = Self::new(tools)
            .with_max_body_bytes(config.max_body_bytes)
            .with_request_timeout(config.request_timeout());
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            state = state.with_api_key(key);
        }
        Ok(state)
    }
}
