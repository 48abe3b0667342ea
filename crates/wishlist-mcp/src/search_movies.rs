use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use wishlist_core::{Error, MovieCatalog, TokenProvider};

use crate::tools::{ToolDefinition, ToolHandler};

pub const SEARCH_MOVIES: &str = "search_movies";

#[derive(Debug, Deserialize)]
struct SearchArgs {
    #[serde(default)]
    query: String,
}

/// `search_movies`: look a title up in the wishlist.
pub struct SearchMoviesTool {
    tokens: Arc<dyn TokenProvider>,
    catalog: Arc<dyn MovieCatalog>,
}

impl SearchMoviesTool {
    pub fn new(tokens: Arc<dyn TokenProvider>, catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { tokens, catalog }
    }
}

#[async_trait]
impl ToolHandler for SearchMoviesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: SEARCH_MOVIES.to_string(),
            description: "Searches the movie wishlist for a specific movie title.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Title, or part of a title, to look for (case-insensitive)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<Value, Error> {
        let args: SearchArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::InvalidArguments(e.to_string()))?;

        tracing::info!("search_movies: query '{}'", args.query);

        let token = self.tokens.fetch().await?;
        match self.catalog.search(&args.query, &token).await {
            Ok(answer) => Ok(Value::String(answer)),
            Err(err) => {
                // A rejected bearer means the cached token is stale.
                if err.is_unauthorized() {
                    self.tokens.invalidate().await;
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use wishlist_core::{AccessToken, Movie};

    use super::*;

    #[derive(Default)]
    struct CountingTokens {
        fetches: AtomicUsize,
        invalidations: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TokenProvider for CountingTokens {
        async fn fetch(&self) -> Result<AccessToken, Error> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::AuthRejected {
                    status: 401,
                    body: "denied".to_string(),
                });
            }
            Ok(AccessToken::new("token", None))
        }

        async fn refresh(&self) -> Result<AccessToken, Error> {
            self.fetch().await
        }

        async fn invalidate(&self) {
            self.invalidations.fetch_add(1, Ordering::SeqCst);
        }
    }

    enum Catalog {
        Movies(Vec<Movie>),
        Status(u16),
    }

    #[async_trait]
    impl MovieCatalog for Catalog {
        async fn fetch_all(&self, token: &AccessToken) -> Result<Vec<Movie>, Error> {
            assert_eq!(token.secret(), "token");
            match self {
                Self::Movies(movies) => Ok(movies.clone()),
                Self::Status(status) => Err(Error::UpstreamRejected {
                    status: *status,
                    body: String::new(),
                }),
            }
        }
    }

    fn matrix() -> Catalog {
        Catalog::Movies(vec![Movie {
            title: "The Matrix".to_string(),
            watched: false,
        }])
    }

    #[tokio::test]
    async fn returns_summary_string() {
        let tokens = Arc::new(CountingTokens::default());
        let tool = SearchMoviesTool::new(tokens.clone(), Arc::new(matrix()));

        let result = tool.call(json!({ "query": "Matrix" })).await.unwrap();
        assert_eq!(
            result,
            json!("'The Matrix' is on the list and has NOT been watched.")
        );
        assert_eq!(tokens.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_query_matches_everything() {
        let tool = SearchMoviesTool::new(Arc::new(CountingTokens::default()), Arc::new(matrix()));
        let result = tool.call(json!({})).await.unwrap();
        assert_eq!(
            result,
            json!("'The Matrix' is on the list and has NOT been watched.")
        );
    }

    #[tokio::test]
    async fn non_string_query_is_rejected() {
        let tool = SearchMoviesTool::new(Arc::new(CountingTokens::default()), Arc::new(matrix()));
        let err = tool.call(json!({ "query": 42 })).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn auth_failure_propagates() {
        let tokens = Arc::new(CountingTokens {
            fail: true,
            ..CountingTokens::default()
        });
        let tool = SearchMoviesTool::new(tokens, Arc::new(matrix()));
        let err = tool.call(json!({ "query": "x" })).await.unwrap_err();
        assert!(err.to_string().contains("authenticate"));
    }

    #[tokio::test]
    async fn upstream_401_invalidates_token() {
        let tokens = Arc::new(CountingTokens::default());
        let tool = SearchMoviesTool::new(tokens.clone(), Arc::new(Catalog::Status(401)));
        let err = tool.call(json!({ "query": "x" })).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(tokens.invalidations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upstream_500_keeps_token() {
        let tokens = Arc::new(CountingTokens::default());
        let tool = SearchMoviesTool::new(tokens.clone(), Arc::new(Catalog::Status(500)));
        assert!(tool.call(json!({ "query": "x" })).await.is_err());
        assert_eq!(tokens.invalidations.load(Ordering::SeqCst), 0);
    }
}
