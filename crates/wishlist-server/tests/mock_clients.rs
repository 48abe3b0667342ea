use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use wishlist_core::{AccessToken, Error, Movie, MovieCatalog, TokenProvider};
use wishlist_mcp::{ToolDefinition, ToolHandler};

/// Token provider that either hands out a fixed token or fails like a 401 from Auth0.
pub struct MockTokens {
    reject: bool,
}

impl MockTokens {
    pub fn accepting() -> Self {
        Self { reject: false }
    }

    pub fn rejecting() -> Self {
        Self { reject: true }
    }
}

#[async_trait]
impl TokenProvider for MockTokens {
    async fn fetch(&self) -> Result<AccessToken, Error> {
        if self.reject {
            return Err(Error::AuthRejected {
                status: 401,
                body: r#"{"error":"access_denied"}"#.to_string(),
            });
        }
        Ok(AccessToken::new("mock-token", None))
    }

    async fn refresh(&self) -> Result<AccessToken, Error> {
        self.fetch().await
    }

    async fn invalidate(&self) {}
}

/// In-memory movie collection.
pub struct MockCatalog {
    movies: Vec<Movie>,
}

impl MockCatalog {
    pub fn new(movies: &[(&str, bool)]) -> Self {
        Self {
            movies: movies
                .iter()
                .map(|(title, watched)| Movie {
                    title: (*title).to_string(),
                    watched: *watched,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl MovieCatalog for MockCatalog {
    async fn fetch_all(&self, _token: &AccessToken) -> Result<Vec<Movie>, Error> {
        Ok(self.movies.clone())
    }
}

/// Tool that records how often it ran.
#[derive(Clone, Default)]
pub struct CountingTool {
    pub calls: Arc<AtomicUsize>,
}

impl CountingTool {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolHandler for CountingTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "count".to_string(),
            description: "Counts invocations.".to_string(),
            input_schema: serde_json::json!({ "type": "object" }),
        }
    }

    async fn call(&self, _arguments: Value) -> Result<Value, Error> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Value::from(n))
    }
}
