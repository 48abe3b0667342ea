pub mod envelope;
pub mod jsonrpc;
pub mod search_movies;
pub mod tools;

pub use envelope::{classify, Envelope, JsonRpcToolCall};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use search_movies::{SearchMoviesTool, SEARCH_MOVIES};
pub use tools::{ToolDefinition, ToolHandler, ToolOutcome, ToolRegistry};
