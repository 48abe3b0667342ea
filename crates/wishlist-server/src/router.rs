use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::{api_key, dispatch, handlers};

/// Routes served when the root dispatcher does not claim a request.
pub fn create_fallback_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // MCP endpoint for clients speaking the full protocol
        .route("/mcp", post(handlers::mcp_request))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let fallback = create_fallback_router(state.clone());
    create_router_with_fallback(state, fallback)
}

/// Wrap an arbitrary fallback application with the dispatcher and the
/// transport layers.
pub fn create_router_with_fallback(state: AppState, fallback: Router) -> Router {
    let timeout = state.request_timeout;
    dispatch::layer_over(fallback, state.clone())
        .layer(middleware::from_fn_with_state(
            state,
            api_key::require_api_key,
        ))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        // CORS: allow any origin (MCP clients may run in various contexts)
        .layer(CorsLayer::permissive())
}
