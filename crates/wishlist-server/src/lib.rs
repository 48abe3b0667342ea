pub mod api_key;
pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod router;
