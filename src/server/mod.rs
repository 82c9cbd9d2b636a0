//! HTTP/WS surface: the widget channel, the REST completion endpoint, and
//! the site middleware.

pub mod ratelimit;
pub mod routes;
pub mod ws;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

pub use ratelimit::{RateLimitConfig, RateLimiter};
pub use routes::ApiState;
pub use ws::ChatState;

/// Assemble the full application router.
pub fn app(api: ApiState, chat: ChatState, limiter: Arc<RateLimiter>) -> Router {
    routes::api_routes(api)
        .merge(ws::chat_routes(chat))
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            ratelimit::site_middleware,
        ))
        .layer(CorsLayer::permissive())
}
