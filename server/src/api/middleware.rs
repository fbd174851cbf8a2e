//! HTTP middleware (404 handler)

use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

/// Handle 404 Not Found with logging
pub async fn handle_404(req: Request) -> impl IntoResponse {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::debug!(
            method = %req.method(),
            uri = %req.uri(),
            user_agent,
            "[404] No route"
        );
    }

    StatusCode::NOT_FOUND
}
