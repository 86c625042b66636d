use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Logs every request with a generated id, its matched route, status and
/// latency. Level follows the status class.
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "incoming request"
    );

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    match status {
        500..=599 => tracing::error!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            uri = %uri,
            status,
            duration_ms = %duration_ms,
            "request completed (server error)"
        ),
        400..=499 => tracing::warn!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            uri = %uri,
            status,
            duration_ms = %duration_ms,
            "request completed (client error)"
        ),
        _ => tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            uri = %uri,
            status,
            duration_ms = %duration_ms,
            "request completed"
        ),
    }

    response
}
