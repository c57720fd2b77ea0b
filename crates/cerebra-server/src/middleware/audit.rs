use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::sessions::COOKIE_NAME;

/// Request audit middleware.
///
/// One structured `http_request` event per request. Form bodies, report text
/// and patient identity are never logged; only whether the browser already
/// carried a session cookie.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let has_session = req
        .headers()
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(COOKIE_NAME));

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        has_session,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "http_request"
    );

    response
}
