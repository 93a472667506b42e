//! HTTP middleware.
//!
//! `trim_trailing_slash` must run before routing, so it is layered on the
//! outer router (see `router::build_router`). The others run after routing
//! and can see the matched route.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

/// Rewrite `/posts/` to `/posts` (root is left alone).
pub async fn trim_trailing_slash(mut req: Request, next: Next) -> Response {
    if let Some(uri) = trimmed_uri(req.uri()) {
        tracing::debug!(from = %req.uri(), to = %uri, "trailing slash removed");
        *req.uri_mut() = uri;
    }
    next.run(req).await
}

fn trimmed_uri(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    if path.len() <= 1 || !path.ends_with('/') {
        return None;
    }

    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    let path_and_query = match uri.query() {
        Some(q) => format!("{trimmed}?{q}"),
        None => trimmed.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

/// Fail requests that outlive `app.read_timeout_ms` with `408`.
pub async fn enforce_timeout(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let limit = state.cfg().app.read_timeout();
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(resp) => resp,
        Err(_) => {
            tracing::warn!(timeout_ms = state.cfg().app.read_timeout_ms, "request timed out");
            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
        }
    }
}

/// Log every handled request and record its latency.
pub async fn log_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let resp = next.run(req).await;

    let status = resp.status().as_u16();
    tracing::info!(%method, %path, status, "request handled");
    state
        .metrics()
        .observe_http_duration(start, &path, status, method.as_str());
    resp
}
