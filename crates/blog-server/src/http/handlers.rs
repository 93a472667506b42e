//! Post CRUD handlers.
//!
//! Bodies are decoded by hand from raw bytes so a malformed body or missing
//! content type is a plain `400`, matching the rest of the API's error style.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use blog_core::error::{BlogError, ClientCode};
use blog_core::PostId;

use crate::app_state::AppState;
use crate::service::PostDto;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "response": "test BE response" }))
}

pub async fn list_posts(State(state): State<AppState>) -> Response {
    match state.service().get_posts() {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => failure(e, "failed to get posts", "Failed to retrieve posts"),
    }
}

pub async fn create_post(State(state): State<AppState>, body: Bytes) -> Response {
    let post = match decode_post(&body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if let Err(e) = post.validate() {
        tracing::warn!(error = %e, "invalid post format");
        return (StatusCode::BAD_REQUEST, "Invalid post format").into_response();
    }

    match state.service().create_post(post) {
        Ok(created) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/posts/{}", created.id))],
            Json(created),
        )
            .into_response(),
        Err(e) => failure(e, "failed to create post", "Something went wrong"),
    }
}

pub async fn get_post(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service().get_post(id) {
        Ok(post) => Json(post).into_response(),
        Err(e) => failure(e, "failed to get post", "Failed to retrieve post"),
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut post = match decode_post(&body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    // path id wins over any id in the body
    post.id = id;

    match state.service().update_post(post) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => failure(e, "failed to update post", "Failed to update post"),
    }
}

pub async fn delete_post(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service().delete_post(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => failure(e, "failed to delete post", "Failed to delete post"),
    }
}

fn parse_id(raw: &str) -> Result<PostId, Response> {
    raw.parse::<PostId>()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid post ID").into_response())
}

fn decode_post(body: &[u8]) -> Result<PostDto, Response> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "post decode failed");
        (StatusCode::BAD_REQUEST, "Invalid request format").into_response()
    })
}

/// Translate a service error: `NotFound` is a 404, bad input a 400, and
/// anything else a logged 500 with a generic `body`.
fn failure(err: BlogError, log_msg: &str, body: &'static str) -> Response {
    match err.client_code() {
        ClientCode::NotFound => (StatusCode::NOT_FOUND, "Post not found").into_response(),
        ClientCode::BadRequest => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        ClientCode::UnsupportedVersion | ClientCode::Internal => {
            tracing::error!(error = %err, code = err.client_code().as_str(), "{}", log_msg);
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}
