//! Axum router wiring.
//!
//! Public API on the app listener, `/healthz` + `/metrics` on the monitoring
//! listener.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, http, ops};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(http::handlers::root))
        .route(
            "/posts",
            get(http::handlers::list_posts).post(http::handlers::create_post),
        )
        .route(
            "/posts/:id",
            get(http::handlers::get_post)
                .put(http::handlers::update_post)
                .delete(http::handlers::delete_post),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            http::middleware::enforce_timeout,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            http::middleware::log_requests,
        ))
        .with_state(state);

    // Everything lands in the fallback, so the slash rewrite happens before
    // the inner router matches.
    Router::new()
        .fallback_service(api)
        .layer(middleware::from_fn(http::middleware::trim_trailing_slash))
}

pub fn build_ops_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
