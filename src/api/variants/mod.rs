//! Variant API module
//!
//! Listing and manual creation live under the owning item; preview,
//! generation and single-variant routes are top-level.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/items/{id}/variants", get(handler::list_for_item))
        .route("/api/variants/preview", get(handler::preview))
        .route("/api/variants/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/api/items/{id}/variants", post(handler::create))
        .route("/api/variants/generate", post(handler::generate))
        .route(
            "/api/variants/{id}",
            put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission("catalog:manage")));

    read_routes.merge(manage_routes)
}
