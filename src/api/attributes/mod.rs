//! Attribute API module
//!
//! Collection routes live under the owning item; single-attribute routes
//! are addressed directly by attribute id.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/items/{id}/attributes", get(handler::list_for_item))
        .route("/api/attributes/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/api/items/{id}/attributes", post(handler::create))
        .route("/api/items/{id}/attributes/reorder", put(handler::reorder))
        .route(
            "/api/attributes/{id}",
            put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission("catalog:manage")));

    read_routes.merge(manage_routes)
}
