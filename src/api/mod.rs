//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`items`] - catalog item management
//! - [`attributes`] - per-item attribute catalog
//! - [`variants`] - variant CRUD, preview and generation

pub mod attributes;
pub mod health;
pub mod items;
pub mod variants;

use axum::{Router, middleware};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(items::router())
        .merge(attributes::router())
        .merge(variants::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}
