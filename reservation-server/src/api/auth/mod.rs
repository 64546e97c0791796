//! Auth API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public routes (skipped by the require_auth middleware)
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        // Protected routes - require authentication (global require_auth middleware)
        .route("/me", get(handler::me))
}
