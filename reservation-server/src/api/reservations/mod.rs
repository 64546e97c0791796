//! Reservation API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        // Public availability query (advisory)
        .route("/api/availability", get(handler::availability))
        .nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    // Any authenticated user can book and list their own reservations
    let user_routes = Router::new()
        .route("/", post(handler::create))
        .route("/mine", get(handler::my_reservations));

    let admin_routes = Router::new()
        .route("/", get(handler::list_all))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(admin_routes)
}
