//! User API Module
//!
//! Personnel CRUD plus the public credential lifecycle (signup, signin,
//! OTP password reset). The auth middleware whitelists the public routes;
//! everything else here requires a valid token.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// User router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/stats", get(handler::stats))
        .route("/signin", post(handler::signin))
        .route("/forgot-password", post(handler::forgot_password))
        .route("/verify-otp", post(handler::verify_otp))
        .route("/reset-password", post(handler::reset_password))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
