use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(handlers::register).get(handlers::list_users))
        .route(
            "/user/:user_id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/auth/login", post(handlers::login))
        .route("/me", get(handlers::get_me))
}
