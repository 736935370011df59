use axum::routing::get;
use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/goal",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route(
            "/goal/:goal_id",
            get(handlers::get_goal)
                .put(handlers::update_goal)
                .delete(handlers::delete_goal),
        )
}
