use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use tracing::{error, info, instrument};

use crate::goals::dto::{CreateGoalRequest, UpdateGoalRequest};
use crate::goals::repo_types::Goal;
use crate::state::AppState;

// Store outcomes are matched explicitly here: found / absent / error become
// 200 / 404 / 500, and error bodies stay empty.

#[instrument(skip(state))]
pub async fn list_goals(State(state): State<AppState>) -> Result<Json<Vec<Goal>>, StatusCode> {
    match Goal::list_all(&state.db).await {
        Ok(goals) => Ok(Json(goals)),
        Err(e) => {
            error!(error = %e, "error listing goals");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<i32>,
) -> Result<Json<Goal>, StatusCode> {
    match Goal::find_by_id(&state.db, goal_id).await {
        Ok(Some(goal)) => Ok(Json(goal)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(error = %e, goal_id, "error getting goal");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_goal(
    State(state): State<AppState>,
    Json(payload): Json<CreateGoalRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Goal>), StatusCode> {
    let goal_id =
        match Goal::create(&state.db, payload.user_id, &payload.timespan, &payload.goal_content)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, user_id = payload.user_id, "error creating goal");
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/goal/{goal_id}").parse() {
        headers.insert(header::LOCATION, location);
    }

    info!(goal_id, user_id = payload.user_id, "goal created");
    Ok((
        StatusCode::CREATED,
        headers,
        Json(Goal {
            goal_id,
            user_id: payload.user_id,
            timespan: payload.timespan,
            goal_content: payload.goal_content,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<i32>,
    Json(payload): Json<UpdateGoalRequest>,
) -> Result<Json<Goal>, StatusCode> {
    match Goal::update(&state.db, goal_id, &payload.timespan, &payload.goal_content).await {
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Ok(true) => match Goal::find_by_id(&state.db, goal_id).await {
            Ok(Some(goal)) => {
                info!(goal_id, "goal updated");
                Ok(Json(goal))
            }
            Ok(None) => Err(StatusCode::NOT_FOUND),
            Err(e) => {
                error!(error = %e, goal_id, "error re-reading goal");
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },
        Err(e) => {
            error!(error = %e, goal_id, "error updating goal");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<i32>,
) -> Result<StatusCode, StatusCode> {
    match Goal::delete(&state.db, goal_id).await {
        Ok(true) => {
            info!(goal_id, "goal deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(error = %e, goal_id, "error deleting goal");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
