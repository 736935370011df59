use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, UpdateUserRequest};
use crate::users::extractors::AuthUser;
use crate::users::password::{hash_password, verify_password};
use crate::users::repo_types::{User, UserStatus};
use crate::users::services::{is_valid_email, new_auth_hash};

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered"));
    }

    let hash = hash_password(&payload.password)?;
    let user_id = User::create(
        &state.db,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        UserStatus::Active,
        &hash,
        None,
        None,
    )
    .await?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!(user_id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, headers, payload))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Unauthorized("Invalid credentials"));
        }
    };

    if user.user_status == UserStatus::Locked {
        warn!(user_id = user.user_id, "login attempt on locked account");
        return Err(ApiError::Forbidden("Account locked"));
    }

    let ok = verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        let failed = User::increment_failed_logons(&state.db, user.user_id).await?;
        if should_lock(failed, state.config.auth.max_failed_logons) {
            User::lock_account(&state.db, user.user_id).await?;
            warn!(user_id = user.user_id, "account locked after failed logons");
        } else {
            warn!(user_id = user.user_id, "login invalid password");
        }
        return Err(ApiError::Unauthorized("Invalid credentials"));
    }

    let auth_hash = new_auth_hash();
    let last_ip = client_ip(&headers);
    User::set_auth_session(
        &state.db,
        user.user_id,
        &auth_hash,
        OffsetDateTime::now_utc(),
        last_ip.as_deref(),
    )
    .await?;

    info!(user_id = user.user_id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        auth_hash,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}

#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<PublicUser>, ApiError> {
    match User::find_by_id(&state.db, user_id).await? {
        Some(user) => Ok(Json(PublicUser::from(user))),
        None => Err(ApiError::NotFound),
    }
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if auth.user_id != user_id {
        return Err(ApiError::Forbidden("Cannot modify another user"));
    }

    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    let holder = User::find_by_email(&state.db, &payload.email).await?;
    if email_taken_by_other(holder.as_ref(), user_id) {
        warn!(user_id, email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered"));
    }

    User::update_profile(
        &state.db,
        user_id,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
    )
    .await?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!(user_id, "profile updated");
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if auth.user_id != user_id {
        return Err(ApiError::Forbidden("Cannot delete another user"));
    }

    User::soft_delete(&state.db, user_id).await?;
    info!(user_id, "user soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Lock once the counter value reported by the store reaches the maximum.
/// The pre-read counter is stale under concurrent failed logins, so the
/// decision uses the post-increment value only.
fn should_lock(failed_logons: Option<i32>, max: i32) -> bool {
    failed_logons.map_or(false, |n| n >= max)
}

fn email_taken_by_other(holder: Option<&User>, user_id: i32) -> bool {
    holder.map_or(false, |u| u.user_id != user_id)
}

fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn client_ip_absent_without_header() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn lock_triggers_at_stored_threshold() {
        // Two racing failures can each pre-read max - 2; the stored value
        // still crosses the threshold on the fifth attempt.
        assert!(!should_lock(Some(3), 5));
        assert!(!should_lock(Some(4), 5));
        assert!(should_lock(Some(5), 5));
        assert!(should_lock(Some(6), 5));
    }

    #[test]
    fn lock_decision_ignores_missing_row() {
        assert!(!should_lock(None, 5));
    }

    fn sample_user(user_id: i32) -> User {
        User {
            user_id,
            first_name: "Olivia".into(),
            last_name: "Graham".into(),
            email: "olivia@example.com".into(),
            user_status: UserStatus::Active,
            password_hash: "hash".into(),
            auth_hash: None,
            auth_timestamp: None,
            failed_logons: 0,
            last_ip: None,
            is_active: true,
            is_deleted: false,
            datetime_updated: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn email_conflict_only_when_another_user_holds_it() {
        let other = sample_user(2);
        assert!(email_taken_by_other(Some(&other), 1));

        let own = sample_user(1);
        assert!(!email_taken_by_other(Some(&own), 1));
        assert!(!email_taken_by_other(None, 1));
    }
}
