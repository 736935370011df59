use axum::extract::{FromRef, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use time::{Duration, OffsetDateTime};
use tracing::warn;

use crate::state::AppState;
use crate::users::repo_types::{User, UserStatus};

/// Extracts the logged-in user from `Authorization: Bearer <authHash>` by
/// looking the token up in the store.
pub struct AuthUser(pub User);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or((
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header".to_string(),
        ))?;

        let user = match User::find_by_auth_hash(&state.db, token).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                warn!("unknown auth hash");
                return Err((
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired session".to_string(),
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "auth hash lookup failed");
                return Err((StatusCode::INTERNAL_SERVER_ERROR, String::new()));
            }
        };

        if user.user_status == UserStatus::Locked {
            warn!(user_id = user.user_id, "locked account presented a session");
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid or expired session".to_string(),
            ));
        }

        let ttl = Duration::hours(state.config.auth.session_ttl_hours);
        let fresh = user
            .auth_timestamp
            .map(|issued| issued + ttl > OffsetDateTime::now_utc())
            .unwrap_or(false);
        if !fresh {
            warn!(user_id = user.user_id, "session expired");
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid or expired session".to_string(),
            ));
        }

        Ok(AuthUser(user))
    }
}
