use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Outcome variants the resource layer maps onto HTTP statuses. Store
/// failures are caught exactly once, here, and never reach the client
/// beyond a bare 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, msg.to_string()).into_response()
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.to_string()).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.to_string()).into_response(),
            ApiError::Store(e) => {
                error!(error = %e, "store error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    #[tokio::test]
    async fn not_found_maps_to_404_with_empty_body() {
        let res = ApiError::NotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn store_error_maps_to_500_with_empty_body() {
        let res = ApiError::Store(anyhow::anyhow!("connection dropped")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn conflict_and_unauthorized_statuses() {
        assert_eq!(
            ApiError::Conflict("taken").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Unauthorized("no").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
