use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::parsing::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "erro interno do servidor".to_string(),
                )
            }
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::parsing::DateError;

    #[test]
    fn test_status_mapping() {
        let res = AppError::NotFound("nope".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = AppError::Validation(ValidationError::Date(DateError::Missing)).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = AppError::Storage(anyhow::anyhow!("disk on fire")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_storage_error_hides_detail() {
        let res = AppError::Storage(anyhow::anyhow!("disk on fire")).into_response();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("disk on fire"));
        assert!(text.contains("erro interno"));
    }
}
