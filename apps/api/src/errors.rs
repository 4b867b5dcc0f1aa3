use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extractor::ExtractionError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Store(e @ StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
            }
            AppError::Store(e @ StoreError::InvalidRecord(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                e.to_string(),
            ),
            AppError::Store(StoreError::Unavailable(msg)) => {
                tracing::error!("Store unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The skill store is temporarily unreachable".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "STORE_ERROR",
                    "The skill store returned an unexpected response".to_string(),
                )
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    "Skill extraction failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Table;
    use uuid::Uuid;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = AppError::from(StoreError::NotFound {
            table: Table::JobDescriptions,
            id: Uuid::nil(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_unavailable_maps_to_503() {
        let err = AppError::from(StoreError::Unavailable("timeout".into()));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_store_rejected_maps_to_502() {
        let err = AppError::from(StoreError::Rejected("401".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
        let err = AppError::from(StoreError::Decode("bad json".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation("description cannot be empty".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_record_maps_to_422() {
        let err = AppError::from(StoreError::InvalidRecord("too many skills".into()));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_extraction_failure_maps_to_500_without_leaking_detail() {
        let err = AppError::from(ExtractionError::Backend("model server down".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
        assert_eq!(body["error"]["message"], "Skill extraction failed");
    }
}
