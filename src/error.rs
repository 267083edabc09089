//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ApiError;
use crate::pricing::models::ValidationError;
use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream API error: {0}")]
    Upstream(ApiError),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        match e {
            e if e.is_not_found() => AppError::NotFound,
            ApiError::InvalidPayload(msg) => AppError::BadRequest(msg),
            e => AppError::Upstream(e),
        }
    }
}

impl From<PricingError> for AppError {
    fn from(e: PricingError) -> Self {
        match e {
            PricingError::Validation(v) => AppError::Validation(v),
            PricingError::CatalogNotFound { .. } => AppError::NotFound,
            PricingError::Upstream { message } => AppError::CatalogUnavailable(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match &self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Resource not found".to_string(),
                None,
            ),
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
                e.message.clone(),
                Some(serde_json::json!({ "field": e.field })),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            AppError::Upstream(e) => {
                tracing::error!("Upstream API error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream",
                    "School API request failed".to_string(),
                    None,
                )
            }
            AppError::CatalogUnavailable(msg) => {
                tracing::error!("Catalog unavailable: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream",
                    "Catalog could not be loaded".to_string(),
                    None,
                )
            }
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::SubjectType;

    #[test]
    fn test_validation_maps_to_422_with_field() {
        let response = AppError::from(ValidationError::new("headcount", "must be between 1 and 20"))
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_api_not_found_maps_to_404() {
        let err = AppError::from(ApiError::Status {
            status: 404,
            message: "Not found".to_string(),
        });
        assert!(matches!(err, AppError::NotFound));

        let err = AppError::from(ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_missing_catalog_entry_maps_to_404() {
        let err = AppError::from(PricingError::CatalogNotFound {
            subject: SubjectType::Course,
            id: 3,
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
