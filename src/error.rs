use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Shopping(#[from] famplan_shared::Error),

    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidBody(rejection) => {
                (rejection.status(), "invalid_body", rejection.body_text())
            }
            AppError::Shopping(famplan_shared::Error::Validate(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                errors.to_string(),
            ),
            AppError::Shopping(famplan_shared::Error::User(message)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message)
            }
            AppError::Shopping(err @ famplan_shared::Error::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            AppError::Shopping(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({ "error": { "code": code, "message": message } })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                famplan_shared::Error::User("at least one meal id is required".to_owned()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                famplan_shared::Error::NotFound("shopping list 01J".to_owned()),
                StatusCode::NOT_FOUND,
            ),
            (
                famplan_shared::Error::Server("disk full".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }
}
