use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use session_manager::SessionError;
use thiserror::Error;
use todo_core::TodoError;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Todo(#[from] TodoError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Session is not available for this request")]
    MissingSession,
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::Todo(TodoError::Validation(_)) => "validation_error",
            AppError::Todo(TodoError::NotFound(_)) => "not_found",
            AppError::Session(_) | AppError::MissingSession => "api_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Todo(TodoError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Todo(TodoError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MissingSession => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: self.error_type().to_string(),
            },
        };
        HttpResponse::build(status_code).json(error_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{NameSubject, NotFoundError, ValidationError};

    #[test]
    fn test_status_codes_follow_error_kind() {
        let invalid = AppError::from(TodoError::from(ValidationError::InvalidLength(
            NameSubject::List,
        )));
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing = AppError::from(TodoError::from(NotFoundError::TodoNotFound));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "The specified todo was not found.");

        assert_eq!(
            AppError::MissingSession.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
