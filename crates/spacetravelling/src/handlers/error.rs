use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use spacetravelling_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::generate::GenerationError;

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn repository_error(&self) -> Option<&RepositoryError> {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            return Some(repo_error);
        }
        match self.0.downcast_ref::<GenerationError>() {
            Some(GenerationError::Repository(repo_error)) => Some(repo_error),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match self.repository_error() {
            Some(repo_error) => {
                let code = repository_error_to_status_code(repo_error);
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(status = %status_code, error = %self.0, "Request failed");

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
