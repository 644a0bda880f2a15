//! Error types for the JSON and page surfaces

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tasks::DomainError;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::Envelope;
use crate::views::ERROR_PAGE;

pub const UNAUTHENTICATED: &str = "Acesso negado. Faça login para continuar.";

/// Error type for the `/api` surface
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid input or an impossible state change
    #[error("{0}")]
    BadRequest(String),

    /// Missing session or rejected credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Missing resource, or one owned by someone else
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; the detail is logged, never sent
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized(UNAUTHENTICATED.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) | DomainError::Conflict(message) => {
                ApiError::BadRequest(message)
            }
            DomainError::NotFound(message) => ApiError::NotFound(message),
            DomainError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected JSON body: {}", rejection.body_text());
        ApiError::BadRequest("Corpo da requisição inválido".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }
        };

        (status, Envelope::failure(message)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Unexpected failure while serving a page
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!("Page failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;
