use std::io;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Custom error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("page not found")]
    NotFound,
    #[error("invalid path")]
    InvalidPath,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unsupported media type")]
    UnsupportedMediaType,
    #[error("{0}")]
    RenderError(String),
    #[error(transparent)]
    InvalidForm(#[from] BytesRejection),
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            // Path and lookup failures never leak details to the client
            WikiError::NotFound | WikiError::InvalidPath => {
                (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
            }
            WikiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "405 method not allowed\n").into_response()
            }
            WikiError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected request with `Content-Type: application/x-www-form-urlencoded`\n",
            )
                .into_response(),
            WikiError::Io(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", e)).into_response()
            }
            WikiError::RenderError(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", e)).into_response()
            }
            // Keeps axum's own status, e.g. 413 for an oversized body
            WikiError::InvalidForm(rejection) => rejection.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(WikiError::InvalidPath.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(WikiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            WikiError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            WikiError::UnsupportedMediaType.into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            WikiError::RenderError("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(WikiError::from(io).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn io_message_is_exposed() {
        let err = WikiError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(err.to_string(), "disk full");
    }
}
