//! Request errors reported to Subsonic clients

use super::responses::Subsonic;
use axum::extract::rejection::QueryRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors surfaced to the caller before a search is dispatched
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Required parameter is missing: {0}")]
    MissingParameter(&'static str),

    #[error("{0}")]
    Generic(String),
}

impl ApiError {
    /// Subsonic error code
    pub fn code(&self) -> u32 {
        match self {
            Self::MissingParameter(_) => 10,
            Self::Generic(_) => 0,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Generic(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    // Subsonic reports failures inside a 200 response
    fn into_response(self) -> Response {
        tracing::debug!("Rejecting request: {}", self);
        Json(Subsonic::failed(self.code(), self.to_string()).into_envelope()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter() {
        let err = ApiError::MissingParameter("query");
        assert_eq!(err.code(), 10);
        assert_eq!(err.to_string(), "Required parameter is missing: query");
    }

    #[test]
    fn test_generic() {
        let err = ApiError::Generic("something went wrong".to_string());
        assert_eq!(err.code(), 0);
        assert_eq!(err.to_string(), "something went wrong");
    }
}
