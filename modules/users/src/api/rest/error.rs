use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Handler failure rendered as a plain-text body.
///
/// Which status a domain error maps to is decided per endpoint by the
/// handler, so this type only carries the status class and message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(err: impl Display) -> Self {
        Self::BadRequest(err.to_string())
    }

    pub fn internal(err: impl Display) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Internal(_) => tracing::error!(
                error = %self,
                status = status.as_u16(),
                "request failed"
            ),
            Self::BadRequest(_) => tracing::warn!(
                error = %self,
                status = status.as_u16(),
                "request failed"
            ),
        }

        (status, self.to_string()).into_response()
    }
}
