//! Stable error codes and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::routes::view;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Db(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid or missing form token")]
    InvalidToken,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "DB_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidToken => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Db(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{} ({})", self, self.code());
        }

        let page = match &self {
            Self::NotFound(_) => view::not_found_page(),
            // Internal details stay in the log.
            Self::Db(_) | Self::Config(_) => view::error_page(status, "Something went wrong."),
            other => view::error_page(status, &other.to_string()),
        };

        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_code_and_status() {
        let cases = [
            (AppError::Db("x".into()), "DB_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::NotFound("x".into()), "NOT_FOUND", StatusCode::NOT_FOUND),
            (AppError::Conflict("x".into()), "CONFLICT", StatusCode::CONFLICT),
            (AppError::InvalidToken, "INVALID_TOKEN", StatusCode::BAD_REQUEST),
            (AppError::Config("x".into()), "CONFIG_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status(), status);
        }
    }
}
