use std::net::AddrParseError;

use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

pub type ServerResult<T> = core::result::Result<T, TabSessionServerError>;

#[derive(Debug, Error, Clone)]
pub enum TabSessionServerError {
    #[error("'{0}' query string is missing!")]
    TabIdMissing(String),
    #[error("No session found for tab: {0}.")]
    SessionNotFound(String),
    #[error("{0}")]
    AddrParseError(#[from] AddrParseError),
    #[error("Server start error: {0}")]
    ServerStartError(String),
    #[error("Invalid options: {0}")]
    InvalidServerOptions(String),
}

impl IntoResponse for TabSessionServerError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            TabSessionServerError::TabIdMissing(_) => StatusCode::BAD_REQUEST,
            TabSessionServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
