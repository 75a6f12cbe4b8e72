//! App-level error type for handlers and the HTTP surface.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::GameError;

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    detail: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Game(#[from] GameError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        AppError::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        AppError::Internal {
            detail: detail.into(),
        }
    }

    fn code(&self) -> String {
        match self {
            AppError::Game(err) => err.code().to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Game(GameError::RoomNotFound) => StatusCode::NOT_FOUND,
            AppError::Game(GameError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Game(_) => StatusCode::BAD_REQUEST,
            AppError::Config { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            code: self.code(),
            detail: self.to_string(),
        })
    }
}
