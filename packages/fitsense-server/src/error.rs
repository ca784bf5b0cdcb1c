use crate::llm::LlmError;
use crate::services::generation::parser::ParseError;
use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use fitsense_core::{ErrorBody, ValidationError};
use sea_orm::DbErr;
use std::fmt;
use tracing::{error, warn};

#[derive(Debug)]
pub(crate) enum AppError {
    Db(DbErr),
    Json(serde_json::Error),
    DatabaseError(String),
    BadRequest(String),
    NotFound(String),
    Llm(LlmError),
    LlmOutput(ParseError),
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Db(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        Self::Llm(err)
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        Self::LlmOutput(err)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing failed: {err}"))
    }
}

impl AppError {
    pub(crate) fn status_and_tag(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Db(_) | AppError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
            AppError::Json(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "client_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Llm(err) => {
                let status = err
                    .upstream_status()
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, "llm_api_error")
            }
            AppError::LlmOutput(ParseError::Upstream(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "llm_api_error")
            }
            AppError::LlmOutput(_) => (StatusCode::INTERNAL_SERVER_ERROR, "llm_parsing_error"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(err) => write!(f, "Database error: {}", err),
            AppError::Json(err) => write!(f, "JSON error: {}", err),
            AppError::DatabaseError(msg) => write!(f, "Database operation error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Llm(err) => write!(f, "{}", err),
            AppError::LlmOutput(err) => write!(f, "{}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, tag) = self.status_and_tag();
        let message = match &self {
            AppError::Db(err) => {
                error!(error = %err, "database error");
                "database error".to_string()
            }
            AppError::Json(err) => {
                error!(error = %err, "json error");
                "json error".to_string()
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                warn!(error = %msg, tag, "request rejected");
                msg.clone()
            }
            other => {
                error!(error = %other, tag, "request failed");
                other.to_string()
            }
        };
        (
            status,
            Json(ErrorBody {
                error: message,
                tag: tag.to_string(),
            }),
        )
            .into_response()
    }
}
