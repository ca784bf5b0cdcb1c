pub(crate) mod exercises;
pub(crate) mod generate;
pub(crate) mod index;
pub(crate) mod metrics;
pub(crate) mod users;
pub(crate) mod workouts;

use crate::error::AppError;
use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use fitsense_core::ApiResponse;
use serde::Serialize;
use uuid::Uuid;

pub(crate) type Reply<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

pub(crate) fn ok<T: Serialize>(data: T) -> Reply<T> {
    Ok((StatusCode::OK, Json(ApiResponse::ok(data))))
}

pub(crate) fn created<T: Serialize>(data: T) -> Reply<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(data))))
}

/// Unwrap a `{id}` path segment, reporting bad UUIDs as client errors.
pub(crate) fn path_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    let Path(id) = path?;
    Ok(id)
}
