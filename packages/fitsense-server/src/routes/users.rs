use crate::db::user_ops;
use crate::error::AppError;
use crate::routes::{Reply, metrics, ok, path_id, workouts};
use crate::services::users;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use fitsense_core::{UpdateUserInput, UpdateUserResponse, UserInfo};
use std::sync::Arc;
use uuid::Uuid;

pub(crate) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route(
            "/{id}/metrics",
            get(metrics::list_metrics)
                .post(metrics::record_metric)
                .delete(metrics::delete_metrics),
        )
        .route("/{id}/metrics/latest", get(metrics::latest_metric))
        .route(
            "/{id}/workouts",
            get(workouts::list_user_workouts)
                .post(workouts::generate_workout)
                .delete(workouts::delete_user_workouts),
        )
        .route("/{id}/workouts/latest", get(workouts::latest_user_workout))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<UserInfo> {
    let user_id = path_id(path)?;
    let user = user_ops::find_user(&state.db, user_id).await?;
    ok(user_ops::user_info(user)?)
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateUserInput>, JsonRejection>,
) -> Reply<UpdateUserResponse> {
    let user_id = path_id(path)?;
    let Json(input) = body?;
    ok(users::update_user(&state, user_id, input).await?)
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let user_id = path_id(path)?;
    user_ops::delete_user(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
