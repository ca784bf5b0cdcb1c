use crate::db::{user_ops, workout_ops};
use crate::error::AppError;
use crate::routes::{Reply, created, ok, path_id};
use crate::services::workouts::generate_for_user;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use fitsense_core::{DeletedCount, GeneratedWorkout, WorkoutItem, WorkoutRequest};
use std::sync::Arc;
use uuid::Uuid;

pub(crate) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{id}", get(get_workout).delete(delete_workout))
        .route("/{id}/complete", post(complete_workout))
}

pub(crate) async fn generate_workout(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<WorkoutRequest>, JsonRejection>,
) -> Reply<GeneratedWorkout> {
    let user_id = path_id(path)?;
    let Json(request) = body?;
    created(generate_for_user(&state, user_id, &request).await?)
}

pub(crate) async fn list_user_workouts(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<Vec<WorkoutItem>> {
    let user_id = path_id(path)?;
    user_ops::find_user(&state.db, user_id).await?;
    let items = workout_ops::list_workouts_for_user(&state.db, user_id)
        .await?
        .into_iter()
        .map(workout_ops::workout_item)
        .collect::<Result<Vec<_>, _>>()?;
    ok(items)
}

pub(crate) async fn latest_user_workout(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<WorkoutItem> {
    let user_id = path_id(path)?;
    let workout = workout_ops::latest_workout_for_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No workouts found for user {user_id}")))?;
    ok(workout_ops::workout_item(workout)?)
}

pub(crate) async fn delete_user_workouts(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<DeletedCount> {
    let user_id = path_id(path)?;
    let deleted_count = workout_ops::delete_user_workouts(&state.db, user_id).await?;
    ok(DeletedCount { deleted_count })
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<WorkoutItem> {
    let workout_id = path_id(path)?;
    let workout = workout_ops::find_workout(&state.db, workout_id).await?;
    ok(workout_ops::workout_item(workout)?)
}

async fn complete_workout(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<WorkoutItem> {
    let workout_id = path_id(path)?;
    let workout = workout_ops::complete_workout(&state.db, workout_id).await?;
    ok(workout_ops::workout_item(workout)?)
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let workout_id = path_id(path)?;
    workout_ops::delete_workout(&state.db, workout_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
