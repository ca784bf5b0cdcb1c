use crate::db::exercise_ops;
use crate::error::AppError;
use crate::routes::{Reply, created, ok};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use fitsense_core::{ExerciseInput, ExerciseItem};
use std::sync::Arc;

pub(crate) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_exercise))
        .route("/{name}", get(get_exercise))
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ExerciseInput>, JsonRejection>,
) -> Reply<ExerciseItem> {
    let Json(input) = body?;
    created(exercise_ops::create_exercise(&state.db, input).await?.into())
}

async fn get_exercise(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Reply<ExerciseItem> {
    let Path(name) = path?;
    let exercise = exercise_ops::find_exercise_by_name(&state.db, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Exercise '{name}' not found")))?;
    ok(exercise.into())
}
