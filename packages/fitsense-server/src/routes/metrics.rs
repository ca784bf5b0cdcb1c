use crate::db::{metric_ops, user_ops};
use crate::error::AppError;
use crate::routes::{Reply, created, ok, path_id};
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use chrono::Utc;
use fitsense_core::{DeletedCount, MetricInput, MetricItem, validate_height, validate_weight};
use std::sync::Arc;
use uuid::Uuid;

pub(crate) async fn record_metric(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<MetricInput>, JsonRejection>,
) -> Reply<MetricItem> {
    let user_id = path_id(path)?;
    let Json(input) = body?;
    let height = input.height.map(validate_height).transpose()?;
    let weight = input.weight.map(validate_weight).transpose()?;

    user_ops::find_user(&state.db, user_id).await?;
    let metric = match (height, weight) {
        (Some(height), Some(weight)) => {
            metric_ops::create_metric(&state.db, user_id, height, weight, Utc::now()).await?
        }
        (Some(height), None) => metric_ops::update_height(&state.db, user_id, height).await?,
        (None, Some(weight)) => metric_ops::update_weight(&state.db, user_id, weight).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Provide height, weight or both".into(),
            ));
        }
    };
    created(metric.into())
}

pub(crate) async fn list_metrics(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<Vec<MetricItem>> {
    let user_id = path_id(path)?;
    user_ops::find_user(&state.db, user_id).await?;
    let metrics = metric_ops::list_metrics(&state.db, user_id).await?;
    ok(metrics.into_iter().map(MetricItem::from).collect())
}

pub(crate) async fn latest_metric(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<MetricItem> {
    let user_id = path_id(path)?;
    let metric = metric_ops::latest_metric(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No metrics recorded for user {user_id}")))?;
    ok(metric.into())
}

pub(crate) async fn delete_metrics(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Reply<DeletedCount> {
    let user_id = path_id(path)?;
    let deleted_count = metric_ops::delete_user_metrics(&state.db, user_id).await?;
    ok(DeletedCount { deleted_count })
}
