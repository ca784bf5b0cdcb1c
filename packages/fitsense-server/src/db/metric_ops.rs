use crate::db::metrics::{self, Entity as Metrics, Model as MetricModel};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use fitsense_core::MetricItem;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub async fn create_metric<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    height: i32,
    weight: f64,
    recorded_at: DateTime<Utc>,
) -> Result<MetricModel, AppError> {
    let new_metric = metrics::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        height: Set(height),
        weight: Set(weight),
        recorded_at: Set(recorded_at),
    };

    new_metric
        .insert(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create metric: {e}")))
}

pub async fn latest_metric(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<MetricModel>, AppError> {
    Metrics::find()
        .filter(metrics::Column::UserId.eq(user_id))
        .order_by_desc(metrics::Column::RecordedAt)
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read latest metric: {e}")))
}

pub async fn list_metrics(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<MetricModel>, AppError> {
    Metrics::find()
        .filter(metrics::Column::UserId.eq(user_id))
        .order_by_desc(metrics::Column::RecordedAt)
        .all(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list metrics: {e}")))
}

/// Append a metric with a new height, carrying the last weight forward.
pub async fn update_height(
    db: &DatabaseConnection,
    user_id: Uuid,
    height: i32,
) -> Result<MetricModel, AppError> {
    let previous = latest_metric(db, user_id).await?.ok_or_else(|| {
        AppError::BadRequest("No previous weight recorded; provide both height and weight".into())
    })?;
    create_metric(db, user_id, height, previous.weight, Utc::now()).await
}

/// Append a metric with a new weight, carrying the last height forward.
pub async fn update_weight(
    db: &DatabaseConnection,
    user_id: Uuid,
    weight: f64,
) -> Result<MetricModel, AppError> {
    let previous = latest_metric(db, user_id).await?.ok_or_else(|| {
        AppError::BadRequest("No previous height recorded; provide both height and weight".into())
    })?;
    create_metric(db, user_id, previous.height, weight, Utc::now()).await
}

pub async fn delete_user_metrics(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, AppError> {
    let result = Metrics::delete_many()
        .filter(metrics::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete user metrics: {e}")))?;

    Ok(result.rows_affected)
}

impl From<MetricModel> for MetricItem {
    fn from(model: MetricModel) -> Self {
        MetricItem {
            metric_id: model.id,
            user_id: model.user_id,
            height: model.height,
            weight: model.weight,
            recorded_at: model.recorded_at,
        }
    }
}
