use crate::db::users::{self, Entity as Users, Model as UserModel};
use crate::db::{exercises, metrics, workouts};
use crate::error::AppError;
use chrono::Utc;
use fitsense_core::{ActivityLevel, Plan, UserInfo};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    activity: ActivityLevel,
    plan: Plan,
    username: Option<String>,
    password_hash: Option<String>,
) -> Result<UserModel, AppError> {
    if let Some(name) = &username {
        ensure_username_free(db, name).await?;
    }

    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        password_hash: Set(password_hash),
        activity_level: Set(activity.as_str().to_string()),
        plan: Set(plan.as_str().to_string()),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    };

    new_user
        .insert(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {e}")))
}

pub async fn find_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<UserModel, AppError> {
    Users::find_by_id(user_id)
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read user: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

async fn ensure_username_free<C: ConnectionTrait>(db: &C, username: &str) -> Result<(), AppError> {
    let taken = Users::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to check username: {e}")))?;

    match taken {
        Some(_) => Err(AppError::BadRequest(format!(
            "Username '{username}' is already taken"
        ))),
        None => Ok(()),
    }
}

async fn touch<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    what: &str,
    apply: impl FnOnce(&mut users::ActiveModel),
) -> Result<UserModel, AppError> {
    let user = find_user(db, user_id).await?;
    let mut active_model: users::ActiveModel = user.into();
    apply(&mut active_model);
    active_model.updated_at = Set(Some(Utc::now()));
    active_model
        .update(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update {what}: {e}")))
}

pub async fn update_username<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    username: &str,
) -> Result<UserModel, AppError> {
    let current = find_user(db, user_id).await?;
    if current.username.as_deref() != Some(username) {
        ensure_username_free(db, username).await?;
    }
    let username = username.to_string();
    touch(db, user_id, "username", |user| user.username = Set(Some(username))).await
}

pub async fn update_password<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    password_hash: &str,
) -> Result<UserModel, AppError> {
    let hash = password_hash.to_string();
    touch(db, user_id, "password", |user| user.password_hash = Set(Some(hash))).await
}

pub async fn update_activity<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    activity: ActivityLevel,
) -> Result<UserModel, AppError> {
    touch(db, user_id, "activity level", |user| {
        user.activity_level = Set(activity.as_str().to_string())
    })
    .await
}

pub async fn update_plan<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    plan: Plan,
) -> Result<UserModel, AppError> {
    touch(db, user_id, "plan", |user| user.plan = Set(plan.as_str().to_string())).await
}

/// Remove a user with their metrics, workouts and custom exercises.
pub async fn delete_user(db: &DatabaseConnection, user_id: Uuid) -> Result<(), AppError> {
    let txn = db
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to start transaction: {e}")))?;

    let workouts = workouts::Entity::delete_many()
        .filter(workouts::Column::UserId.eq(user_id))
        .exec(&txn)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete user workouts: {e}")))?;
    let metrics = metrics::Entity::delete_many()
        .filter(metrics::Column::UserId.eq(user_id))
        .exec(&txn)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete user metrics: {e}")))?;
    let exercises = exercises::Entity::delete_many()
        .filter(exercises::Column::UserId.eq(user_id))
        .filter(exercises::Column::Custom.eq(true))
        .exec(&txn)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete user exercises: {e}")))?;

    let result = Users::delete_by_id(user_id)
        .exec(&txn)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete user: {e}")))?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }

    txn.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit user deletion: {e}")))?;

    info!(
        %user_id,
        workouts = workouts.rows_affected,
        metrics = metrics.rows_affected,
        exercises = exercises.rows_affected,
        "user deleted"
    );
    Ok(())
}

pub fn user_info(model: UserModel) -> Result<UserInfo, AppError> {
    let activity_level = model
        .activity_level
        .parse::<ActivityLevel>()
        .map_err(|e| AppError::Internal(format!("stored user {}: {e}", model.id)))?;
    let plan = model
        .plan
        .parse::<Plan>()
        .map_err(|e| AppError::Internal(format!("stored user {}: {e}", model.id)))?;

    Ok(UserInfo {
        user_id: model.id,
        has_password: model.password_hash.is_some(),
        username: model.username,
        activity_level,
        plan,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{metric_ops, workout_ops};
    use crate::test_support::memory_db;
    use fitsense_core::ParsedExercise;

    fn squat() -> Vec<ParsedExercise> {
        vec![ParsedExercise {
            exercise: "Squat".into(),
            sets: 3,
            rep_range: [8, 12],
        }]
    }

    #[tokio::test]
    async fn create_and_read_back() {
        let db = memory_db().await;
        let user = create_user(
            &db,
            ActivityLevel::Active,
            Plan::LeanBulk,
            Some("sam".into()),
            None,
        )
        .await
        .unwrap();

        let info = user_info(find_user(&db, user.id).await.unwrap()).unwrap();
        assert_eq!(info.username.as_deref(), Some("sam"));
        assert_eq!(info.plan, Plan::LeanBulk);
        assert_eq!(info.activity_level, ActivityLevel::Active);
        assert!(!info.has_password);
        assert!(info.updated_at.is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let db = memory_db().await;
        create_user(&db, ActivityLevel::Active, Plan::Maintain, Some("sam".into()), None)
            .await
            .unwrap();
        let err = create_user(&db, ActivityLevel::Active, Plan::Maintain, Some("sam".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn updates_stamp_updated_at() {
        let db = memory_db().await;
        let user = create_user(&db, ActivityLevel::Sedentary, Plan::Maintain, None, None)
            .await
            .unwrap();

        let updated = update_plan(&db, user.id, Plan::AggressiveCut).await.unwrap();
        assert_eq!(updated.plan, "Aggressive Cut");
        assert!(updated.updated_at.is_some());

        let updated = update_activity(&db, user.id, ActivityLevel::ExtremelyActive)
            .await
            .unwrap();
        assert_eq!(updated.activity_level, "Extremely Active");

        let updated = update_username(&db, user.id, "alex").await.unwrap();
        assert_eq!(updated.username.as_deref(), Some("alex"));
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let db = memory_db().await;
        let err = update_plan(&db, Uuid::new_v4(), Plan::Maintain).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = delete_user(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_cascades_only_to_own_records() {
        let db = memory_db().await;
        let doomed = create_user(&db, ActivityLevel::Active, Plan::Maintain, None, None)
            .await
            .unwrap();
        let kept = create_user(&db, ActivityLevel::Active, Plan::Maintain, None, None)
            .await
            .unwrap();

        for user in [&doomed, &kept] {
            metric_ops::create_metric(&db, user.id, 70, 180.0, Utc::now())
                .await
                .unwrap();
            workout_ops::create_workout(&db, user.id, "legs", "prompt", "raw", &squat())
                .await
                .unwrap();
        }

        delete_user(&db, doomed.id).await.unwrap();

        assert!(matches!(
            find_user(&db, doomed.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(metric_ops::list_metrics(&db, doomed.id).await.unwrap().is_empty());
        assert!(
            workout_ops::list_workouts_for_user(&db, doomed.id)
                .await
                .unwrap()
                .is_empty()
        );

        assert!(find_user(&db, kept.id).await.is_ok());
        assert_eq!(metric_ops::list_metrics(&db, kept.id).await.unwrap().len(), 1);
        assert_eq!(
            workout_ops::list_workouts_for_user(&db, kept.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
