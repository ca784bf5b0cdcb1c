use crate::db::workouts::{self, Entity as Workouts, Model as WorkoutModel, WorkoutStatus};
use crate::error::AppError;
use crate::services::generation::parser;
use chrono::Utc;
use fitsense_core::{ParsedExercise, WorkoutItem};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

pub async fn create_workout(
    db: &DatabaseConnection,
    user_id: Uuid,
    muscles_targeted: &str,
    llm_prompt: &str,
    llm_raw: &str,
    parsed: &[ParsedExercise],
) -> Result<WorkoutModel, AppError> {
    let new_workout = workouts::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        muscles_targeted: Set(muscles_targeted.to_string()),
        llm_prompt: Set(llm_prompt.to_string()),
        llm_raw: Set(llm_raw.to_string()),
        parsed_workout: Set(parser::to_stored(parsed)?),
        date_generated: Set(Utc::now()),
        status: Set(WorkoutStatus::Generated),
        completed_on: Set(None),
    };

    new_workout
        .insert(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create workout: {e}")))
}

pub async fn find_workout(
    db: &DatabaseConnection,
    workout_id: Uuid,
) -> Result<WorkoutModel, AppError> {
    Workouts::find_by_id(workout_id)
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read workout: {e}")))?
        .ok_or_else(|| AppError::NotFound(format!("Workout {workout_id} not found")))
}

pub async fn list_workouts_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<WorkoutModel>, AppError> {
    Workouts::find()
        .filter(workouts::Column::UserId.eq(user_id))
        .order_by_desc(workouts::Column::DateGenerated)
        .all(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list workouts: {e}")))
}

pub async fn latest_workout_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<WorkoutModel>, AppError> {
    Workouts::find()
        .filter(workouts::Column::UserId.eq(user_id))
        .order_by_desc(workouts::Column::DateGenerated)
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read latest workout: {e}")))
}

pub async fn recent_workouts_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    limit: u64,
) -> Result<Vec<WorkoutModel>, AppError> {
    Workouts::find()
        .filter(workouts::Column::UserId.eq(user_id))
        .order_by_desc(workouts::Column::DateGenerated)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read recent workouts: {e}")))
}

pub async fn complete_workout(
    db: &DatabaseConnection,
    workout_id: Uuid,
) -> Result<WorkoutModel, AppError> {
    let workout = find_workout(db, workout_id).await?;
    let mut active_model: workouts::ActiveModel = workout.into();
    active_model.status = Set(WorkoutStatus::Completed);
    active_model.completed_on = Set(Some(Utc::now()));
    active_model
        .update(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to complete workout: {e}")))
}

pub async fn delete_workout(db: &DatabaseConnection, workout_id: Uuid) -> Result<(), AppError> {
    let result = Workouts::delete_by_id(workout_id)
        .exec(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete workout: {e}")))?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Workout {workout_id} not found")));
    }
    Ok(())
}

pub async fn delete_user_workouts(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<u64, AppError> {
    let result = Workouts::delete_many()
        .filter(workouts::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete user workouts: {e}")))?;

    Ok(result.rows_affected)
}

pub fn workout_item(model: WorkoutModel) -> Result<WorkoutItem, AppError> {
    Ok(WorkoutItem {
        workout_details: parser::from_stored(&model.parsed_workout)?,
        workout_id: model.id,
        user_id: model.user_id,
        muscles_targeted: model.muscles_targeted,
        llm_prompt: model.llm_prompt,
        llm_raw: model.llm_raw,
        date_generated: model.date_generated,
        status: model.status.into(),
        completed_on: model.completed_on,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::user_ops;
    use crate::test_support::memory_db;
    use fitsense_core::{ActivityLevel, Plan};

    fn plan_of(name: &str) -> Vec<ParsedExercise> {
        vec![ParsedExercise {
            exercise: name.into(),
            sets: 3,
            rep_range: [8, 12],
        }]
    }

    async fn user(db: &DatabaseConnection) -> Uuid {
        user_ops::create_user(db, ActivityLevel::Active, Plan::Maintain, None, None)
            .await
            .unwrap()
            .id
    }

    async fn backdate(db: &DatabaseConnection, model: WorkoutModel, day: u32) {
        use chrono::TimeZone;
        let mut active: workouts::ActiveModel = model.into();
        active.date_generated = Set(Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap());
        active.update(db).await.unwrap();
    }

    #[tokio::test]
    async fn stored_workout_reads_back_as_item() {
        let db = memory_db().await;
        let user_id = user(&db).await;
        let created = create_workout(&db, user_id, "legs", "p", "r", &plan_of("Squat"))
            .await
            .unwrap();

        let item = workout_item(find_workout(&db, created.id).await.unwrap()).unwrap();
        assert_eq!(item.workout_details, plan_of("Squat"));
        assert_eq!(item.status, fitsense_core::WorkoutStatus::Generated);
        assert!(item.completed_on.is_none());
    }

    #[tokio::test]
    async fn ordering_and_limits() {
        let db = memory_db().await;
        let user_id = user(&db).await;
        for (day, name) in [(1, "Squat"), (3, "Deadlift"), (2, "Lunge")] {
            let w = create_workout(&db, user_id, "legs", "p", "r", &plan_of(name))
                .await
                .unwrap();
            backdate(&db, w, day).await;
        }

        let names: Vec<String> = list_workouts_for_user(&db, user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|w| workout_item(w).unwrap().workout_details[0].exercise.clone())
            .collect();
        assert_eq!(names, ["Deadlift", "Lunge", "Squat"]);

        let latest = latest_workout_for_user(&db, user_id).await.unwrap().unwrap();
        assert!(latest.parsed_workout.contains("Deadlift"));
        assert_eq!(recent_workouts_for_user(&db, user_id, 2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn complete_flips_status() {
        let db = memory_db().await;
        let user_id = user(&db).await;
        let created = create_workout(&db, user_id, "arms", "p", "r", &plan_of("Curl"))
            .await
            .unwrap();

        let done = complete_workout(&db, created.id).await.unwrap();
        assert_eq!(done.status, WorkoutStatus::Completed);
        assert!(done.completed_on.is_some());
        assert!(matches!(
            complete_workout(&db, Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn deletes() {
        let db = memory_db().await;
        let user_id = user(&db).await;
        let first = create_workout(&db, user_id, "arms", "p", "r", &plan_of("Curl"))
            .await
            .unwrap();
        create_workout(&db, user_id, "arms", "p", "r", &plan_of("Dip"))
            .await
            .unwrap();

        delete_workout(&db, first.id).await.unwrap();
        assert!(matches!(
            delete_workout(&db, first.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(delete_user_workouts(&db, user_id).await.unwrap(), 1);
    }
}
