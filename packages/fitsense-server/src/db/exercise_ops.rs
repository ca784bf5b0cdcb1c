use crate::db::exercises::{self, Entity as Exercises, Model as ExerciseModel};
use crate::db::user_ops;
use crate::error::AppError;
use chrono::Utc;
use fitsense_core::{ExerciseInput, ExerciseItem};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

const DEFAULT_EQUIPMENT: &str = "unknown";
const DEFAULT_DIFFICULTY: &str = "any";
const DEFAULT_INSTRUCTIONS: &str = "No instructions available";

pub async fn create_exercise(
    db: &DatabaseConnection,
    input: ExerciseInput,
) -> Result<ExerciseModel, AppError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Exercise name is required".into()));
    }
    match (input.is_custom, input.user_id) {
        (true, None) => {
            return Err(AppError::BadRequest(
                "Custom exercises must have an owning user".into(),
            ));
        }
        (false, Some(_)) => {
            return Err(AppError::BadRequest(
                "Catalog exercises cannot have an owning user".into(),
            ));
        }
        (true, Some(owner)) => {
            user_ops::find_user(db, owner).await?;
        }
        (false, None) => {}
    }
    if find_exercise_by_name(db, &name).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "Exercise '{name}' already exists"
        )));
    }

    let new_exercise = exercises::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        primary_muscle_group: Set(normalize_muscle(input.primary_muscle_group)),
        secondary_muscle_group: Set(normalize_muscle(input.secondary_muscle_group)),
        equipment: Set(input
            .equipment
            .unwrap_or_else(|| DEFAULT_EQUIPMENT.to_string())),
        difficulty: Set(input
            .difficulty
            .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string())),
        instructions: Set(input
            .instructions
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string())),
        video_url: Set(input.video_url),
        custom: Set(input.is_custom),
        user_id: Set(input.user_id),
        created_at: Set(Utc::now()),
    };

    new_exercise
        .insert(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create exercise: {e}")))
}

/// Muscle groups are stored lowercase so candidate matching is
/// case-insensitive on every backend.
fn normalize_muscle(group: Option<String>) -> Option<String> {
    group
        .map(|g| g.trim().to_lowercase())
        .filter(|g| !g.is_empty())
}

pub async fn find_exercise_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<ExerciseModel>, AppError> {
    Exercises::find()
        .filter(exercises::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read exercise: {e}")))
}

/// Catalog or `owner`-made exercises whose primary muscle group mentions
/// any of `terms`.
pub async fn find_candidates(
    db: &DatabaseConnection,
    terms: &[String],
    owner: Uuid,
    limit: u64,
) -> Result<Vec<ExerciseModel>, AppError> {
    let terms: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let matches_term = terms.iter().fold(Condition::any(), |cond, term| {
        cond.add(exercises::Column::PrimaryMuscleGroup.contains(term))
    });

    let visible = Condition::any()
        .add(exercises::Column::Custom.eq(false))
        .add(exercises::Column::UserId.eq(owner));

    Exercises::find()
        .filter(Condition::all().add(visible).add(matches_term))
        .order_by_asc(exercises::Column::Name)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to find exercise candidates: {e}")))
}

impl From<ExerciseModel> for ExerciseItem {
    fn from(model: ExerciseModel) -> Self {
        ExerciseItem {
            exercise_id: model.id,
            name: model.name,
            primary_muscle_group: model.primary_muscle_group,
            secondary_muscle_group: model.secondary_muscle_group,
            equipment: model.equipment,
            difficulty: model.difficulty,
            instructions: model.instructions,
            video_url: model.video_url,
            is_custom: model.custom,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use fitsense_core::{ActivityLevel, Plan};

    fn catalog(name: &str, muscle: &str) -> ExerciseInput {
        ExerciseInput {
            name: name.into(),
            primary_muscle_group: Some(muscle.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn custom_exercise_without_owner_is_rejected() {
        let db = memory_db().await;
        let input = ExerciseInput {
            is_custom: true,
            ..catalog("My Press", "chest")
        };
        assert!(matches!(
            create_exercise(&db, input).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(find_exercise_by_name(&db, "My Press").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn custom_exercise_with_unknown_owner_is_not_found() {
        let db = memory_db().await;
        let input = ExerciseInput {
            is_custom: true,
            user_id: Some(Uuid::new_v4()),
            ..catalog("Ghost Lift", "back")
        };
        assert!(matches!(
            create_exercise(&db, input).await,
            Err(AppError::NotFound(_))
        ));
        assert!(find_exercise_by_name(&db, "Ghost Lift").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn catalog_exercise_gets_defaults() {
        let db = memory_db().await;
        let created = create_exercise(&db, catalog("Barbell Squat", "quadriceps"))
            .await
            .unwrap();
        assert_eq!(created.equipment, "unknown");
        assert_eq!(created.difficulty, "any");
        assert_eq!(created.instructions, "No instructions available");
        assert!(!created.custom);

        assert!(matches!(
            create_exercise(&db, catalog("Barbell Squat", "quadriceps")).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn candidates_cover_catalog_and_own_custom() {
        let db = memory_db().await;
        let me = user_ops::create_user(&db, ActivityLevel::Active, Plan::Maintain, None, None)
            .await
            .unwrap()
            .id;
        let other = user_ops::create_user(&db, ActivityLevel::Active, Plan::Maintain, None, None)
            .await
            .unwrap()
            .id;

        create_exercise(&db, catalog("Leg Press", "Quadriceps")).await.unwrap();
        create_exercise(&db, catalog("Bench Press", "chest")).await.unwrap();
        for (name, owner) in [("My Squat", me), ("Their Squat", other)] {
            create_exercise(
                &db,
                ExerciseInput {
                    is_custom: true,
                    user_id: Some(owner),
                    ..catalog(name, "quadriceps")
                },
            )
            .await
            .unwrap();
        }

        let names: Vec<String> = find_candidates(&db, &["quad".to_string()], me, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Leg Press", "My Squat"]);

        assert!(find_candidates(&db, &[" ".to_string()], me, 10).await.unwrap().is_empty());
        assert_eq!(
            find_candidates(&db, &["quad".to_string()], me, 1).await.unwrap().len(),
            1
        );
    }
}
