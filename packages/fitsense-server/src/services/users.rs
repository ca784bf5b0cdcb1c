use crate::db::{metric_ops, user_ops, workout_ops};
use crate::error::AppError;
use crate::services::generation::PromptContext;
use crate::services::generation::parser::parse_workout;
use crate::services::workouts::require_muscles;
use crate::state::AppState;
use chrono::Utc;
use fitsense_core::{
    ActivityLevel, Plan, SignupInput, SignupResponse, UpdateUserInput, UpdateUserResponse,
    validate_height, validate_weight,
};
use sea_orm::TransactionTrait;
use tracing::info;
use uuid::Uuid;

pub(crate) fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::BadRequest("Password cannot be empty".into()));
    }
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Create the user and first metric, then generate their first workout.
///
/// The account survives a failed generation.
pub(crate) async fn signup(state: &AppState, input: SignupInput) -> Result<SignupResponse, AppError> {
    validate_height(input.height)?;
    validate_weight(input.weight)?;
    let muscles = require_muscles(&input.workout)?.to_string();
    let username = non_blank(input.username);
    let password_hash = match input.password.as_deref() {
        Some(password) if !password.is_empty() => Some(hash_password(password)?),
        _ => None,
    };

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to start transaction: {e}")))?;
    let user =
        user_ops::create_user(&txn, input.activity, input.plan, username, password_hash).await?;
    metric_ops::create_metric(&txn, user.id, input.height, input.weight, Utc::now()).await?;
    txn.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit signup: {e}")))?;
    info!(user_id = %user.id, "user signed up");

    let ctx = PromptContext {
        height: input.height,
        weight: input.weight,
        plan: input.plan,
        activity: input.activity,
        muscles: muscles.clone(),
        history: None,
        candidates: Vec::new(),
    };
    let generation = state.generator.draft(&ctx).await?;
    let parsed = parse_workout(&generation.raw)?;
    let workout = workout_ops::create_workout(
        &state.db,
        user.id,
        &muscles,
        &generation.prompt,
        &generation.raw,
        &parsed,
    )
    .await?;

    Ok(SignupResponse {
        message: "User created and workout generated".to_string(),
        user_id: user.id,
        workout_id: workout.id,
        workout_details: parsed,
    })
}

/// Apply every provided field in one transaction; all values are validated before any write.
pub(crate) async fn update_user(
    state: &AppState,
    user_id: Uuid,
    input: UpdateUserInput,
) -> Result<UpdateUserResponse, AppError> {
    let username = match input.username {
        Some(name) => Some(
            non_blank(Some(name))
                .ok_or_else(|| AppError::BadRequest("Username cannot be empty".into()))?,
        ),
        None => None,
    };
    let activity = input
        .activity
        .as_deref()
        .map(str::parse::<ActivityLevel>)
        .transpose()?;
    let plan = input.plan.as_deref().map(str::parse::<Plan>).transpose()?;
    let password_hash = input.password.as_deref().map(hash_password).transpose()?;

    if username.is_none() && activity.is_none() && plan.is_none() && password_hash.is_none() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to start transaction: {e}")))?;
    user_ops::find_user(&txn, user_id).await?;

    let mut updated_fields = Vec::new();
    if username.is_some() {
        updated_fields.push("username".to_string());
    }
    if let Some(hash) = password_hash {
        user_ops::update_password(&txn, user_id, &hash).await?;
        updated_fields.push("password".to_string());
    }
    if let Some(activity) = activity {
        user_ops::update_activity(&txn, user_id, activity).await?;
        updated_fields.push("activity".to_string());
    }
    if let Some(plan) = plan {
        user_ops::update_plan(&txn, user_id, plan).await?;
        updated_fields.push("plan".to_string());
    }
    // Written last: a taken name must roll back the fields above.
    if let Some(username) = username {
        user_ops::update_username(&txn, user_id, &username).await?;
    }
    txn.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit user update: {e}")))?;

    info!(%user_id, fields = ?updated_fields, "user updated");
    Ok(UpdateUserResponse { updated_fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::test_support::test_state;
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    fn signup_input() -> SignupInput {
        SignupInput {
            height: 70,
            weight: 180.0,
            plan: Plan::StandardCut,
            activity: ActivityLevel::Active,
            workout: "legs".into(),
            username: Some("jordan".into()),
            password: Some("hunter2".into()),
        }
    }

    #[tokio::test]
    async fn signup_stores_user_metric_and_workout() {
        let state = test_state(vec![Ok(r#"{"Squat": [3, 8, 12]}"#.into())]).await;
        let response = signup(&state, signup_input()).await.unwrap();

        assert_eq!(response.workout_details[0].exercise, "Squat");
        let user = user_ops::find_user(&state.db, response.user_id).await.unwrap();
        let hash = user.password_hash.unwrap();
        assert!(bcrypt::verify("hunter2", &hash).unwrap());
        let metric = metric_ops::latest_metric(&state.db, response.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!((metric.height, metric.weight), (70, 180.0));
        workout_ops::find_workout(&state.db, response.workout_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn signup_rejects_out_of_range_before_writing() {
        let state = test_state(Vec::new()).await;
        let input = SignupInput {
            height: 120,
            ..signup_input()
        };
        assert!(matches!(
            signup(&state, input).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn signup_keeps_user_when_llm_fails() {
        let state = test_state(vec![Err(LlmError::EmptyResponse)]).await;
        let err = signup(&state, signup_input()).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));

        let users = crate::db::users::Entity::find()
            .filter(crate::db::users::Column::Username.eq("jordan"))
            .count(&state.db)
            .await
            .unwrap();
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn update_validates_everything_first() {
        let state = test_state(Vec::new()).await;
        let user = user_ops::create_user(&state.db, ActivityLevel::Active, Plan::Maintain, None, None)
            .await
            .unwrap();

        let bad = UpdateUserInput {
            username: Some("casey".into()),
            plan: Some("Bulk Forever".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_user(&state, user.id, bad).await,
            Err(AppError::BadRequest(_))
        ));
        let unchanged = user_ops::find_user(&state.db, user.id).await.unwrap();
        assert!(unchanged.username.is_none());

        let good = UpdateUserInput {
            username: Some("casey".into()),
            plan: Some("Dirty Bulk".into()),
            ..Default::default()
        };
        let response = update_user(&state, user.id, good).await.unwrap();
        assert_eq!(response.updated_fields, ["username", "plan"]);
    }

    #[tokio::test]
    async fn taken_username_rolls_back_other_fields() {
        let state = test_state(Vec::new()).await;
        user_ops::create_user(
            &state.db,
            ActivityLevel::Active,
            Plan::Maintain,
            Some("taken".into()),
            None,
        )
        .await
        .unwrap();
        let user = user_ops::create_user(&state.db, ActivityLevel::Active, Plan::Maintain, None, None)
            .await
            .unwrap();

        let input = UpdateUserInput {
            username: Some("taken".into()),
            activity: Some("Sedentary".into()),
            plan: Some("Aggressive Cut".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_user(&state, user.id, input).await,
            Err(AppError::BadRequest(_))
        ));

        let unchanged = user_ops::find_user(&state.db, user.id).await.unwrap();
        assert_eq!(unchanged.plan, "Maintain");
        assert_eq!(unchanged.activity_level, "Active");
        assert!(unchanged.updated_at.is_none());
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let state = test_state(Vec::new()).await;
        assert!(matches!(
            update_user(&state, Uuid::new_v4(), UpdateUserInput::default()).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
