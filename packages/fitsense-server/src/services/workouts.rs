use crate::db::{exercise_ops, metric_ops, user_ops, workout_ops};
use crate::error::AppError;
use crate::services::generation::history::summarize_history;
use crate::services::generation::parser::parse_workout;
use crate::services::generation::PromptContext;
use crate::state::AppState;
use fitsense_core::{ActivityLevel, GeneratedWorkout, Plan, WorkoutRequest};
use tracing::info;
use uuid::Uuid;

const HISTORY_LIMIT: u64 = 5;
const CANDIDATE_LIMIT: u64 = 15;

/// Words of a free-text muscle description usable as catalog search terms.
pub(crate) fn muscle_terms(muscles: &str) -> Vec<String> {
    muscles
        .split(|c: char| c == ',' || c == '/' || c == '&' || c.is_whitespace())
        .map(|word| word.trim().to_lowercase())
        .filter(|word| word.len() > 2 && word != "and")
        .collect()
}

pub(crate) fn require_muscles(workout: &str) -> Result<&str, AppError> {
    let muscles = workout.trim();
    if muscles.is_empty() {
        return Err(AppError::BadRequest(
            "Target muscle groups (workout) are required".into(),
        ));
    }
    Ok(muscles)
}

/// Generate, parse and store a workout from the user's stored profile.
pub(crate) async fn generate_for_user(
    state: &AppState,
    user_id: Uuid,
    request: &WorkoutRequest,
) -> Result<GeneratedWorkout, AppError> {
    let muscles = require_muscles(&request.workout)?;
    let user = user_ops::find_user(&state.db, user_id).await?;
    let metric = metric_ops::latest_metric(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("User {user_id} has no recorded metrics")))?;

    let plan: Plan = user
        .plan
        .parse()
        .map_err(|e| AppError::Internal(format!("stored user {user_id}: {e}")))?;
    let activity: ActivityLevel = user
        .activity_level
        .parse()
        .map_err(|e| AppError::Internal(format!("stored user {user_id}: {e}")))?;

    let mut ctx = PromptContext {
        height: metric.height,
        weight: metric.weight,
        plan,
        activity,
        muscles: muscles.to_string(),
        history: None,
        candidates: Vec::new(),
    };

    let generation = if request.refine {
        let recent = workout_ops::recent_workouts_for_user(&state.db, user_id, HISTORY_LIMIT).await?;
        ctx.history = summarize_history(&recent);
        ctx.candidates = exercise_ops::find_candidates(
            &state.db,
            &muscle_terms(muscles),
            user_id,
            CANDIDATE_LIMIT,
        )
        .await?
        .into_iter()
        .map(|exercise| exercise.name)
        .collect();
        state.generator.draft_and_refine(&ctx).await?
    } else {
        state.generator.draft(&ctx).await?
    };

    let parsed = parse_workout(&generation.raw)?;
    let workout = workout_ops::create_workout(
        &state.db,
        user_id,
        muscles,
        &generation.prompt,
        &generation.raw,
        &parsed,
    )
    .await?;

    info!(
        %user_id,
        workout_id = %workout.id,
        exercises = parsed.len(),
        refinement = ?generation.refinement,
        "workout stored"
    );

    Ok(GeneratedWorkout {
        workout: workout_ops::workout_item(workout)?,
        refinement: generation.refinement,
    })
}
