use crate::routes::{Reply, ok};
use crate::services::generation::PromptContext;
use crate::services::workouts::require_muscles;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use fitsense_core::{GenerateInput, GenerateOutput, validate_height, validate_weight};
use std::sync::Arc;

/// Run one draft generation and hand back the raw model text.
pub(crate) async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateInput>, JsonRejection>,
) -> Reply<GenerateOutput> {
    let Json(input) = body?;
    let ctx = PromptContext {
        height: validate_height(input.height)?,
        weight: validate_weight(input.weight)?,
        plan: input.plan.parse()?,
        activity: input.activity.parse()?,
        muscles: require_muscles(&input.workout)?.to_string(),
        history: None,
        candidates: Vec::new(),
    };

    let generation = state.generator.draft(&ctx).await?;
    ok(GenerateOutput {
        llm_response: generation.raw,
        llm_prompt: generation.prompt,
    })
}
