pub(crate) mod history;
pub(crate) mod parser;
pub(crate) mod prompt;

use crate::llm::{CompletionClient, LlmError};
use fitsense_core::Refinement;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) use prompt::PromptContext;

/// Raw model output plus the prompt that produced it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Generation {
    pub(crate) prompt: String,
    pub(crate) raw: String,
    pub(crate) refinement: Refinement,
}

#[derive(Clone)]
pub(crate) struct WorkoutGenerator {
    client: Arc<dyn CompletionClient>,
}

impl WorkoutGenerator {
    pub(crate) fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub(crate) async fn draft(&self, ctx: &PromptContext) -> Result<Generation, LlmError> {
        let prompt = prompt::build_workout_prompt(ctx);
        let raw = self.client.complete_json(&prompt).await?;
        info!(muscles = %ctx.muscles, "draft workout generated");
        Ok(Generation {
            prompt,
            raw,
            refinement: Refinement::Skipped,
        })
    }

    /// Draft, then ask the model to revise it. A failed revision call
    /// keeps the draft.
    pub(crate) async fn draft_and_refine(&self, ctx: &PromptContext) -> Result<Generation, LlmError> {
        let draft = self.draft(ctx).await?;
        let prompt = prompt::build_refinement_prompt(ctx, &draft.raw);

        match self.client.complete_json(&prompt).await {
            Ok(raw) => {
                info!(muscles = %ctx.muscles, "workout refined");
                Ok(Generation {
                    prompt,
                    raw,
                    refinement: Refinement::Refined,
                })
            }
            Err(err) => {
                warn!(error = %err, "refinement failed, keeping draft");
                Ok(Generation {
                    refinement: Refinement::RefinementFailed,
                    ..draft
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedClient;
    use fitsense_core::{ActivityLevel, Plan};

    fn context() -> PromptContext {
        PromptContext {
            height: 68,
            weight: 165.0,
            plan: Plan::StandardCut,
            activity: ActivityLevel::LightlyActive,
            muscles: "chest".to_string(),
            history: Some("2026-01-01 [generated] back: Row 3x8-10".to_string()),
            candidates: Vec::new(),
        }
    }

    #[tokio::test]
    async fn draft_returns_raw_and_prompt() {
        let client = Arc::new(ScriptedClient::new(vec![Ok(r#"{"Bench": [3, 8, 10]}"#.into())]));
        let generator = WorkoutGenerator::new(client.clone());

        let generation = generator.draft(&context()).await.unwrap();
        assert_eq!(generation.raw, r#"{"Bench": [3, 8, 10]}"#);
        assert_eq!(generation.refinement, Refinement::Skipped);
        assert_eq!(client.prompts(), vec![generation.prompt]);
    }

    #[tokio::test]
    async fn refinement_replaces_draft() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(r#"{"Bench": [3, 8, 10]}"#.into()),
            Ok(r#"{"Incline Bench": [4, 6, 8]}"#.into()),
        ]));
        let generator = WorkoutGenerator::new(client.clone());

        let generation = generator.draft_and_refine(&context()).await.unwrap();
        assert_eq!(generation.raw, r#"{"Incline Bench": [4, 6, 8]}"#);
        assert_eq!(generation.refinement, Refinement::Refined);

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains(r#"{"Bench": [3, 8, 10]}"#));
        assert!(prompts[1].contains("Row 3x8-10"));
    }

    #[tokio::test]
    async fn failed_refinement_keeps_draft() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(r#"{"Bench": [3, 8, 10]}"#.into()),
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".into(),
            }),
        ]));
        let generator = WorkoutGenerator::new(client);

        let generation = generator.draft_and_refine(&context()).await.unwrap();
        assert_eq!(generation.raw, r#"{"Bench": [3, 8, 10]}"#);
        assert_eq!(generation.refinement, Refinement::RefinementFailed);
        assert!(generation.prompt.contains("Today, they want to target"));
    }

    #[tokio::test]
    async fn failed_draft_is_an_error() {
        let client = Arc::new(ScriptedClient::new(vec![Err(LlmError::EmptyResponse)]));
        let generator = WorkoutGenerator::new(client.clone());

        assert!(matches!(
            generator.draft_and_refine(&context()).await,
            Err(LlmError::EmptyResponse)
        ));
        assert_eq!(client.prompts().len(), 1);
    }
}
