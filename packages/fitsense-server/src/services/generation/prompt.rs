use fitsense_core::{ActivityLevel, Plan};
use std::fmt::Write;

/// Everything the model is told about the user for one generation.
#[derive(Debug, Clone)]
pub(crate) struct PromptContext {
    pub(crate) height: i32,
    pub(crate) weight: f64,
    pub(crate) plan: Plan,
    pub(crate) activity: ActivityLevel,
    pub(crate) muscles: String,
    pub(crate) history: Option<String>,
    pub(crate) candidates: Vec<String>,
}

const RESPONSE_FORMAT: &str = "Respond only with JSON using this format (assume completion for all \
generated exercises, and assume X = # of sets, Y and Z represent start and end point for range of reps):\n\
{\"exercise1\": [X, Y, Z]}";

pub(crate) fn build_workout_prompt(ctx: &PromptContext) -> String {
    let mut prompt = String::new();
    prompt.push_str("You are a seasoned fitness trainer with 20+ years of experience.\n");
    prompt.push_str("A client comes to you with the following body metrics:\n");
    push_metrics(&mut prompt, ctx);
    let _ = writeln!(
        prompt,
        "Today, they want to target the following muscle groups: {}",
        ctx.muscles
    );
    prompt.push_str(
        "Based on their height, weight, and current plan, please provide them a workout routine for the day.\n",
    );
    if let Some(history) = &ctx.history {
        let _ = writeln!(prompt, "Their recent workouts were:\n{history}");
        prompt.push_str("Avoid repeating the exact same routine.\n");
    }
    push_candidates(&mut prompt, &ctx.candidates);
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

/// Second-pass prompt asking the model to revise `draft`.
pub(crate) fn build_refinement_prompt(ctx: &PromptContext, draft: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str("You are a seasoned fitness trainer reviewing a workout you drafted for a client.\n");
    push_metrics(&mut prompt, ctx);
    let _ = writeln!(prompt, "Target muscle groups: {}", ctx.muscles);
    let _ = writeln!(prompt, "Draft workout:\n{draft}");
    match &ctx.history {
        Some(history) => {
            let _ = writeln!(prompt, "Their recent workouts were:\n{history}");
        }
        None => prompt.push_str("They have no recorded workout history.\n"),
    }
    push_candidates(&mut prompt, &ctx.candidates);
    prompt.push_str(
        "Revise the draft so it fits the plan and activity level, balances volume against recent \
         training, and keeps every exercise on the target muscle groups.\n",
    );
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

fn push_metrics(prompt: &mut String, ctx: &PromptContext) {
    let _ = writeln!(
        prompt,
        "Height = {} inches, Weight = {} pounds, Plan = {}, Activity Level = {}",
        ctx.height, ctx.weight, ctx.plan, ctx.activity
    );
}

fn push_candidates(prompt: &mut String, candidates: &[String]) {
    if candidates.is_empty() {
        return;
    }
    let _ = writeln!(
        prompt,
        "Prefer exercises from this list where suitable: {}",
        candidates.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(plan: Plan, activity: ActivityLevel) -> PromptContext {
        PromptContext {
            height: 70,
            weight: 180.5,
            plan,
            activity,
            muscles: "legs, glutes".to_string(),
            history: None,
            candidates: Vec::new(),
        }
    }

    #[test]
    fn every_plan_and_activity_is_embedded_verbatim() {
        for plan in Plan::ALL {
            for activity in ActivityLevel::ALL {
                let prompt = build_workout_prompt(&context(plan, activity));
                assert!(!prompt.is_empty());
                assert!(prompt.contains(&format!("Plan = {}", plan.as_str())));
                assert!(prompt.contains(&format!("Activity Level = {}", activity.as_str())));

                let refined = build_refinement_prompt(&context(plan, activity), "{}");
                assert!(refined.contains(plan.as_str()));
                assert!(refined.contains(activity.as_str()));
            }
        }
    }

    #[test]
    fn draft_prompt_carries_metrics_and_format() {
        let prompt = build_workout_prompt(&context(Plan::LeanBulk, ActivityLevel::Active));
        assert!(prompt.contains("Height = 70 inches, Weight = 180.5 pounds"));
        assert!(prompt.contains("legs, glutes"));
        assert!(prompt.contains(r#"{"exercise1": [X, Y, Z]}"#));
        assert!(!prompt.contains("recent workouts"));
    }

    #[test]
    fn refinement_prompt_embeds_draft_history_and_candidates() {
        let mut ctx = context(Plan::Maintain, ActivityLevel::Sedentary);
        ctx.history = Some("2026-01-02 [completed] legs: Squat 3x8-12".to_string());
        ctx.candidates = vec!["Barbell Squat".to_string(), "Leg Press".to_string()];

        let prompt = build_refinement_prompt(&ctx, r#"{"Squat": [3, 8, 12]}"#);
        assert!(prompt.contains(r#"{"Squat": [3, 8, 12]}"#));
        assert!(prompt.contains("Squat 3x8-12"));
        assert!(prompt.contains("Barbell Squat, Leg Press"));
    }
}
