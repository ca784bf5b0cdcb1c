use fitsense_core::{ExerciseItem, MetricItem, ParsedExercise, UserInfo, WorkoutItem, WorkoutStatus};

const RULE_WIDTH: usize = 40;

/// Numbered exercise list framed by rules, e.g. `1. Squat: 3 sets of 8-12 reps`.
pub fn format_workout_display(title: &str, exercises: &[ParsedExercise]) -> String {
    let mut lines = vec![format!("=== {title} ===")];
    if exercises.is_empty() {
        lines.push("(no exercises)".to_string());
    }
    for (i, exercise) in exercises.iter().enumerate() {
        lines.push(format!(
            "{}. {}: {} sets of {}-{} reps",
            i + 1,
            exercise.exercise,
            exercise.sets,
            exercise.rep_range[0],
            exercise.rep_range[1]
        ));
    }
    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

pub fn format_workout(workout: &WorkoutItem) -> String {
    let status = match (workout.status, workout.completed_on) {
        (WorkoutStatus::Completed, Some(at)) => format!("completed {}", at.format("%Y-%m-%d %H:%M")),
        (status, _) => status.as_str().to_string(),
    };
    let title = format!(
        "{} workout, {} [{}]",
        workout.muscles_targeted,
        workout.date_generated.format("%Y-%m-%d"),
        status
    );
    format!(
        "{}\nID: {}",
        format_workout_display(&title, &workout.workout_details),
        workout.workout_id
    )
}

pub fn format_user(user: &UserInfo) -> String {
    format!(
        "User: {}\nUsername: {}\nPlan: {}\nActivity level: {}\nJoined: {}",
        user.user_id,
        user.username.as_deref().unwrap_or("(none)"),
        user.plan,
        user.activity_level,
        user.created_at.format("%Y-%m-%d")
    )
}

pub fn format_metric(metric: &MetricItem) -> String {
    format!(
        "{}: {} in, {} lb",
        metric.recorded_at.format("%Y-%m-%d %H:%M"),
        metric.height,
        metric.weight
    )
}

pub fn format_exercise(exercise: &ExerciseItem) -> String {
    format!(
        "{} ({}; {}; {})\n{}",
        exercise.name,
        exercise.primary_muscle_group.as_deref().unwrap_or("unspecified"),
        exercise.equipment,
        exercise.difficulty,
        exercise.instructions
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fitsense_core::{ActivityLevel, Plan};
    use uuid::Uuid;

    fn squat() -> ParsedExercise {
        ParsedExercise {
            exercise: "Squat".to_string(),
            sets: 3,
            rep_range: [8, 12],
        }
    }

    #[test]
    fn workout_display_numbers_exercises() {
        let text = format_workout_display("Today", &[squat()]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "=== Today ===");
        assert_eq!(lines[1], "1. Squat: 3 sets of 8-12 reps");
        assert_eq!(lines[2], "=".repeat(40));
    }

    #[test]
    fn completed_workout_shows_completion_time() {
        let at = Utc.with_ymd_and_hms(2026, 4, 5, 18, 30, 0).unwrap();
        let workout = WorkoutItem {
            workout_id: Uuid::nil(),
            user_id: Uuid::nil(),
            muscles_targeted: "legs".to_string(),
            llm_prompt: String::new(),
            llm_raw: String::new(),
            workout_details: vec![squat()],
            date_generated: at,
            status: WorkoutStatus::Completed,
            completed_on: Some(at),
        };
        let text = format_workout(&workout);
        assert!(text.starts_with("=== legs workout, 2026-04-05 [completed 2026-04-05 18:30] ==="));
        assert!(text.ends_with(&format!("ID: {}", Uuid::nil())));
    }

    #[test]
    fn user_and_metric_lines() {
        let at = Utc.with_ymd_and_hms(2026, 1, 9, 7, 0, 0).unwrap();
        let user = UserInfo {
            user_id: Uuid::nil(),
            username: None,
            has_password: false,
            activity_level: ActivityLevel::LightlyActive,
            plan: Plan::BodyRecomposition,
            created_at: at,
            updated_at: None,
        };
        let text = format_user(&user);
        assert!(text.contains("Username: (none)"));
        assert!(text.contains("Plan: Body Recomposition"));
        assert!(text.contains("Activity level: Lightly Active"));

        let metric = MetricItem {
            metric_id: Uuid::nil(),
            user_id: Uuid::nil(),
            height: 70,
            weight: 180.5,
            recorded_at: at,
        };
        assert_eq!(format_metric(&metric), "2026-01-09 07:00: 70 in, 180.5 lb");
    }
}
