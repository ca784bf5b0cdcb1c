use crate::db::workouts;
use crate::services::generation::parser;

/// One line per workout, newest first, e.g.
/// `2026-01-02 [completed] legs: Squat 3x8-12; Lunge 3x10-12`.
pub(crate) fn summarize_history(recent: &[workouts::Model]) -> Option<String> {
    if recent.is_empty() {
        return None;
    }

    let lines: Vec<String> = recent
        .iter()
        .map(|workout| {
            let exercises = match parser::from_stored(&workout.parsed_workout) {
                Ok(entries) => entries
                    .iter()
                    .map(|e| format!("{} {}x{}-{}", e.exercise, e.sets, e.rep_range[0], e.rep_range[1]))
                    .collect::<Vec<_>>()
                    .join("; "),
                Err(_) => "details unavailable".to_string(),
            };
            let status = fitsense_core::WorkoutStatus::from(workout.status);
            format!(
                "{} [{}] {}: {}",
                workout.date_generated.format("%Y-%m-%d"),
                status.as_str(),
                workout.muscles_targeted,
                exercises
            )
        })
        .collect();

    Some(lines.join("\n"))
}
