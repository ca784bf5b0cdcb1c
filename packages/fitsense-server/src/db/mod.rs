pub(crate) mod exercises;
pub(crate) mod metrics;
pub(crate) mod users;
pub(crate) mod workouts;

pub mod exercise_ops;
pub mod initialize;
pub mod metric_ops;
pub mod user_ops;
pub mod workout_ops;
mod migration;
