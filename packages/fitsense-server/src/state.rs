use crate::services::generation::WorkoutGenerator;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) db: DatabaseConnection,
    pub(crate) generator: WorkoutGenerator,
}
