use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum WorkoutStatus {
    #[sea_orm(string_value = "generated")]
    Generated,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl From<WorkoutStatus> for fitsense_core::WorkoutStatus {
    fn from(status: WorkoutStatus) -> Self {
        match status {
            WorkoutStatus::Generated => fitsense_core::WorkoutStatus::Generated,
            WorkoutStatus::Completed => fitsense_core::WorkoutStatus::Completed,
        }
    }
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub muscles_targeted: String,
    #[sea_orm(column_type = "Text")]
    pub llm_prompt: String,
    #[sea_orm(column_type = "Text")]
    pub llm_raw: String,
    /// JSON array of parsed exercise entries
    #[sea_orm(column_type = "Text")]
    pub parsed_workout: String,
    pub date_generated: DateTimeUtc,
    pub status: WorkoutStatus,
    pub completed_on: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
