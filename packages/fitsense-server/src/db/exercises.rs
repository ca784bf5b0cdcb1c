use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exercises")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub primary_muscle_group: Option<String>,
    pub secondary_muscle_group: Option<String>,
    pub equipment: String,
    pub difficulty: String,
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub video_url: Option<String>,
    pub custom: bool,
    /// Owner; set iff `custom`
    pub user_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
