use crate::db::{exercises, metrics, users, workouts};
use sea_orm::sea_query::{ForeignKey, ForeignKeyAction, Index, Table};
use sea_orm::{DbErr, DeriveMigrationName};
use sea_orm_migration::{MigrationTrait, SchemaManager, schema};

#[derive(DeriveMigrationName)]
pub(crate) struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let users_table = Table::create()
            .table(users::Entity)
            .if_not_exists()
            .col(schema::uuid(users::Column::Id).primary_key())
            .col(schema::string_null(users::Column::Username).unique_key())
            .col(schema::string_null(users::Column::PasswordHash))
            .col(schema::string(users::Column::ActivityLevel))
            .col(schema::string(users::Column::Plan))
            .col(schema::timestamp_with_time_zone(users::Column::CreatedAt))
            .col(schema::timestamp_with_time_zone_null(users::Column::UpdatedAt))
            .to_owned();

        let metrics_table = Table::create()
            .table(metrics::Entity)
            .if_not_exists()
            .col(schema::uuid(metrics::Column::Id).primary_key())
            .col(schema::uuid(metrics::Column::UserId))
            .col(schema::integer(metrics::Column::Height))
            .col(schema::double(metrics::Column::Weight))
            .col(schema::timestamp_with_time_zone(metrics::Column::RecordedAt))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_metrics_user")
                    .from(metrics::Entity, metrics::Column::UserId)
                    .to(users::Entity, users::Column::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();

        let workouts_table = Table::create()
            .table(workouts::Entity)
            .if_not_exists()
            .col(schema::uuid(workouts::Column::Id).primary_key())
            .col(schema::uuid(workouts::Column::UserId))
            .col(schema::string(workouts::Column::MusclesTargeted))
            .col(schema::text(workouts::Column::LlmPrompt))
            .col(schema::text(workouts::Column::LlmRaw))
            .col(schema::text(workouts::Column::ParsedWorkout))
            .col(schema::timestamp_with_time_zone(workouts::Column::DateGenerated))
            .col(schema::string(workouts::Column::Status).default("generated"))
            .col(schema::timestamp_with_time_zone_null(workouts::Column::CompletedOn))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_workouts_user")
                    .from(workouts::Entity, workouts::Column::UserId)
                    .to(users::Entity, users::Column::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();

        let exercises_table = Table::create()
            .table(exercises::Entity)
            .if_not_exists()
            .col(schema::uuid(exercises::Column::Id).primary_key())
            .col(schema::string(exercises::Column::Name).unique_key())
            .col(schema::string_null(exercises::Column::PrimaryMuscleGroup))
            .col(schema::string_null(exercises::Column::SecondaryMuscleGroup))
            .col(schema::string(exercises::Column::Equipment))
            .col(schema::string(exercises::Column::Difficulty))
            .col(schema::text(exercises::Column::Instructions))
            .col(schema::string_null(exercises::Column::VideoUrl))
            .col(schema::boolean(exercises::Column::Custom).default(false))
            .col(schema::uuid_null(exercises::Column::UserId))
            .col(schema::timestamp_with_time_zone(exercises::Column::CreatedAt))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_exercises_user")
                    .from(exercises::Entity, exercises::Column::UserId)
                    .to(users::Entity, users::Column::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            )
            .to_owned();

        manager.create_table(users_table).await?;
        manager.create_table(metrics_table).await?;
        manager.create_table(workouts_table).await?;
        manager.create_table(exercises_table).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metrics_user_recorded")
                    .table(metrics::Entity)
                    .col(metrics::Column::UserId)
                    .col(metrics::Column::RecordedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_workouts_user_generated")
                    .table(workouts::Entity)
                    .col(workouts::Column::UserId)
                    .col(workouts::Column::DateGenerated)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(exercises::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(workouts::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(metrics::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(users::Entity).to_owned())
            .await
    }
}
