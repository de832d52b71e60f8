//! Create team table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Team::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Team::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Team::Role).string_len(256).not_null())
                    .col(ColumnDef::new(Team::Bio).json_binary())
                    .col(ColumnDef::new(Team::ImageId).string_len(32))
                    .col(ColumnDef::new(Team::LinkedIn).string_len(1024))
                    .col(ColumnDef::new(Team::Twitter).string_len(1024))
                    .col(ColumnDef::new(Team::Email).string_len(320))
                    .col(
                        ColumnDef::new(Team::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Team::DisplayOnHome)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Team::DisplayOrder).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Team::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Team::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_image")
                            .from(Team::Table, Team::ImageId)
                            .to(Upload::Table, Upload::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_status_display_order")
                    .table(Team::Table)
                    .col(Team::Status)
                    .col(Team::DisplayOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Team {
    Table,
    Id,
    Name,
    Role,
    Bio,
    ImageId,
    LinkedIn,
    Twitter,
    Email,
    Status,
    DisplayOnHome,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Upload {
    Table,
    Id,
}
