//! Create job table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Job::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Job::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Job::LocationType).string_len(16).not_null())
                    .col(ColumnDef::new(Job::LocationTypeOther).string_len(128))
                    .col(ColumnDef::new(Job::Location).string_len(256).not_null())
                    .col(ColumnDef::new(Job::NotificationEmails).text().not_null())
                    .col(ColumnDef::new(Job::TheRole).json_binary().not_null())
                    .col(ColumnDef::new(Job::WhatYouDo).json_binary().not_null())
                    .col(ColumnDef::new(Job::WhatWereLookingFor).json_binary().not_null())
                    .col(ColumnDef::new(Job::PreferredExperience).json_binary())
                    .col(ColumnDef::new(Job::LifeAtObf).json_binary())
                    .col(ColumnDef::new(Job::HowToApply).json_binary())
                    .col(
                        ColumnDef::new(Job::ExtraSections)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Job::Status)
                            .string_len(16)
                            .not_null()
                            .default("unpublished"),
                    )
                    .col(ColumnDef::new(Job::DisplayOrder).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Job::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Job::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: (status, display_order) for the public listing
        manager
            .create_index(
                Index::create()
                    .name("idx_job_status_display_order")
                    .table(Job::Table)
                    .col(Job::Status)
                    .col(Job::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Job::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Job {
    Table,
    Id,
    Title,
    LocationType,
    LocationTypeOther,
    Location,
    NotificationEmails,
    TheRole,
    WhatYouDo,
    WhatWereLookingFor,
    PreferredExperience,
    LifeAtObf,
    HowToApply,
    ExtraSections,
    Status,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}
