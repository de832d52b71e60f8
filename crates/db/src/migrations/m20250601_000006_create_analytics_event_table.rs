//! Create analytics event table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnalyticsEvent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalyticsEvent::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AnalyticsEvent::EventType).string_len(128).not_null())
                    .col(ColumnDef::new(AnalyticsEvent::Page).string_len(1024))
                    .col(ColumnDef::new(AnalyticsEvent::Referrer).string_len(1024))
                    .col(ColumnDef::new(AnalyticsEvent::UserAgent).text())
                    .col(ColumnDef::new(AnalyticsEvent::Ip).string_len(128))
                    .col(
                        ColumnDef::new(AnalyticsEvent::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvent::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (event_type, created_at) for reporting
        manager
            .create_index(
                Index::create()
                    .name("idx_analytics_event_type_created_at")
                    .table(AnalyticsEvent::Table)
                    .col(AnalyticsEvent::EventType)
                    .col(AnalyticsEvent::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnalyticsEvent::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AnalyticsEvent {
    Table,
    Id,
    EventType,
    Page,
    Referrer,
    UserAgent,
    Ip,
    Metadata,
    CreatedAt,
}
