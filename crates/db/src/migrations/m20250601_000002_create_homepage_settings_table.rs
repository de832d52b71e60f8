//! Create homepage settings table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The primary key only ever holds one value, so a second row
        // cannot be inserted even by concurrent writers.
        manager
            .create_table(
                Table::create()
                    .table(HomepageSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HomepageSettings::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HomepageSettings::Title).string_len(256).not_null())
                    .col(ColumnDef::new(HomepageSettings::IntroHeading).string_len(512))
                    .col(ColumnDef::new(HomepageSettings::IntroContent).json_binary())
                    .col(
                        ColumnDef::new(HomepageSettings::AudioEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(HomepageSettings::AudioFile).json_binary())
                    .col(ColumnDef::new(HomepageSettings::AudioName).string_len(256))
                    .col(ColumnDef::new(HomepageSettings::ComingSoonLabel).string_len(256))
                    .col(ColumnDef::new(HomepageSettings::ComingSoonHeading).string_len(256))
                    .col(ColumnDef::new(HomepageSettings::ComingSoonCards).json_binary())
                    .col(ColumnDef::new(HomepageSettings::ShareVisionLabel).string_len(256))
                    .col(ColumnDef::new(HomepageSettings::ShareVisionHeading).string_len(512))
                    .col(ColumnDef::new(HomepageSettings::ShareVisionDescription).json_binary())
                    .col(ColumnDef::new(HomepageSettings::ShareVisionButtonText).string_len(256))
                    .col(ColumnDef::new(HomepageSettings::ShareVisionButtonLink).string_len(1024))
                    .col(ColumnDef::new(HomepageSettings::Address).text())
                    .col(ColumnDef::new(HomepageSettings::SocialNetworks).json_binary())
                    .col(ColumnDef::new(HomepageSettings::SeoTitle).string_len(512))
                    .col(ColumnDef::new(HomepageSettings::SeoDescription).text())
                    .col(ColumnDef::new(HomepageSettings::SeoKeywords).text())
                    .col(
                        ColumnDef::new(HomepageSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(HomepageSettings::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HomepageSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HomepageSettings {
    Table,
    Id,
    Title,
    IntroHeading,
    IntroContent,
    AudioEnabled,
    AudioFile,
    AudioName,
    ComingSoonLabel,
    ComingSoonHeading,
    ComingSoonCards,
    ShareVisionLabel,
    ShareVisionHeading,
    ShareVisionDescription,
    ShareVisionButtonText,
    ShareVisionButtonLink,
    Address,
    SocialNetworks,
    SeoTitle,
    SeoDescription,
    SeoKeywords,
    CreatedAt,
    UpdatedAt,
}
