//! Create upload table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Upload::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Upload::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Upload::Filename).string_len(256).not_null())
                    .col(ColumnDef::new(Upload::OriginalName).string_len(512).not_null())
                    .col(ColumnDef::new(Upload::MimeType).string_len(128).not_null())
                    .col(ColumnDef::new(Upload::Size).big_integer().not_null())
                    .col(ColumnDef::new(Upload::Md5).string_len(32).not_null())
                    .col(ColumnDef::new(Upload::StorageKey).string_len(512).not_null())
                    .col(ColumnDef::new(Upload::Url).string_len(1024).not_null())
                    .col(ColumnDef::new(Upload::Alt).string_len(512))
                    .col(
                        ColumnDef::new(Upload::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: filename (served by name)
        manager
            .create_index(
                Index::create()
                    .name("idx_upload_filename")
                    .table(Upload::Table)
                    .col(Upload::Filename)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Upload::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Upload {
    Table,
    Id,
    Filename,
    OriginalName,
    MimeType,
    Size,
    Md5,
    StorageKey,
    Url,
    Alt,
    CreatedAt,
}
