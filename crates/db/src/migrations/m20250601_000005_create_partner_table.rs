//! Create partner table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Partner::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Partner::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Partner::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Partner::FullName).string_len(512))
                    .col(ColumnDef::new(Partner::Bio).text())
                    .col(ColumnDef::new(Partner::ImageId).string_len(32))
                    .col(ColumnDef::new(Partner::ImageStaticPath).string_len(1024))
                    .col(ColumnDef::new(Partner::Website).string_len(1024))
                    .col(ColumnDef::new(Partner::DisplayOrder).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Partner::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_image")
                            .from(Partner::Table, Partner::ImageId)
                            .to(Upload::Table, Upload::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Partner::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Partner {
    Table,
    Id,
    Name,
    FullName,
    Bio,
    ImageId,
    ImageStaticPath,
    Website,
    DisplayOrder,
    CreatedAt,
}

#[derive(Iden)]
enum Upload {
    Table,
    Id,
}
