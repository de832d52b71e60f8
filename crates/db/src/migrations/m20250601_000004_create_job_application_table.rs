//! Create job application table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobApplication::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobApplication::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobApplication::JobId).string_len(32).not_null())
                    .col(ColumnDef::new(JobApplication::JobTitle).string_len(256).not_null())
                    .col(ColumnDef::new(JobApplication::FullName).string_len(256).not_null())
                    .col(ColumnDef::new(JobApplication::Email).string_len(256).not_null())
                    .col(ColumnDef::new(JobApplication::ContactNumber).string_len(64))
                    .col(ColumnDef::new(JobApplication::NoticePeriod).string_len(128))
                    .col(ColumnDef::new(JobApplication::CurrentLocation).string_len(256))
                    .col(ColumnDef::new(JobApplication::CurrentCompany).string_len(256))
                    .col(ColumnDef::new(JobApplication::PortfolioUrl).string_len(1024))
                    .col(ColumnDef::new(JobApplication::ResumeId).string_len(32))
                    .col(ColumnDef::new(JobApplication::CoverLetter).text())
                    .col(
                        ColumnDef::new(JobApplication::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(JobApplication::Notes).text())
                    .col(
                        ColumnDef::new(JobApplication::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_application_job")
                            .from(JobApplication::Table, JobApplication::JobId)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_application_resume")
                            .from(JobApplication::Table, JobApplication::ResumeId)
                            .to(Upload::Table, Upload::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: job_id (for listing applications of a job)
        manager
            .create_index(
                Index::create()
                    .name("idx_job_application_job_id")
                    .table(JobApplication::Table)
                    .col(JobApplication::JobId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobApplication::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum JobApplication {
    Table,
    Id,
    JobId,
    JobTitle,
    FullName,
    Email,
    ContactNumber,
    NoticePeriod,
    CurrentLocation,
    CurrentCompany,
    PortfolioUrl,
    ResumeId,
    CoverLetter,
    Status,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum Job {
    Table,
    Id,
}

#[derive(Iden)]
enum Upload {
    Table,
    Id,
}
