//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_upload_table;
mod m20250601_000002_create_homepage_settings_table;
mod m20250601_000003_create_job_table;
mod m20250601_000004_create_job_application_table;
mod m20250601_000005_create_partner_table;
mod m20250601_000006_create_analytics_event_table;
mod m20250601_000007_create_team_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_upload_table::Migration),
            Box::new(m20250601_000002_create_homepage_settings_table::Migration),
            Box::new(m20250601_000003_create_job_table::Migration),
            Box::new(m20250601_000004_create_job_application_table::Migration),
            Box::new(m20250601_000005_create_partner_table::Migration),
            Box::new(m20250601_000006_create_analytics_event_table::Migration),
            Box::new(m20250601_000007_create_team_table::Migration),
        ]
    }
}
