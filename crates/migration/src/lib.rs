//! Migrator registering planner tables in foreign-key dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_organizer;
mod m20240601_000002_create_organizer_role;
mod m20240601_000003_create_organizer_credentials;
mod m20240601_000004_create_event;
mod m20240601_000005_create_activity;
mod m20240601_000006_create_attendee;
mod m20240601_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_organizer::Migration),
            Box::new(m20240601_000002_create_organizer_role::Migration),
            Box::new(m20240601_000003_create_organizer_credentials::Migration),
            Box::new(m20240601_000004_create_event::Migration),
            Box::new(m20240601_000005_create_activity::Migration),
            Box::new(m20240601_000006_create_attendee::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000007_add_indexes::Migration),
        ]
    }
}
