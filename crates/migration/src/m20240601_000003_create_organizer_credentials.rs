//! Create `organizer_credentials` table with FK to `organizer`.
//!
//! One password hash per organizer; removed together with the organizer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrganizerCredentials::Table)
                    .if_not_exists()
                    .col(integer(OrganizerCredentials::OrganizerId).primary_key())
                    .col(string_len(OrganizerCredentials::PasswordHash, 255).not_null())
                    .col(string_len(OrganizerCredentials::PasswordAlgorithm, 32).not_null())
                    .col(timestamp_with_time_zone(OrganizerCredentials::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organizer_credentials_organizer")
                            .from(OrganizerCredentials::Table, OrganizerCredentials::OrganizerId)
                            .to(Organizer::Table, Organizer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OrganizerCredentials::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OrganizerCredentials { Table, OrganizerId, PasswordHash, PasswordAlgorithm, UpdatedAt }

#[derive(DeriveIden)]
enum Organizer { Table, Id }
