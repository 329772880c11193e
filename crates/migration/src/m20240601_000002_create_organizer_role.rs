//! Create `organizer_role` table: one row per (organizer, role) pair.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrganizerRole::Table)
                    .if_not_exists()
                    .col(integer(OrganizerRole::OrganizerId).not_null())
                    .col(string_len(OrganizerRole::Role, 64).not_null())
                    .primary_key(
                        Index::create()
                            .col(OrganizerRole::OrganizerId)
                            .col(OrganizerRole::Role),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organizer_role_organizer")
                            .from(OrganizerRole::Table, OrganizerRole::OrganizerId)
                            .to(Organizer::Table, Organizer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OrganizerRole::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OrganizerRole { Table, OrganizerId, Role }

#[derive(DeriveIden)]
enum Organizer { Table, Id }
