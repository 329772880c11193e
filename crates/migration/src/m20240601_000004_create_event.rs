//! Create `event` table with a required FK to `organizer`.
//!
//! Deleting an organizer cascades to its events.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string_len(Event::Name, 100).not_null())
                    .col(ColumnDef::new(Event::Date).date().null())
                    .col(integer(Event::Duration).not_null().default(0))
                    .col(ColumnDef::new(Event::Location).string_len(255).null())
                    .col(ColumnDef::new(Event::Time).string_len(64).null())
                    .col(ColumnDef::new(Event::Category).string_len(64).null())
                    .col(integer(Event::OrganizerId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_organizer")
                            .from(Event::Table, Event::OrganizerId)
                            .to(Organizer::Table, Organizer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Event::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Event { Table, Id, Name, Date, Duration, Location, Time, Category, OrganizerId }

#[derive(DeriveIden)]
enum Organizer { Table, Id }
