//! Create `attendee` table with FK to `event`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendee::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendee::Id))
                    .col(string_len(Attendee::Name, 75).not_null())
                    .col(ColumnDef::new(Attendee::Email).string_len(255).null())
                    .col(integer(Attendee::EventId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendee_event")
                            .from(Attendee::Table, Attendee::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Attendee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Attendee { Table, Id, Name, Email, EventId }

#[derive(DeriveIden)]
enum Event { Table, Id }
