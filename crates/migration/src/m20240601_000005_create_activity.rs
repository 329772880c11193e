//! Create `activity` table with FK to `event`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(pk_auto(Activity::Id))
                    .col(string_len(Activity::Name, 100).not_null())
                    .col(integer(Activity::Duration).not_null().default(0))
                    .col(integer(Activity::EventId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_event")
                            .from(Activity::Table, Activity::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Activity::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Activity { Table, Id, Name, Duration, EventId }

#[derive(DeriveIden)]
enum Event { Table, Id }
