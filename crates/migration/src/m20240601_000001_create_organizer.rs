//! Create `organizer` table.
//!
//! Root entity; events reference it and are removed with it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizer::Table)
                    .if_not_exists()
                    .col(pk_auto(Organizer::Id))
                    .col(text(Organizer::Name).not_null())
                    .col(string_len(Organizer::Email, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Organizer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Organizer { Table, Id, Name, Email }
