use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Organizer: login looks organizers up by email
        manager
            .create_index(
                Index::create()
                    .name("uniq_organizer_email")
                    .table(Organizer::Table)
                    .col(Organizer::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Event: events-by-organizer
        manager
            .create_index(
                Index::create()
                    .name("idx_event_organizer")
                    .table(Event::Table)
                    .col(Event::OrganizerId)
                    .to_owned(),
            )
            .await?;

        // Activity / Attendee: per-event listings
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_event")
                    .table(Activity::Table)
                    .col(Activity::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendee_event")
                    .table(Attendee::Table)
                    .col(Attendee::EventId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_attendee_event").table(Attendee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activity_event").table(Activity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_event_organizer").table(Event::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_organizer_email").table(Organizer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Organizer { Table, Email }

#[derive(DeriveIden)]
enum Event { Table, OrganizerId }

#[derive(DeriveIden)]
enum Activity { Table, EventId }

#[derive(DeriveIden)]
enum Attendee { Table, EventId }
