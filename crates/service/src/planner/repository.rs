use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::domain::{Activity, Attendee, Event, NewActivity, NewAttendee, NewEvent, NewOrganizer, Organizer};
use super::repo::memory::MemoryStore;
use super::repo::seaorm::{SeaOrmActivityDao, SeaOrmAttendeeDao, SeaOrmEventDao, SeaOrmOrganizerDao};
use crate::errors::PlannerError;

/// Persistence for events and the reads that follow an event's relations.
///
/// `add_event` fails with `Constraint` when the organizer does not exist.
/// `edit_event` and `remove_event` fail with `NotFound` for an unknown id.
#[async_trait]
pub trait EventDao: Send + Sync {
    async fn add_event(&self, event: NewEvent) -> Result<i32, PlannerError>;
    async fn get_event_by_id(&self, id: i32) -> Result<Option<Event>, PlannerError>;
    /// Case and whitespace insensitive; the lowest id wins among matches.
    async fn get_event_by_name(&self, name: &str) -> Result<Option<Event>, PlannerError>;
    async fn get_all_events(&self) -> Result<Vec<Event>, PlannerError>;
    async fn edit_event(&self, event: Event) -> Result<(), PlannerError>;
    async fn remove_event(&self, id: i32) -> Result<(), PlannerError>;

    async fn get_events_by_organizer(&self, organizer_id: i32) -> Result<Vec<Event>, PlannerError>;
    async fn get_event_activities(&self, event_id: i32) -> Result<Vec<Activity>, PlannerError>;
    async fn get_event_attendees(&self, event_id: i32) -> Result<Vec<Attendee>, PlannerError>;
    async fn get_event_organizer(&self, event_id: i32) -> Result<Option<Organizer>, PlannerError>;
}

#[async_trait]
pub trait ActivityDao: Send + Sync {
    async fn add_activity(&self, activity: NewActivity) -> Result<i32, PlannerError>;
    async fn get_activity_by_id(&self, id: i32) -> Result<Option<Activity>, PlannerError>;
    async fn get_activity_by_name(&self, name: &str) -> Result<Option<Activity>, PlannerError>;
    async fn get_all_activities(&self) -> Result<Vec<Activity>, PlannerError>;
    async fn edit_activity(&self, activity: Activity) -> Result<(), PlannerError>;
    async fn remove_activity(&self, id: i32) -> Result<(), PlannerError>;
}

#[async_trait]
pub trait AttendeeDao: Send + Sync {
    async fn add_attendee(&self, attendee: NewAttendee) -> Result<i32, PlannerError>;
    async fn get_attendee_by_id(&self, id: i32) -> Result<Option<Attendee>, PlannerError>;
    async fn get_attendee_by_name(&self, name: &str) -> Result<Option<Attendee>, PlannerError>;
    async fn get_all_attendees(&self) -> Result<Vec<Attendee>, PlannerError>;
    async fn edit_attendee(&self, attendee: Attendee) -> Result<(), PlannerError>;
    async fn remove_attendee(&self, id: i32) -> Result<(), PlannerError>;
}

/// Organizers own events; removing one removes its events too.
#[async_trait]
pub trait OrganizerDao: Send + Sync {
    async fn add_organizer(&self, organizer: NewOrganizer) -> Result<i32, PlannerError>;
    async fn get_organizer_by_id(&self, id: i32) -> Result<Option<Organizer>, PlannerError>;
    async fn get_organizer_by_name(&self, name: &str) -> Result<Option<Organizer>, PlannerError>;
    async fn get_all_organizers(&self) -> Result<Vec<Organizer>, PlannerError>;
    async fn edit_organizer(&self, organizer: Organizer) -> Result<(), PlannerError>;
    async fn remove_organizer(&self, id: i32) -> Result<(), PlannerError>;
}

/// The four DAOs a `PlannerService` is built from.
#[derive(Clone)]
pub struct PlannerDaos {
    pub events: Arc<dyn EventDao>,
    pub activities: Arc<dyn ActivityDao>,
    pub attendees: Arc<dyn AttendeeDao>,
    pub organizers: Arc<dyn OrganizerDao>,
}

impl PlannerDaos {
    /// Every DAO backed by the same in-memory store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            events: store.clone(),
            activities: store.clone(),
            attendees: store.clone(),
            organizers: store,
        }
    }

    /// Every DAO backed by the given PostgreSQL pool.
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            events: Arc::new(SeaOrmEventDao { db: db.clone() }),
            activities: Arc::new(SeaOrmActivityDao { db: db.clone() }),
            attendees: Arc::new(SeaOrmAttendeeDao { db: db.clone() }),
            organizers: Arc::new(SeaOrmOrganizerDao { db }),
        }
    }
}
