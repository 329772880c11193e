use tracing::{debug, info, instrument};

use super::domain::{
    Activity, ActivityPayload, Attendee, AttendeePayload, Event, EventPayload, Organizer, OrganizerPayload,
};
use super::repository::PlannerDaos;
use crate::errors::{EntityKind, PlannerError};

/// How aggregate reads treat an empty result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListPolicy {
    /// Return `[]`.
    #[default]
    Lenient,
    /// Fail with `EmptyList`.
    Strict,
}

impl ListPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict { ListPolicy::Strict } else { ListPolicy::Lenient }
    }
}

/// Planner business service.
///
/// Checks ids, names and payloads, then delegates to the DAOs. Referential
/// integrity is left to the store, which reports it as `Constraint`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::planner::{ListPolicy, PlannerDaos, PlannerService};
/// use service::planner::repo::memory::MemoryStore;
/// let svc = PlannerService::new(PlannerDaos::memory(Arc::new(MemoryStore::seeded())), ListPolicy::Lenient);
/// let event = tokio_test::block_on(svc.get_event_by_id(1)).unwrap();
/// assert_eq!(event.name, "Brendan's Party");
/// ```
#[derive(Clone)]
pub struct PlannerService {
    daos: PlannerDaos,
    lists: ListPolicy,
}

fn check_id(id: i32, kind: EntityKind) -> Result<(), PlannerError> {
    if id <= 0 {
        return Err(PlannerError::invalid_id(kind));
    }
    Ok(())
}

fn check_name(name: &str, kind: EntityKind) -> Result<(), PlannerError> {
    if name.trim().is_empty() {
        return Err(PlannerError::InvalidName(format!("Invalid name for this {kind}")));
    }
    Ok(())
}

fn found<T>(row: Option<T>, kind: EntityKind, id: i32) -> Result<T, PlannerError> {
    row.ok_or_else(|| PlannerError::missing_id(kind, id))
}

fn found_by_name<T>(row: Option<T>, kind: EntityKind, name: &str) -> Result<T, PlannerError> {
    row.ok_or_else(|| PlannerError::not_found(kind, format!("No {kind} was found with the name {}", name.trim())))
}

impl PlannerService {
    pub fn new(daos: PlannerDaos, lists: ListPolicy) -> Self {
        Self { daos, lists }
    }

    pub fn list_policy(&self) -> ListPolicy {
        self.lists
    }

    fn listed<T>(&self, rows: Vec<T>, what: &str) -> Result<Vec<T>, PlannerError> {
        if rows.is_empty() && self.lists == ListPolicy::Strict {
            return Err(PlannerError::EmptyList(format!("No {what} were found")));
        }
        Ok(rows)
    }

    async fn require_event(&self, id: i32) -> Result<Event, PlannerError> {
        check_id(id, EntityKind::Event)?;
        found(self.daos.events.get_event_by_id(id).await?, EntityKind::Event, id)
    }

    // ---- events ----

    #[instrument(skip(self))]
    pub async fn get_all_events(&self) -> Result<Vec<Event>, PlannerError> {
        let rows = self.daos.events.get_all_events().await?;
        self.listed(rows, EntityKind::Event.plural())
    }

    #[instrument(skip(self))]
    pub async fn get_event_by_id(&self, id: i32) -> Result<Event, PlannerError> {
        self.require_event(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_event_by_name(&self, name: &str) -> Result<Event, PlannerError> {
        check_name(name, EntityKind::Event)?;
        found_by_name(self.daos.events.get_event_by_name(name).await?, EntityKind::Event, name)
    }

    #[instrument(skip(self, payload))]
    pub async fn add_event(&self, payload: EventPayload) -> Result<i32, PlannerError> {
        let new = payload.into_new()?;
        let id = self.daos.events.add_event(new).await?;
        info!(event_id = id, "event_added");
        Ok(id)
    }

    #[instrument(skip(self, payload), fields(event_id = ?payload.id))]
    pub async fn edit_event(&self, payload: EventPayload) -> Result<(), PlannerError> {
        let record = payload.into_record()?;
        let id = record.id;
        self.daos.events.edit_event(record).await?;
        info!(event_id = id, "event_edited");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_event(&self, id: i32) -> Result<(), PlannerError> {
        check_id(id, EntityKind::Event)?;
        self.daos.events.remove_event(id).await?;
        info!(event_id = id, "event_removed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_events_by_organizer_id(&self, organizer_id: i32) -> Result<Vec<Event>, PlannerError> {
        check_id(organizer_id, EntityKind::Organizer)?;
        found(
            self.daos.organizers.get_organizer_by_id(organizer_id).await?,
            EntityKind::Organizer,
            organizer_id,
        )?;
        let rows = self.daos.events.get_events_by_organizer(organizer_id).await?;
        self.listed(rows, EntityKind::Event.plural())
    }

    #[instrument(skip(self))]
    pub async fn get_event_activities(&self, event_id: i32) -> Result<Vec<Activity>, PlannerError> {
        self.require_event(event_id).await?;
        let rows = self.daos.events.get_event_activities(event_id).await?;
        self.listed(rows, EntityKind::Activity.plural())
    }

    #[instrument(skip(self))]
    pub async fn get_event_attendees(&self, event_id: i32) -> Result<Vec<Attendee>, PlannerError> {
        self.require_event(event_id).await?;
        let rows = self.daos.events.get_event_attendees(event_id).await?;
        self.listed(rows, EntityKind::Attendee.plural())
    }

    #[instrument(skip(self))]
    pub async fn get_event_organizer(&self, event_id: i32) -> Result<Organizer, PlannerError> {
        let event = self.require_event(event_id).await?;
        let organizer = self.daos.events.get_event_organizer(event_id).await?;
        found(organizer, EntityKind::Organizer, event.organizer_id)
    }

    // ---- activities ----

    #[instrument(skip(self))]
    pub async fn get_all_activities(&self) -> Result<Vec<Activity>, PlannerError> {
        let rows = self.daos.activities.get_all_activities().await?;
        self.listed(rows, EntityKind::Activity.plural())
    }

    #[instrument(skip(self))]
    pub async fn get_activity_by_id(&self, id: i32) -> Result<Activity, PlannerError> {
        check_id(id, EntityKind::Activity)?;
        found(self.daos.activities.get_activity_by_id(id).await?, EntityKind::Activity, id)
    }

    #[instrument(skip(self))]
    pub async fn get_activity_by_name(&self, name: &str) -> Result<Activity, PlannerError> {
        check_name(name, EntityKind::Activity)?;
        found_by_name(self.daos.activities.get_activity_by_name(name).await?, EntityKind::Activity, name)
    }

    #[instrument(skip(self, payload))]
    pub async fn add_activity(&self, payload: ActivityPayload) -> Result<i32, PlannerError> {
        let new = payload.into_new()?;
        let id = self.daos.activities.add_activity(new).await?;
        info!(activity_id = id, "activity_added");
        Ok(id)
    }

    #[instrument(skip(self, payload), fields(activity_id = ?payload.id))]
    pub async fn edit_activity(&self, payload: ActivityPayload) -> Result<(), PlannerError> {
        let record = payload.into_record()?;
        let id = record.id;
        self.daos.activities.edit_activity(record).await?;
        info!(activity_id = id, "activity_edited");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_activity(&self, id: i32) -> Result<(), PlannerError> {
        check_id(id, EntityKind::Activity)?;
        self.daos.activities.remove_activity(id).await?;
        info!(activity_id = id, "activity_removed");
        Ok(())
    }

    // ---- attendees ----

    #[instrument(skip(self))]
    pub async fn get_all_attendees(&self) -> Result<Vec<Attendee>, PlannerError> {
        let rows = self.daos.attendees.get_all_attendees().await?;
        self.listed(rows, EntityKind::Attendee.plural())
    }

    #[instrument(skip(self))]
    pub async fn get_attendee_by_id(&self, id: i32) -> Result<Attendee, PlannerError> {
        check_id(id, EntityKind::Attendee)?;
        found(self.daos.attendees.get_attendee_by_id(id).await?, EntityKind::Attendee, id)
    }

    #[instrument(skip(self))]
    pub async fn get_attendee_by_name(&self, name: &str) -> Result<Attendee, PlannerError> {
        check_name(name, EntityKind::Attendee)?;
        found_by_name(self.daos.attendees.get_attendee_by_name(name).await?, EntityKind::Attendee, name)
    }

    #[instrument(skip(self, payload))]
    pub async fn add_attendee(&self, payload: AttendeePayload) -> Result<i32, PlannerError> {
        let new = payload.into_new()?;
        let id = self.daos.attendees.add_attendee(new).await?;
        info!(attendee_id = id, "attendee_added");
        Ok(id)
    }

    #[instrument(skip(self, payload), fields(attendee_id = ?payload.id))]
    pub async fn edit_attendee(&self, payload: AttendeePayload) -> Result<(), PlannerError> {
        let record = payload.into_record()?;
        let id = record.id;
        self.daos.attendees.edit_attendee(record).await?;
        info!(attendee_id = id, "attendee_edited");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_attendee(&self, id: i32) -> Result<(), PlannerError> {
        check_id(id, EntityKind::Attendee)?;
        self.daos.attendees.remove_attendee(id).await?;
        info!(attendee_id = id, "attendee_removed");
        Ok(())
    }

    // ---- organizers ----

    #[instrument(skip(self))]
    pub async fn get_all_organizers(&self) -> Result<Vec<Organizer>, PlannerError> {
        let rows = self.daos.organizers.get_all_organizers().await?;
        self.listed(rows, EntityKind::Organizer.plural())
    }

    #[instrument(skip(self))]
    pub async fn get_organizer_by_id(&self, id: i32) -> Result<Organizer, PlannerError> {
        check_id(id, EntityKind::Organizer)?;
        found(self.daos.organizers.get_organizer_by_id(id).await?, EntityKind::Organizer, id)
    }

    #[instrument(skip(self))]
    pub async fn get_organizer_by_name(&self, name: &str) -> Result<Organizer, PlannerError> {
        check_name(name, EntityKind::Organizer)?;
        found_by_name(self.daos.organizers.get_organizer_by_name(name).await?, EntityKind::Organizer, name)
    }

    #[instrument(skip(self, payload))]
    pub async fn add_organizer(&self, payload: OrganizerPayload) -> Result<i32, PlannerError> {
        let new = payload.into_new()?;
        let id = self.daos.organizers.add_organizer(new).await?;
        info!(organizer_id = id, "organizer_added");
        Ok(id)
    }

    #[instrument(skip(self, payload), fields(organizer_id = ?payload.id))]
    pub async fn edit_organizer(&self, payload: OrganizerPayload) -> Result<(), PlannerError> {
        let record = payload.into_record()?;
        let id = record.id;
        self.daos.organizers.edit_organizer(record).await?;
        info!(organizer_id = id, "organizer_edited");
        Ok(())
    }

    /// Removes the organizer together with its events.
    #[instrument(skip(self))]
    pub async fn remove_organizer(&self, id: i32) -> Result<(), PlannerError> {
        check_id(id, EntityKind::Organizer)?;
        self.daos.organizers.remove_organizer(id).await?;
        debug!(organizer_id = id, "owned events cascaded");
        info!(organizer_id = id, "organizer_removed");
        Ok(())
    }
}
