//! Mutex-guarded in-memory store implementing every planner DAO and the
//! auth repository. Ids come from per-table counters starting at 1; tables
//! are keyed by id so iteration order is insertion order.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::{EntityKind, PlannerError};
use crate::planner::domain::{
    Activity, Attendee, Event, NewActivity, NewAttendee, NewEvent, NewOrganizer, Organizer,
};
use crate::planner::repository::{ActivityDao, AttendeeDao, EventDao, OrganizerDao};
use models::validate::name_key;

#[derive(Debug)]
struct Table<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { next_id: 0, rows: BTreeMap::new() }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> i32 {
        self.next_id += 1;
        let id = self.next_id;
        self.rows.insert(id, build(id));
        id
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn find_by_name(&self, name: &str, name_of: impl Fn(&T) -> &str) -> Option<T> {
        let key = name_key(name);
        self.rows.values().find(|row| name_key(name_of(row)) == key).cloned()
    }
}

#[derive(Debug, Default)]
struct Tables {
    events: Table<Event>,
    activities: Table<Activity>,
    attendees: Table<Attendee>,
    organizers: Table<Organizer>,
    credentials: HashMap<i32, Credentials>,
}

impl Tables {
    fn require_organizer(&self, id: i32) -> Result<(), PlannerError> {
        if self.organizers.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(PlannerError::Constraint(format!("event.organizer_id references missing organizer {id}")))
        }
    }

    fn require_event(&self, id: i32, column: &str) -> Result<(), PlannerError> {
        if self.events.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(PlannerError::Constraint(format!("{column} references missing event {id}")))
        }
    }

    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.organizers
            .rows
            .values()
            .any(|o| o.email == email && Some(o.id) != except)
    }

    fn drop_event(&mut self, id: i32) {
        self.events.rows.remove(&id);
        self.activities.rows.retain(|_, a| a.event_id != id);
        self.attendees.rows.retain(|_, a| a.event_id != id);
    }
}

/// In-process planner store, mainly for tests and the `memory` backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

fn poisoned<E>(_: E) -> PlannerError {
    PlannerError::Repository("memory store lock poisoned".into())
}

fn duplicate_email(email: &str) -> PlannerError {
    PlannerError::Constraint(format!("organizer email {email} already exists"))
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with demo organizers, events, activities and attendees.
    pub fn seeded() -> Self {
        let mut t = Tables::default();
        for name in ["Jimmy", "Steve", "John", "Bob", "Mario"] {
            t.organizers.insert_with(|id| Organizer {
                id,
                name: name.to_string(),
                email: format!("{}@planner.dev", name.to_lowercase()),
                roles: Vec::new(),
            });
        }
        let events = [
            ("Brendan's Party", (2021, 6, 28), 60, 1),
            ("John's Party", (2020, 5, 6), 30, 2),
            ("Quinton's Party", (1997, 2, 19), 85, 3),
            ("Renee's Party", (1956, 8, 20), 90, 4),
            ("Jimmy's Party", (1996, 2, 20), 80, 4),
        ];
        for (name, (y, m, d), duration, organizer_id) in events {
            t.events.insert_with(|id| Event {
                id,
                name: name.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d),
                duration,
                location: None,
                time: None,
                category: Some("Party".to_string()),
                organizer_id,
            });
        }
        for (name, duration) in [("Bowling", 50), ("Running", 20), ("Jogging", 40), ("Lifting", 90), ("Swimming", 50)] {
            t.activities.insert_with(|id| Activity { id, name: name.to_string(), duration, event_id: 1 });
        }
        for (name, event_id) in [("John", 1), ("David", 1), ("Jimmy", 2), ("Stephen", 2), ("Walter", 2)] {
            t.attendees.insert_with(|id| Attendee { id, name: name.to_string(), email: None, event_id });
        }
        Self { tables: Mutex::new(t) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, PlannerError> {
        self.tables.lock().map_err(poisoned)
    }
}

#[async_trait]
impl EventDao for MemoryStore {
    async fn add_event(&self, event: NewEvent) -> Result<i32, PlannerError> {
        let mut t = self.lock()?;
        t.require_organizer(event.organizer_id)?;
        Ok(t.events.insert_with(|id| event.with_id(id)))
    }

    async fn get_event_by_id(&self, id: i32) -> Result<Option<Event>, PlannerError> {
        Ok(self.lock()?.events.rows.get(&id).cloned())
    }

    async fn get_event_by_name(&self, name: &str) -> Result<Option<Event>, PlannerError> {
        Ok(self.lock()?.events.find_by_name(name, |e| e.name.as_str()))
    }

    async fn get_all_events(&self) -> Result<Vec<Event>, PlannerError> {
        Ok(self.lock()?.events.all())
    }

    async fn edit_event(&self, event: Event) -> Result<(), PlannerError> {
        let mut t = self.lock()?;
        if !t.events.rows.contains_key(&event.id) {
            return Err(PlannerError::missing_id(EntityKind::Event, event.id));
        }
        t.require_organizer(event.organizer_id)?;
        t.events.rows.insert(event.id, event);
        Ok(())
    }

    async fn remove_event(&self, id: i32) -> Result<(), PlannerError> {
        let mut t = self.lock()?;
        if !t.events.rows.contains_key(&id) {
            return Err(PlannerError::missing_id(EntityKind::Event, id));
        }
        t.drop_event(id);
        Ok(())
    }

    async fn get_events_by_organizer(&self, organizer_id: i32) -> Result<Vec<Event>, PlannerError> {
        let t = self.lock()?;
        Ok(t.events.rows.values().filter(|e| e.organizer_id == organizer_id).cloned().collect())
    }

    async fn get_event_activities(&self, event_id: i32) -> Result<Vec<Activity>, PlannerError> {
        let t = self.lock()?;
        Ok(t.activities.rows.values().filter(|a| a.event_id == event_id).cloned().collect())
    }

    async fn get_event_attendees(&self, event_id: i32) -> Result<Vec<Attendee>, PlannerError> {
        let t = self.lock()?;
        Ok(t.attendees.rows.values().filter(|a| a.event_id == event_id).cloned().collect())
    }

    async fn get_event_organizer(&self, event_id: i32) -> Result<Option<Organizer>, PlannerError> {
        let t = self.lock()?;
        Ok(t.events
            .rows
            .get(&event_id)
            .and_then(|e| t.organizers.rows.get(&e.organizer_id))
            .cloned())
    }
}

#[async_trait]
impl ActivityDao for MemoryStore {
    async fn add_activity(&self, activity: NewActivity) -> Result<i32, PlannerError> {
        let mut t = self.lock()?;
        t.require_event(activity.event_id, "activity.event_id")?;
        Ok(t.activities.insert_with(|id| activity.with_id(id)))
    }

    async fn get_activity_by_id(&self, id: i32) -> Result<Option<Activity>, PlannerError> {
        Ok(self.lock()?.activities.rows.get(&id).cloned())
    }

    async fn get_activity_by_name(&self, name: &str) -> Result<Option<Activity>, PlannerError> {
        Ok(self.lock()?.activities.find_by_name(name, |a| a.name.as_str()))
    }

    async fn get_all_activities(&self) -> Result<Vec<Activity>, PlannerError> {
        Ok(self.lock()?.activities.all())
    }

    async fn edit_activity(&self, activity: Activity) -> Result<(), PlannerError> {
        let mut t = self.lock()?;
        if !t.activities.rows.contains_key(&activity.id) {
            return Err(PlannerError::missing_id(EntityKind::Activity, activity.id));
        }
        t.require_event(activity.event_id, "activity.event_id")?;
        t.activities.rows.insert(activity.id, activity);
        Ok(())
    }

    async fn remove_activity(&self, id: i32) -> Result<(), PlannerError> {
        self.lock()?
            .activities
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PlannerError::missing_id(EntityKind::Activity, id))
    }
}

#[async_trait]
impl AttendeeDao for MemoryStore {
    async fn add_attendee(&self, attendee: NewAttendee) -> Result<i32, PlannerError> {
        let mut t = self.lock()?;
        t.require_event(attendee.event_id, "attendee.event_id")?;
        Ok(t.attendees.insert_with(|id| attendee.with_id(id)))
    }

    async fn get_attendee_by_id(&self, id: i32) -> Result<Option<Attendee>, PlannerError> {
        Ok(self.lock()?.attendees.rows.get(&id).cloned())
    }

    async fn get_attendee_by_name(&self, name: &str) -> Result<Option<Attendee>, PlannerError> {
        Ok(self.lock()?.attendees.find_by_name(name, |a| a.name.as_str()))
    }

    async fn get_all_attendees(&self) -> Result<Vec<Attendee>, PlannerError> {
        Ok(self.lock()?.attendees.all())
    }

    async fn edit_attendee(&self, attendee: Attendee) -> Result<(), PlannerError> {
        let mut t = self.lock()?;
        if !t.attendees.rows.contains_key(&attendee.id) {
            return Err(PlannerError::missing_id(EntityKind::Attendee, attendee.id));
        }
        t.require_event(attendee.event_id, "attendee.event_id")?;
        t.attendees.rows.insert(attendee.id, attendee);
        Ok(())
    }

    async fn remove_attendee(&self, id: i32) -> Result<(), PlannerError> {
        self.lock()?
            .attendees
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PlannerError::missing_id(EntityKind::Attendee, id))
    }
}

#[async_trait]
impl OrganizerDao for MemoryStore {
    async fn add_organizer(&self, organizer: NewOrganizer) -> Result<i32, PlannerError> {
        let mut t = self.lock()?;
        if t.email_taken(&organizer.email, None) {
            return Err(duplicate_email(&organizer.email));
        }
        Ok(t.organizers.insert_with(|id| organizer.with_id(id)))
    }

    async fn get_organizer_by_id(&self, id: i32) -> Result<Option<Organizer>, PlannerError> {
        Ok(self.lock()?.organizers.rows.get(&id).cloned())
    }

    async fn get_organizer_by_name(&self, name: &str) -> Result<Option<Organizer>, PlannerError> {
        Ok(self.lock()?.organizers.find_by_name(name, |o| o.name.as_str()))
    }

    async fn get_all_organizers(&self) -> Result<Vec<Organizer>, PlannerError> {
        Ok(self.lock()?.organizers.all())
    }

    async fn edit_organizer(&self, organizer: Organizer) -> Result<(), PlannerError> {
        let mut t = self.lock()?;
        if !t.organizers.rows.contains_key(&organizer.id) {
            return Err(PlannerError::missing_id(EntityKind::Organizer, organizer.id));
        }
        if t.email_taken(&organizer.email, Some(organizer.id)) {
            return Err(duplicate_email(&organizer.email));
        }
        t.organizers.rows.insert(organizer.id, organizer);
        Ok(())
    }

    async fn remove_organizer(&self, id: i32) -> Result<(), PlannerError> {
        let mut t = self.lock()?;
        if t.organizers.rows.remove(&id).is_none() {
            return Err(PlannerError::missing_id(EntityKind::Organizer, id));
        }
        let owned: Vec<i32> = t.events.rows.values().filter(|e| e.organizer_id == id).map(|e| e.id).collect();
        for event_id in owned {
            t.drop_event(event_id);
        }
        t.credentials.remove(&id);
        Ok(())
    }
}

fn auth_err(e: PlannerError) -> AuthError {
    AuthError::Repository(e.to_string())
}

#[async_trait]
impl AuthRepository for MemoryStore {
    async fn find_organizer_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let t = self.lock().map_err(auth_err)?;
        Ok(t.organizers.rows.values().find(|o| o.email == email).map(|o| AuthUser {
            id: o.id,
            email: o.email.clone(),
            name: o.name.clone(),
            roles: o.roles.clone(),
        }))
    }

    async fn create_organizer(&self, email: &str, name: &str, roles: &[String]) -> Result<AuthUser, AuthError> {
        let mut t = self.lock().map_err(auth_err)?;
        if t.email_taken(email, None) {
            return Err(AuthError::Conflict);
        }
        let id = t.organizers.insert_with(|id| Organizer {
            id,
            name: name.to_string(),
            email: email.to_string(),
            roles: roles.to_vec(),
        });
        Ok(AuthUser { id, email: email.to_string(), name: name.to_string(), roles: roles.to_vec() })
    }

    async fn get_credentials(&self, organizer_id: i32) -> Result<Option<Credentials>, AuthError> {
        Ok(self.lock().map_err(auth_err)?.credentials.get(&organizer_id).cloned())
    }

    async fn upsert_password(&self, organizer_id: i32, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let mut t = self.lock().map_err(auth_err)?;
        if !t.organizers.rows.contains_key(&organizer_id) {
            return Err(AuthError::NotFound);
        }
        let c = Credentials { organizer_id, password_hash, password_algorithm };
        t.credentials.insert(organizer_id, c.clone());
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowling(event_id: i32) -> NewActivity {
        NewActivity { name: "Bowling".into(), duration: 50, event_id }
    }

    #[tokio::test]
    async fn seeded_store_has_demo_data_in_id_order() {
        let store = MemoryStore::seeded();
        let events = store.get_all_events().await.unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Brendan's Party", "John's Party", "Quinton's Party", "Renee's Party", "Jimmy's Party"]);
        assert!(events.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(store.get_all_organizers().await.unwrap().len(), 5);
        assert_eq!(store.get_event_activities(1).await.unwrap().len(), 5);
        assert_eq!(store.get_event_attendees(2).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn ids_start_at_one_and_are_never_reused() {
        let store = MemoryStore::new();
        let org = store
            .add_organizer(NewOrganizer { name: "Jimmy".into(), email: "j@e.com".into(), roles: vec![] })
            .await
            .unwrap();
        assert_eq!(org, 1);
        let ev = store
            .add_event(NewEvent {
                name: "Party".into(),
                date: None,
                duration: 0,
                location: None,
                time: None,
                category: None,
                organizer_id: org,
            })
            .await
            .unwrap();
        let first = store.add_activity(bowling(ev)).await.unwrap();
        store.remove_activity(first).await.unwrap();
        let second = store.add_activity(bowling(ev)).await.unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[tokio::test]
    async fn dangling_foreign_keys_are_constraint_errors() {
        let store = MemoryStore::seeded();
        let err = store.add_activity(bowling(99)).await.unwrap_err();
        assert!(matches!(err, PlannerError::Constraint(_)));
        assert_eq!(store.get_all_activities().await.unwrap().len(), 5);

        let mut ev = store.get_event_by_id(1).await.unwrap().unwrap();
        ev.organizer_id = 42;
        assert!(matches!(store.edit_event(ev).await, Err(PlannerError::Constraint(_))));
    }

    #[tokio::test]
    async fn name_lookup_ignores_case_and_whitespace_and_prefers_lowest_id() {
        let store = MemoryStore::seeded();
        let hit = store.get_event_by_name("  brendan'sparty ").await.unwrap().unwrap();
        assert_eq!(hit.id, 1);

        let dup = store.add_activity(NewActivity { name: "BOWLING".into(), duration: 1, event_id: 2 }).await.unwrap();
        assert!(dup > 1);
        assert_eq!(store.get_activity_by_name("bowling").await.unwrap().unwrap().id, 1);
        assert!(store.get_attendee_by_name("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn removing_an_organizer_cascades() {
        let store = MemoryStore::seeded();
        store.remove_organizer(1).await.unwrap();
        assert!(store.get_event_by_id(1).await.unwrap().is_none());
        assert!(store.get_all_activities().await.unwrap().is_empty());
        let attendees = store.get_all_attendees().await.unwrap();
        assert!(attendees.iter().all(|a| a.event_id == 2));
        assert!(matches!(store.remove_organizer(1).await, Err(PlannerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn edit_and_remove_unknown_ids_are_not_found() {
        let store = MemoryStore::seeded();
        let ghost = Attendee { id: 77, name: "Ghost".into(), email: Some("g@e.com".into()), event_id: 1 };
        assert!(matches!(store.edit_attendee(ghost).await, Err(PlannerError::NotFound { kind: EntityKind::Attendee, .. })));
        assert!(matches!(store.remove_event(77).await, Err(PlannerError::NotFound { kind: EntityKind::Event, .. })));
    }

    #[tokio::test]
    async fn organizer_email_is_unique() {
        let store = MemoryStore::seeded();
        let dup = NewOrganizer { name: "Other".into(), email: "jimmy@planner.dev".into(), roles: vec![] };
        assert!(matches!(store.add_organizer(dup).await, Err(PlannerError::Constraint(_))));
        let err = store.create_organizer("steve@planner.dev", "Steve", &[]).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn event_organizer_follows_relation() {
        let store = MemoryStore::seeded();
        let org = store.get_event_organizer(5).await.unwrap().unwrap();
        assert_eq!(org.name, "Bob");
        assert_eq!(store.get_events_by_organizer(4).await.unwrap().len(), 2);
        assert!(store.get_event_organizer(99).await.unwrap().is_none());
    }
}
