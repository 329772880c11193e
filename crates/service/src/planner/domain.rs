//! Planner records and the payloads clients send to create or replace them.
//!
//! Stored records (`Event`, `Activity`, ...) always carry every field. The
//! `*Payload` types mirror the wire: required fields are `Option` so a missing
//! value can be reported as a null-object failure instead of a decode error.
//! Edits are full replacements; an optional field left out of a payload is
//! stored as `None`, never merged with the previous value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{EntityKind, PlannerError};
use models::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub duration: i32,
    pub location: Option<String>,
    pub time: Option<String>,
    pub category: Option<String>,
    pub organizer_id: i32,
}

/// An event before the store has assigned its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub duration: i32,
    pub location: Option<String>,
    pub time: Option<String>,
    pub category: Option<String>,
    pub organizer_id: i32,
}

impl NewEvent {
    pub fn with_id(self, id: i32) -> Event {
        Event {
            id,
            name: self.name,
            date: self.date,
            duration: self.duration,
            location: self.location,
            time: self.time,
            category: self.category,
            organizer_id: self.organizer_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub event_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    pub name: String,
    pub duration: i32,
    pub event_id: i32,
}

impl NewActivity {
    pub fn with_id(self, id: i32) -> Activity {
        Activity { id, name: self.name, duration: self.duration, event_id: self.event_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub event_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendee {
    pub name: String,
    pub email: Option<String>,
    pub event_id: i32,
}

impl NewAttendee {
    pub fn with_id(self, id: i32) -> Attendee {
        Attendee { id, name: self.name, email: self.email, event_id: self.event_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganizer {
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl NewOrganizer {
    pub fn with_id(self, id: i32) -> Organizer {
        Organizer { id, name: self.name, email: self.email, roles: self.roles }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub organizer_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub event_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeePayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub event_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl From<Event> for EventPayload {
    fn from(e: Event) -> Self {
        Self {
            id: Some(e.id),
            name: Some(e.name),
            date: e.date,
            duration: Some(e.duration),
            location: e.location,
            time: e.time,
            category: e.category,
            organizer_id: Some(e.organizer_id),
        }
    }
}

impl From<Activity> for ActivityPayload {
    fn from(a: Activity) -> Self {
        Self { id: Some(a.id), name: Some(a.name), duration: Some(a.duration), event_id: Some(a.event_id) }
    }
}

impl From<Attendee> for AttendeePayload {
    fn from(a: Attendee) -> Self {
        Self { id: Some(a.id), name: Some(a.name), email: a.email, event_id: Some(a.event_id) }
    }
}

impl From<Organizer> for OrganizerPayload {
    fn from(o: Organizer) -> Self {
        Self { id: Some(o.id), name: Some(o.name), email: Some(o.email), roles: Some(o.roles) }
    }
}

/// A required text field: present and not blank.
fn required_text(value: Option<String>, kind: EntityKind) -> Result<String, PlannerError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PlannerError::null_object(kind)),
    }
}

/// A required foreign key: present and positive.
fn required_ref(value: Option<i32>, kind: EntityKind) -> Result<i32, PlannerError> {
    match value {
        Some(v) if v >= 1 => Ok(v),
        _ => Err(PlannerError::null_object(kind)),
    }
}

fn duration(value: Option<i32>) -> Result<i32, PlannerError> {
    let d = value.unwrap_or(0);
    if d < 0 {
        return Err(PlannerError::Validation("duration must be >= 0".into()));
    }
    Ok(d)
}

/// Empty strings in optional text fields are stored as absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Identity for a full-record replace.
fn edit_id(value: Option<i32>, kind: EntityKind) -> Result<i32, PlannerError> {
    match value {
        Some(id) if id > 0 => Ok(id),
        _ => Err(PlannerError::invalid_id(kind)),
    }
}

impl EventPayload {
    /// Check required fields and limits, producing an insertable event.
    pub fn into_new(self) -> Result<NewEvent, PlannerError> {
        let kind = EntityKind::Event;
        let name = required_text(self.name, kind)?;
        let organizer_id = required_ref(self.organizer_id, kind)?;
        validate::validate_name(&name, validate::EVENT_NAME_MAX)?;
        Ok(NewEvent {
            name,
            date: self.date,
            duration: duration(self.duration)?,
            location: optional_text(self.location),
            time: optional_text(self.time),
            category: optional_text(self.category),
            organizer_id,
        })
    }

    /// Like [`EventPayload::into_new`] but first requires a positive `id`.
    pub fn into_record(self) -> Result<Event, PlannerError> {
        let id = edit_id(self.id, EntityKind::Event)?;
        Ok(self.into_new()?.with_id(id))
    }
}

impl ActivityPayload {
    pub fn into_new(self) -> Result<NewActivity, PlannerError> {
        let kind = EntityKind::Activity;
        let name = required_text(self.name, kind)?;
        let event_id = required_ref(self.event_id, kind)?;
        validate::validate_name(&name, validate::ACTIVITY_NAME_MAX)?;
        Ok(NewActivity { name, duration: duration(self.duration)?, event_id })
    }

    pub fn into_record(self) -> Result<Activity, PlannerError> {
        let id = edit_id(self.id, EntityKind::Activity)?;
        Ok(self.into_new()?.with_id(id))
    }
}

impl AttendeePayload {
    pub fn into_new(self) -> Result<NewAttendee, PlannerError> {
        let kind = EntityKind::Attendee;
        let name = required_text(self.name, kind)?;
        let event_id = required_ref(self.event_id, kind)?;
        validate::validate_name(&name, validate::ATTENDEE_NAME_MAX)?;
        let email = optional_text(self.email);
        if let Some(email) = &email {
            validate::validate_email(email)?;
        }
        Ok(NewAttendee { name, email, event_id })
    }

    /// Edits additionally require an email.
    pub fn into_record(self) -> Result<Attendee, PlannerError> {
        let id = edit_id(self.id, EntityKind::Attendee)?;
        if optional_text(self.email.clone()).is_none() {
            return Err(PlannerError::null_object(EntityKind::Attendee));
        }
        Ok(self.into_new()?.with_id(id))
    }
}

impl OrganizerPayload {
    pub fn into_new(self) -> Result<NewOrganizer, PlannerError> {
        let kind = EntityKind::Organizer;
        let name = required_text(self.name, kind)?;
        let email = required_text(self.email, kind)?;
        validate::validate_email(&email)?;
        let mut roles: Vec<String> = self
            .roles
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        roles.sort();
        roles.dedup();
        if roles.iter().any(|r| r.chars().count() > 64) {
            return Err(PlannerError::Validation("role must be at most 64 characters".into()));
        }
        Ok(NewOrganizer { name, email, roles })
    }

    pub fn into_record(self) -> Result<Organizer, PlannerError> {
        let id = edit_id(self.id, EntityKind::Organizer)?;
        Ok(self.into_new()?.with_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party() -> EventPayload {
        EventPayload {
            name: Some("TEST EVENT".into()),
            location: Some("Maryland".into()),
            time: Some("3 PM EST".into()),
            organizer_id: Some(1),
            category: Some("Work".into()),
            date: NaiveDate::from_ymd_opt(2021, 7, 21),
            duration: Some(10),
            ..Default::default()
        }
    }

    #[test]
    fn event_payload_requires_name_and_organizer() {
        let mut p = party();
        p.name = None;
        assert!(matches!(p.into_new(), Err(PlannerError::NullObject(_))));

        let mut p = party();
        p.name = Some("   ".into());
        assert!(matches!(p.into_new(), Err(PlannerError::NullObject(_))));

        let mut p = party();
        p.organizer_id = Some(0);
        assert!(matches!(p.into_new(), Err(PlannerError::NullObject(_))));
    }

    #[test]
    fn event_name_over_limit_is_a_validation_error() {
        let mut p = party();
        p.name = Some("x".repeat(101));
        assert!(matches!(p.into_new(), Err(PlannerError::Validation(_))));
    }

    #[test]
    fn negative_duration_rejected_and_missing_duration_defaults() {
        let mut p = party();
        p.duration = Some(-1);
        assert!(matches!(p.into_new(), Err(PlannerError::Validation(_))));

        let mut p = party();
        p.duration = None;
        assert_eq!(p.into_new().unwrap().duration, 0);
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        let mut p = party();
        p.location = Some(String::new());
        assert_eq!(p.into_new().unwrap().location, None);
    }

    #[test]
    fn edit_requires_positive_id() {
        let p = party();
        assert!(matches!(p.clone().into_record(), Err(PlannerError::InvalidId(_))));
        let p = EventPayload { id: Some(3), ..p };
        assert_eq!(p.into_record().unwrap().id, 3);
    }

    #[test]
    fn attendee_edit_requires_email_but_add_does_not() {
        let p = AttendeePayload { id: Some(1), name: Some("Walter".into()), email: None, event_id: Some(2) };
        assert!(p.clone().into_new().is_ok());
        assert!(matches!(p.into_record(), Err(PlannerError::NullObject(_))));
    }

    #[test]
    fn organizer_roles_are_normalized() {
        let p = OrganizerPayload {
            name: Some("Jimmy".into()),
            email: Some("jimmy@example.com".into()),
            roles: Some(vec![" admin ".into(), "".into(), "admin".into(), "host".into()]),
            ..Default::default()
        };
        assert_eq!(p.into_new().unwrap().roles, vec!["admin".to_string(), "host".to_string()]);
    }

    #[test]
    fn organizer_needs_valid_email() {
        let p = OrganizerPayload { name: Some("Bob".into()), email: None, ..Default::default() };
        assert!(matches!(p.into_new(), Err(PlannerError::NullObject(_))));
        let p = OrganizerPayload { name: Some("Bob".into()), email: Some("bob".into()), ..Default::default() };
        assert!(matches!(p.into_new(), Err(PlannerError::Validation(_))));
    }

    #[test]
    fn payload_json_accepts_missing_fields() {
        let p: ActivityPayload = serde_json::from_str(r#"{"duration": 5, "event_id": 1}"#).unwrap();
        assert_eq!(p.name, None);
        assert!(matches!(p.into_new(), Err(PlannerError::NullObject(_))));
    }
}
