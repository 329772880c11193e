use std::fmt;

use thiserror::Error;

/// The four record kinds the planner manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Event,
    Activity,
    Attendee,
    Organizer,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Event => "event",
            EntityKind::Activity => "activity",
            EntityKind::Attendee => "attendee",
            EntityKind::Organizer => "organizer",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Event => "events",
            EntityKind::Activity => "activities",
            EntityKind::Attendee => "attendees",
            EntityKind::Organizer => "organizers",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Failure conditions of planner operations.
///
/// Every variant carries a human-readable message that is safe to return to
/// clients; mapping to transport status codes happens once, in the server.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("{0}")]
    InvalidId(String),
    #[error("{0}")]
    NullObject(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidName(String),
    #[error("{message}")]
    NotFound { kind: EntityKind, message: String },
    #[error("{0}")]
    EmptyList(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl PlannerError {
    pub fn not_found(kind: EntityKind, message: impl Into<String>) -> Self {
        Self::NotFound { kind, message: message.into() }
    }

    /// Default not-found message for a lookup by id.
    pub fn missing_id(kind: EntityKind, id: i32) -> Self {
        Self::not_found(kind, format!("No {kind} was found for id {id}"))
    }

    pub fn invalid_id(kind: EntityKind) -> Self {
        Self::InvalidId(format!("Invalid id for this {kind}"))
    }

    pub fn null_object(kind: EntityKind) -> Self {
        Self::NullObject(format!("This {kind} is null or has null properties"))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            PlannerError::InvalidId(_) => 2001,
            PlannerError::NullObject(_) => 2002,
            PlannerError::Validation(_) => 2003,
            PlannerError::InvalidName(_) => 2004,
            PlannerError::NotFound { .. } => 2005,
            PlannerError::EmptyList(_) => 2006,
            PlannerError::Constraint(_) => 2101,
            PlannerError::Repository(_) => 2200,
        }
    }

    /// True for failures caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PlannerError::Repository(_))
    }
}

impl From<models::errors::ModelError> for PlannerError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => PlannerError::Validation(msg),
            models::errors::ModelError::Db(msg) => PlannerError::Repository(msg),
        }
    }
}

impl From<sea_orm::DbErr> for PlannerError {
    fn from(e: sea_orm::DbErr) -> Self {
        use sea_orm::SqlErr;
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => PlannerError::Constraint(msg),
            Some(SqlErr::UniqueConstraintViolation(msg)) => PlannerError::Constraint(msg),
            _ => PlannerError::Repository(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entity() {
        assert_eq!(PlannerError::invalid_id(EntityKind::Event).to_string(), "Invalid id for this event");
        assert_eq!(
            PlannerError::null_object(EntityKind::Attendee).to_string(),
            "This attendee is null or has null properties"
        );
        assert_eq!(PlannerError::missing_id(EntityKind::Activity, 7).to_string(), "No activity was found for id 7");
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            PlannerError::InvalidId(String::new()),
            PlannerError::NullObject(String::new()),
            PlannerError::Validation(String::new()),
            PlannerError::InvalidName(String::new()),
            PlannerError::not_found(EntityKind::Event, ""),
            PlannerError::EmptyList(String::new()),
            PlannerError::Constraint(String::new()),
            PlannerError::Repository(String::new()),
        ];
        let mut codes: Vec<u16> = all.iter().map(PlannerError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn model_errors_map_by_kind() {
        let v: PlannerError = models::errors::ModelError::Validation("name required".into()).into();
        assert_eq!(v, PlannerError::Validation("name required".into()));
        let d: PlannerError = models::errors::ModelError::Db("boom".into()).into();
        assert!(!d.is_client_error());
    }
}
