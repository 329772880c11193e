//! SeaORM entities for the planner schema plus the field rules the service
//! layer validates against before touching the database.

pub mod errors;
pub mod db;
pub mod validate;
pub mod organizer;
pub mod organizer_role;
pub mod organizer_credentials;
pub mod event;
pub mod activity;
pub mod attendee;

#[cfg(test)]
mod tests;
