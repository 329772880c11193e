//! Service layer for the event planner.
//! - `planner`: validated CRUD over events, activities, attendees and organizers.
//! - `auth`: organizer registration, login and token checks.
//! - DAOs come in an in-memory and a SeaORM flavour behind the same traits.

pub mod errors;
pub mod auth;
pub mod planner;
#[cfg(test)]
pub mod test_support;
