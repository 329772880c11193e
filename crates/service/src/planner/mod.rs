//! Planner module: events, activities, attendees and organizers.
//!
//! Same three-layer layout as `auth`: domain records, DAO traits with an
//! in-memory and a SeaORM implementation, and the validating service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use repository::PlannerDaos;
pub use service::{ListPolicy, PlannerService};
