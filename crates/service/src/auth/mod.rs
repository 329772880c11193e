//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Organizers register with a password and log in for a bearer token that
//! guards the planner API.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
