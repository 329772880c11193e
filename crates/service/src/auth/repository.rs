use async_trait::async_trait;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
///
/// Implemented by `SeaOrmAuthRepository` and by the planner's `MemoryStore`,
/// so registered organizers show up in the planner's organizer list.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_organizer_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_organizer(&self, email: &str, name: &str, roles: &[String]) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, organizer_id: i32) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, organizer_id: i32, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}
