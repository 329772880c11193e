use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

pub const MIN_PASSWORD_LEN: usize = 8;
/// Role granted to every self-registered organizer.
pub const DEFAULT_ROLE: &str = "organizer";

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub password_algorithm: String,
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self { jwt_secret: jwt_secret.into(), password_algorithm: "argon2".into(), token_ttl_hours: 12 }
    }
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a plaintext password against a stored PHC-format hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new organizer with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::service::{AuthService, AuthConfig};
    /// use service::auth::domain::RegisterInput;
    /// use service::planner::repo::memory::MemoryStore;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MemoryStore::new()), AuthConfig::new("secret"));
    /// let input = RegisterInput { name: "Test".into(), email: "User@Example.com".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// assert_eq!(user.roles, vec!["organizer".to_string()]);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if input.name.trim().is_empty() {
            return Err(AuthError::Validation("name required".into()));
        }
        let email = normalize_email(&input.email);
        models::validate::validate_email(&email)?;
        if let Some(existing) = self.repo.find_organizer_by_email(&email).await? {
            debug!("organizer exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let roles = vec![DEFAULT_ROLE.to_string()];
        let user = self.repo.create_organizer(&email, input.name.trim(), &roles).await?;
        let hash = hash_password(&input.password)?;
        self.repo.upsert_password(user.id, hash, self.cfg.password_algorithm.clone()).await?;
        info!(organizer_id = user.id, email = %user.email, "organizer_registered");
        Ok(user)
    }

    /// Authenticate an organizer and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::service::{AuthService, AuthConfig};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use service::planner::repo::memory::MemoryStore;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MemoryStore::new()), AuthConfig::new("secret"));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert_eq!(svc.validate_token(&session.token).unwrap().oid, session.user.id);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = normalize_email(&input.email);
        let user = self.repo
            .find_organizer_by_email(&email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !verify_password(&input.password, &cred.password_hash)? {
            warn!(organizer_id = user.id, "login_rejected");
            return Err(AuthError::Unauthorized);
        }

        let token = self.issue_token(&user)?;
        info!(organizer_id = user.id, "organizer_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Sign an HS256 token for `user` valid for the configured TTL.
    pub fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(self.cfg.token_ttl_hours);
        let claims = Claims {
            sub: user.email.clone(),
            oid: user.id,
            roles: user.roles.clone(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::Unauthorized
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::repo::memory::MemoryStore;

    fn svc() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), AuthConfig::new("unit-secret"))
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput { name: "Mario".into(), email: email.into(), password: password.into() }
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let err = svc().register(input("m@e.com", "short")).await.unwrap_err();
        assert_eq!(err.code(), 1001);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_ignoring_case() {
        let svc = svc();
        svc.register(input("m@e.com", "Passw0rd!")).await.unwrap();
        let err = svc.register(input(" M@E.com ", "Passw0rd!")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = svc();
        svc.register(input("m@e.com", "Passw0rd!")).await.unwrap();
        let err = svc
            .login(LoginInput { email: "m@e.com".into(), password: "nope-nope".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        let err = svc
            .login(LoginInput { email: "ghost@e.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn token_round_trips_claims() {
        let svc = svc();
        let user = svc.register(input("m@e.com", "Passw0rd!")).await.unwrap();
        let session = svc.login(LoginInput { email: "m@e.com".into(), password: "Passw0rd!".into() }).await.unwrap();
        let claims = svc.validate_token(&session.token).unwrap();
        assert_eq!(claims.oid, user.id);
        assert_eq!(claims.sub, "m@e.com");
        assert_eq!(claims.roles, vec![DEFAULT_ROLE.to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn foreign_or_expired_tokens_are_rejected() {
        let user = AuthUser { id: 1, email: "a@b.c".into(), name: "A".into(), roles: vec![] };
        let other = AuthService::new(Arc::new(MemoryStore::new()), AuthConfig::new("other-secret"));
        let token = other.issue_token(&user).unwrap();
        assert!(matches!(svc().validate_token(&token), Err(AuthError::Unauthorized)));

        let mut cfg = AuthConfig::new("unit-secret");
        cfg.token_ttl_hours = -1;
        let stale = AuthService::new(Arc::new(MemoryStore::new()), cfg).issue_token(&user).unwrap();
        assert!(matches!(svc().validate_token(&stale), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn verify_password_matches_hash() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
        assert!(verify_password("x", "not-a-phc-string").is_err());
    }
}
