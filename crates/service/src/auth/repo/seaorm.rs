use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait,
};

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::{organizer, organizer_credentials, organizer_role};

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn repo_err(e: DbErr) -> AuthError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::Conflict,
        _ => AuthError::Repository(e.to_string()),
    }
}

impl SeaOrmAuthRepository {
    async fn roles_of(&self, organizer_id: i32) -> Result<Vec<String>, AuthError> {
        let rows = organizer_role::Entity::find()
            .filter(organizer_role::Column::OrganizerId.eq(organizer_id))
            .order_by_asc(organizer_role::Column::Role)
            .all(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(rows.into_iter().map(|r| r.role).collect())
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_organizer_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = organizer::Entity::find()
            .filter(organizer::Column::Email.eq(email.to_string()))
            .order_by_asc(organizer::Column::Id)
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        match res {
            Some(o) => {
                let roles = self.roles_of(o.id).await?;
                Ok(Some(AuthUser { id: o.id, email: o.email, name: o.name, roles }))
            }
            None => Ok(None),
        }
    }

    async fn create_organizer(&self, email: &str, name: &str, roles: &[String]) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(repo_err)?;
        let created = organizer::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(repo_err)?;
        for role in roles {
            organizer_role::ActiveModel { organizer_id: Set(created.id), role: Set(role.clone()) }
                .insert(&txn)
                .await
                .map_err(repo_err)?;
        }
        txn.commit().await.map_err(repo_err)?;
        Ok(AuthUser { id: created.id, email: created.email, name: created.name, roles: roles.to_vec() })
    }

    async fn get_credentials(&self, organizer_id: i32) -> Result<Option<Credentials>, AuthError> {
        let res = organizer_credentials::Entity::find_by_id(organizer_id)
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(res.map(|c| Credentials {
            organizer_id: c.organizer_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }

    async fn upsert_password(&self, organizer_id: i32, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = organizer_credentials::upsert_password(&self.db, organizer_id, password_hash, &password_algorithm).await?;
        Ok(Credentials { organizer_id: c.organizer_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm })
    }
}
