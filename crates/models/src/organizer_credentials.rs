use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::organizer;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizer_credentials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub organizer_id: i32,
    pub password_hash: String,
    pub password_algorithm: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Organizer }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Organizer => Entity::belongs_to(organizer::Entity)
                .from(Column::OrganizerId)
                .to(organizer::Column::Id)
                .into(),
        }
    }
}

impl Related<organizer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Organizer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert or replace the password hash for an organizer.
pub async fn upsert_password(
    db: &DatabaseConnection,
    organizer_id: i32,
    password_hash: String,
    algorithm: &str,
) -> Result<Model, crate::errors::ModelError> {
    if password_hash.trim().is_empty() {
        return Err(crate::errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    if let Some(existing) = Entity::find_by_id(organizer_id).one(db).await? {
        let mut am: ActiveModel = existing.into();
        am.password_hash = Set(password_hash);
        am.password_algorithm = Set(algorithm.to_string());
        am.updated_at = Set(now);
        Ok(am.update(db).await?)
    } else {
        let am = ActiveModel {
            organizer_id: Set(organizer_id),
            password_hash: Set(password_hash),
            password_algorithm: Set(algorithm.to_string()),
            updated_at: Set(now),
        };
        Ok(am.insert(db).await?)
    }
}
