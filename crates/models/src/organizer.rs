use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{event, organizer_credentials, organizer_role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Event,
    Role,
    Credentials,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Event => Entity::has_many(event::Entity).into(),
            Relation::Role => Entity::has_many(organizer_role::Entity).into(),
            Relation::Credentials => Entity::has_one(organizer_credentials::Entity).into(),
        }
    }
}

impl Related<event::Entity> for Entity {
    fn to() -> RelationDef { Relation::Event.def() }
}

impl Related<organizer_role::Entity> for Entity {
    fn to() -> RelationDef { Relation::Role.def() }
}

impl Related<organizer_credentials::Entity> for Entity {
    fn to() -> RelationDef { Relation::Credentials.def() }
}

impl ActiveModelBehavior for ActiveModel {}
