use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::organizer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizer_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub organizer_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub role: String,
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
