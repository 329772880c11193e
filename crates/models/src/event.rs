use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{activity, attendee, organizer};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub date: Option<Date>,
    pub duration: i32,
    pub location: Option<String>,
    pub time: Option<String>,
    pub category: Option<String>,
    pub organizer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Organizer,
    Activity,
    Attendee,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Organizer => Entity::belongs_to(organizer::Entity)
                .from(Column::OrganizerId)
                .to(organizer::Column::Id)
                .into(),
            Relation::Activity => Entity::has_many(activity::Entity).into(),
            Relation::Attendee => Entity::has_many(attendee::Entity).into(),
        }
    }
}

impl Related<organizer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Organizer.def() }
}

impl Related<activity::Entity> for Entity {
    fn to() -> RelationDef { Relation::Activity.def() }
}

impl Related<attendee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Attendee.def() }
}

impl ActiveModelBehavior for ActiveModel {}
