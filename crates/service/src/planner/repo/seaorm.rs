use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use crate::errors::{EntityKind, PlannerError};
use crate::planner::domain::{
    Activity, Attendee, Event, NewActivity, NewAttendee, NewEvent, NewOrganizer, Organizer,
};
use crate::planner::repository::{ActivityDao, AttendeeDao, EventDao, OrganizerDao};
use models::validate::name_key;
use models::{activity, attendee, event, organizer, organizer_role};

pub struct SeaOrmEventDao {
    pub db: DatabaseConnection,
}

pub struct SeaOrmActivityDao {
    pub db: DatabaseConnection,
}

pub struct SeaOrmAttendeeDao {
    pub db: DatabaseConnection,
}

pub struct SeaOrmOrganizerDao {
    pub db: DatabaseConnection,
}

fn to_event(m: event::Model) -> Event {
    Event {
        id: m.id,
        name: m.name,
        date: m.date,
        duration: m.duration,
        location: m.location,
        time: m.time,
        category: m.category,
        organizer_id: m.organizer_id,
    }
}

fn to_activity(m: activity::Model) -> Activity {
    Activity { id: m.id, name: m.name, duration: m.duration, event_id: m.event_id }
}

fn to_attendee(m: attendee::Model) -> Attendee {
    Attendee { id: m.id, name: m.name, email: m.email, event_id: m.event_id }
}

/// `RecordNotUpdated` means the id matched no row.
fn update_err(kind: EntityKind, id: i32) -> impl FnOnce(DbErr) -> PlannerError {
    move |e| match e {
        DbErr::RecordNotUpdated => PlannerError::missing_id(kind, id),
        other => other.into(),
    }
}

fn first_by_name<T>(rows: Vec<T>, name: &str, name_of: impl Fn(&T) -> &str) -> Option<T> {
    let key = name_key(name);
    rows.into_iter().find(|row| name_key(name_of(row)) == key)
}

async fn roles_by_organizer<C: ConnectionTrait>(
    db: &C,
    organizer_ids: Option<&[i32]>,
) -> Result<HashMap<i32, Vec<String>>, PlannerError> {
    let mut query = organizer_role::Entity::find()
        .order_by_asc(organizer_role::Column::OrganizerId)
        .order_by_asc(organizer_role::Column::Role);
    if let Some(ids) = organizer_ids {
        query = query.filter(organizer_role::Column::OrganizerId.is_in(ids.iter().copied()));
    }
    let mut map: HashMap<i32, Vec<String>> = HashMap::new();
    for row in query.all(db).await? {
        map.entry(row.organizer_id).or_default().push(row.role);
    }
    Ok(map)
}

async fn load_organizer<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Organizer>, PlannerError> {
    let Some(m) = organizer::Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut roles = roles_by_organizer(db, Some(&[id][..])).await?;
    Ok(Some(Organizer { id: m.id, name: m.name, email: m.email, roles: roles.remove(&id).unwrap_or_default() }))
}

async fn replace_roles<C: ConnectionTrait>(db: &C, organizer_id: i32, roles: &[String]) -> Result<(), PlannerError> {
    organizer_role::Entity::delete_many()
        .filter(organizer_role::Column::OrganizerId.eq(organizer_id))
        .exec(db)
        .await?;
    for role in roles {
        organizer_role::ActiveModel { organizer_id: Set(organizer_id), role: Set(role.clone()) }
            .insert(db)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl EventDao for SeaOrmEventDao {
    async fn add_event(&self, e: NewEvent) -> Result<i32, PlannerError> {
        let created = event::ActiveModel {
            name: Set(e.name),
            date: Set(e.date),
            duration: Set(e.duration),
            location: Set(e.location),
            time: Set(e.time),
            category: Set(e.category),
            organizer_id: Set(e.organizer_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(created.id)
    }

    async fn get_event_by_id(&self, id: i32) -> Result<Option<Event>, PlannerError> {
        Ok(event::Entity::find_by_id(id).one(&self.db).await?.map(to_event))
    }

    async fn get_event_by_name(&self, name: &str) -> Result<Option<Event>, PlannerError> {
        let rows = self.get_all_events().await?;
        Ok(first_by_name(rows, name, |e| e.name.as_str()))
    }

    async fn get_all_events(&self) -> Result<Vec<Event>, PlannerError> {
        let rows = event::Entity::find().order_by_asc(event::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(to_event).collect())
    }

    async fn edit_event(&self, e: Event) -> Result<(), PlannerError> {
        let id = e.id;
        event::ActiveModel {
            id: Set(e.id),
            name: Set(e.name),
            date: Set(e.date),
            duration: Set(e.duration),
            location: Set(e.location),
            time: Set(e.time),
            category: Set(e.category),
            organizer_id: Set(e.organizer_id),
        }
        .update(&self.db)
        .await
        .map_err(update_err(EntityKind::Event, id))?;
        Ok(())
    }

    async fn remove_event(&self, id: i32) -> Result<(), PlannerError> {
        let res = event::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(PlannerError::missing_id(EntityKind::Event, id));
        }
        Ok(())
    }

    async fn get_events_by_organizer(&self, organizer_id: i32) -> Result<Vec<Event>, PlannerError> {
        let rows = event::Entity::find()
            .filter(event::Column::OrganizerId.eq(organizer_id))
            .order_by_asc(event::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_event).collect())
    }

    async fn get_event_activities(&self, event_id: i32) -> Result<Vec<Activity>, PlannerError> {
        let rows = activity::Entity::find()
            .filter(activity::Column::EventId.eq(event_id))
            .order_by_asc(activity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_activity).collect())
    }

    async fn get_event_attendees(&self, event_id: i32) -> Result<Vec<Attendee>, PlannerError> {
        let rows = attendee::Entity::find()
            .filter(attendee::Column::EventId.eq(event_id))
            .order_by_asc(attendee::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_attendee).collect())
    }

    async fn get_event_organizer(&self, event_id: i32) -> Result<Option<Organizer>, PlannerError> {
        let Some(ev) = event::Entity::find_by_id(event_id).one(&self.db).await? else { return Ok(None) };
        load_organizer(&self.db, ev.organizer_id).await
    }
}

#[async_trait]
impl ActivityDao for SeaOrmActivityDao {
    async fn add_activity(&self, a: NewActivity) -> Result<i32, PlannerError> {
        let created = activity::ActiveModel {
            name: Set(a.name),
            duration: Set(a.duration),
            event_id: Set(a.event_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(created.id)
    }

    async fn get_activity_by_id(&self, id: i32) -> Result<Option<Activity>, PlannerError> {
        Ok(activity::Entity::find_by_id(id).one(&self.db).await?.map(to_activity))
    }

    async fn get_activity_by_name(&self, name: &str) -> Result<Option<Activity>, PlannerError> {
        let rows = self.get_all_activities().await?;
        Ok(first_by_name(rows, name, |a| a.name.as_str()))
    }

    async fn get_all_activities(&self) -> Result<Vec<Activity>, PlannerError> {
        let rows = activity::Entity::find().order_by_asc(activity::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(to_activity).collect())
    }

    async fn edit_activity(&self, a: Activity) -> Result<(), PlannerError> {
        let id = a.id;
        activity::ActiveModel { id: Set(a.id), name: Set(a.name), duration: Set(a.duration), event_id: Set(a.event_id) }
            .update(&self.db)
            .await
            .map_err(update_err(EntityKind::Activity, id))?;
        Ok(())
    }

    async fn remove_activity(&self, id: i32) -> Result<(), PlannerError> {
        let res = activity::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(PlannerError::missing_id(EntityKind::Activity, id));
        }
        Ok(())
    }
}

#[async_trait]
impl AttendeeDao for SeaOrmAttendeeDao {
    async fn add_attendee(&self, a: NewAttendee) -> Result<i32, PlannerError> {
        let created = attendee::ActiveModel {
            name: Set(a.name),
            email: Set(a.email),
            event_id: Set(a.event_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(created.id)
    }

    async fn get_attendee_by_id(&self, id: i32) -> Result<Option<Attendee>, PlannerError> {
        Ok(attendee::Entity::find_by_id(id).one(&self.db).await?.map(to_attendee))
    }

    async fn get_attendee_by_name(&self, name: &str) -> Result<Option<Attendee>, PlannerError> {
        let rows = self.get_all_attendees().await?;
        Ok(first_by_name(rows, name, |a| a.name.as_str()))
    }

    async fn get_all_attendees(&self) -> Result<Vec<Attendee>, PlannerError> {
        let rows = attendee::Entity::find().order_by_asc(attendee::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(to_attendee).collect())
    }

    async fn edit_attendee(&self, a: Attendee) -> Result<(), PlannerError> {
        let id = a.id;
        attendee::ActiveModel { id: Set(a.id), name: Set(a.name), email: Set(a.email), event_id: Set(a.event_id) }
            .update(&self.db)
            .await
            .map_err(update_err(EntityKind::Attendee, id))?;
        Ok(())
    }

    async fn remove_attendee(&self, id: i32) -> Result<(), PlannerError> {
        let res = attendee::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(PlannerError::missing_id(EntityKind::Attendee, id));
        }
        Ok(())
    }
}

#[async_trait]
impl OrganizerDao for SeaOrmOrganizerDao {
    async fn add_organizer(&self, o: NewOrganizer) -> Result<i32, PlannerError> {
        let txn = self.db.begin().await?;
        let created = organizer::ActiveModel { name: Set(o.name), email: Set(o.email), ..Default::default() }
            .insert(&txn)
            .await?;
        replace_roles(&txn, created.id, &o.roles).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn get_organizer_by_id(&self, id: i32) -> Result<Option<Organizer>, PlannerError> {
        load_organizer(&self.db, id).await
    }

    async fn get_organizer_by_name(&self, name: &str) -> Result<Option<Organizer>, PlannerError> {
        let rows = organizer::Entity::find().order_by_asc(organizer::Column::Id).all(&self.db).await?;
        match first_by_name(rows, name, |o| o.name.as_str()) {
            Some(m) => load_organizer(&self.db, m.id).await,
            None => Ok(None),
        }
    }

    async fn get_all_organizers(&self) -> Result<Vec<Organizer>, PlannerError> {
        let rows = organizer::Entity::find().order_by_asc(organizer::Column::Id).all(&self.db).await?;
        let mut roles = roles_by_organizer(&self.db, None).await?;
        Ok(rows
            .into_iter()
            .map(|m| Organizer { roles: roles.remove(&m.id).unwrap_or_default(), id: m.id, name: m.name, email: m.email })
            .collect())
    }

    async fn edit_organizer(&self, o: Organizer) -> Result<(), PlannerError> {
        let id = o.id;
        let txn = self.db.begin().await?;
        organizer::ActiveModel { id: Set(o.id), name: Set(o.name), email: Set(o.email) }
            .update(&txn)
            .await
            .map_err(update_err(EntityKind::Organizer, id))?;
        replace_roles(&txn, id, &o.roles).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn remove_organizer(&self, id: i32) -> Result<(), PlannerError> {
        let res = organizer::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(PlannerError::missing_id(EntityKind::Organizer, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::repository::PlannerDaos;
    use crate::test_support::get_db;

    fn unique(prefix: &str) -> String {
        format!("{prefix}-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    #[tokio::test]
    async fn crud_round_trip_against_postgres() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let daos = PlannerDaos::seaorm(db);

        let email = format!("{}@example.com", unique("jimmy"));
        let org_id = daos
            .organizers
            .add_organizer(NewOrganizer { name: "Jimmy".into(), email: email.clone(), roles: vec!["host".into()] })
            .await?;
        let org = daos.organizers.get_organizer_by_id(org_id).await?.expect("organizer stored");
        assert_eq!(org.roles, vec!["host".to_string()]);

        let name = unique("Brendan's Party");
        let new_event = NewEvent {
            name: name.clone(),
            date: chrono::NaiveDate::from_ymd_opt(2021, 6, 28),
            duration: 60,
            location: Some("Maryland".into()),
            time: Some("3 PM EST".into()),
            category: None,
            organizer_id: org_id,
        };
        let ev_id = daos.events.add_event(new_event.clone()).await?;
        assert_eq!(daos.events.get_event_by_id(ev_id).await?, Some(new_event.clone().with_id(ev_id)));
        assert_eq!(daos.events.get_event_by_name(&name.to_uppercase()).await?.map(|e| e.id), Some(ev_id));
        assert_eq!(daos.events.get_events_by_organizer(org_id).await?.len(), 1);

        let mut edited = new_event.with_id(ev_id);
        edited.location = None;
        daos.events.edit_event(edited.clone()).await?;
        assert_eq!(daos.events.get_event_by_id(ev_id).await?, Some(edited));

        daos.activities.add_activity(NewActivity { name: "Bowling".into(), duration: 50, event_id: ev_id }).await?;
        assert_eq!(daos.events.get_event_activities(ev_id).await?.len(), 1);
        assert_eq!(daos.events.get_event_organizer(ev_id).await?.map(|o| o.id), Some(org_id));

        daos.organizers.remove_organizer(org_id).await?;
        assert!(daos.events.get_event_by_id(ev_id).await?.is_none());
        assert!(daos.events.get_event_activities(ev_id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn constraint_and_not_found_mapping() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let daos = PlannerDaos::seaorm(db);

        let err = daos
            .activities
            .add_activity(NewActivity { name: "Orphan".into(), duration: 5, event_id: i32::MAX })
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Constraint(_)));

        let ghost = Attendee { id: i32::MAX, name: "Ghost".into(), email: None, event_id: 1 };
        assert!(matches!(daos.attendees.edit_attendee(ghost).await, Err(PlannerError::NotFound { .. })));
        assert!(matches!(daos.activities.remove_activity(i32::MAX).await, Err(PlannerError::NotFound { .. })));

        let email = format!("{}@example.com", unique("dup"));
        let new = NewOrganizer { name: "Dup".into(), email, roles: vec![] };
        daos.organizers.add_organizer(new.clone()).await?;
        assert!(matches!(daos.organizers.add_organizer(new).await, Err(PlannerError::Constraint(_))));
        Ok(())
    }
}
