use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::{activity, attendee, db, event, organizer, organizer_credentials, organizer_role};

async fn setup() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

async fn new_organizer(db: &DatabaseConnection, name: &str) -> Result<organizer::Model> {
    let email = format!("{}_{}@example.com", name.to_lowercase(), chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let am = organizer::ActiveModel { name: Set(name.to_string()), email: Set(email), ..Default::default() };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn organizer_event_activity_roundtrip() -> Result<()> {
    let Some(db) = setup().await else { return Ok(()) };

    let org = new_organizer(&db, "Jimmy").await?;
    assert!(org.id > 0);

    let ev = event::ActiveModel {
        name: Set("Brendan's Party".into()),
        date: Set(chrono::NaiveDate::from_ymd_opt(2021, 6, 28)),
        duration: Set(60),
        location: Set(Some("Maryland".into())),
        time: Set(Some("3 PM EST".into())),
        category: Set(Some("Party".into())),
        organizer_id: Set(org.id),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let act = activity::ActiveModel { name: Set("Bowling".into()), duration: Set(50), event_id: Set(ev.id), ..Default::default() }
        .insert(&db)
        .await?;
    let att = attendee::ActiveModel { name: Set("John".into()), email: Set(None), event_id: Set(ev.id), ..Default::default() }
        .insert(&db)
        .await?;

    let found = event::Entity::find_by_id(ev.id).one(&db).await?.expect("event present");
    assert_eq!(found, ev);

    let acts = activity::Entity::find().filter(activity::Column::EventId.eq(ev.id)).all(&db).await?;
    assert_eq!(acts, vec![act]);

    // Cascade: organizer -> event -> activity/attendee
    organizer::Entity::delete_by_id(org.id).exec(&db).await?;
    assert!(event::Entity::find_by_id(ev.id).one(&db).await?.is_none());
    assert!(attendee::Entity::find_by_id(att.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn dangling_event_reference_is_rejected() -> Result<()> {
    let Some(db) = setup().await else { return Ok(()) };

    let res = activity::ActiveModel { name: Set("Orphan".into()), duration: Set(5), event_id: Set(i32::MAX), ..Default::default() }
        .insert(&db)
        .await;
    let err = res.expect_err("fk violation");
    assert!(matches!(err.sql_err(), Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_))));
    Ok(())
}

#[tokio::test]
async fn roles_and_credentials_follow_organizer() -> Result<()> {
    let Some(db) = setup().await else { return Ok(()) };

    let org = new_organizer(&db, "Steve").await?;
    organizer_role::ActiveModel { organizer_id: Set(org.id), role: Set("admin".into()) }.insert(&db).await?;
    let cred = organizer_credentials::upsert_password(&db, org.id, "hash-1".into(), "argon2").await?;
    let cred2 = organizer_credentials::upsert_password(&db, org.id, "hash-2".into(), "argon2").await?;
    assert_eq!(cred.organizer_id, cred2.organizer_id);
    assert_eq!(cred2.password_hash, "hash-2");

    organizer::Entity::delete_by_id(org.id).exec(&db).await?;
    assert!(organizer_credentials::Entity::find_by_id(org.id).one(&db).await?.is_none());
    let roles = organizer_role::Entity::find().filter(organizer_role::Column::OrganizerId.eq(org.id)).all(&db).await?;
    assert!(roles.is_empty());
    Ok(())
}
