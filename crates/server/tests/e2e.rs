use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use configs::{AppConfig, StorageBackend};
use server::startup;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server(strict_lists: bool) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.database.backend = StorageBackend::Memory;
    cfg.auth.jwt_secret = "test-secret".into();
    cfg.planner.strict_lists = strict_lists;

    let state = startup::build_state(&cfg).await?;
    let app = startup::build_app(state, "frontend");
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("reqwest client")
}

/// Register and log in; returns the bearer token. The client keeps the cookie too.
async fn login(app: &TestApp, c: &reqwest::Client, email: &str) -> anyhow::Result<String> {
    let res = c
        .post(app.url("/auth/register"))
        .json(&json!({"name": "Tester", "email": email, "password": "S3curePass!"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c
        .post(app.url("/auth/login"))
        .json(&json!({"email": email, "password": "S3curePass!"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_api_requires_token() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = reqwest::Client::new();

    let res = c.get(app.url("/api/Event")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.get(app.url("/api/Event")).bearer_auth("not-a-jwt").send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_auth_errors() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();

    let res = c
        .post(app.url("/auth/register"))
        .json(&json!({"name": "Shorty", "email": "s@e.com", "password": "short"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    login(&app, &c, "dup@e.com").await?;
    let res = c
        .post(app.url("/auth/register"))
        .json(&json!({"name": "Again", "email": "dup@e.com", "password": "S3curePass!"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let res = c
        .post(app.url("/auth/login"))
        .json(&json!({"email": "dup@e.com", "password": "wrong-password"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_event_crud_flow() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();
    let token = login(&app, &c, "crud@e.com").await?;

    // Seeded list
    let res = c.get(app.url("/api/Event")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let events: Vec<Value> = res.json().await?;
    assert_eq!(events.len(), 5);
    assert_eq!(events[0]["name"], "Brendan's Party");

    // Bad ids
    for (path, status) in [
        ("/api/Event/abc", HttpStatusCode::BAD_REQUEST),
        ("/api/Event/0", HttpStatusCode::BAD_REQUEST),
        ("/api/Event/99", HttpStatusCode::NOT_FOUND),
    ] {
        let res = c.get(app.url(path)).bearer_auth(&token).send().await?;
        assert_eq!(res.status(), status, "{path}");
    }
    let res = c.get(app.url("/api/Event/0")).bearer_auth(&token).send().await?;
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Invalid id for this event");

    // Create
    let res = c
        .post(app.url("/api/Event"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "TEST EVENT",
            "date": "2021-07-21",
            "duration": 10,
            "location": "Maryland",
            "time": "3 PM EST",
            "category": "Work",
            "organizer_id": 1
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["id"].as_i64().unwrap_or_default();
    assert_eq!(id, 6);

    let res = c.get(app.url(&format!("/api/Event/{id}"))).bearer_auth(&token).send().await?;
    let got: Value = res.json().await?;
    assert_eq!(got["location"], "Maryland");
    assert_eq!(got["date"], "2021-07-21");

    // Edit without a name is rejected and changes nothing
    let res = c
        .put(app.url("/api/Event"))
        .bearer_auth(&token)
        .json(&json!({"id": id, "organizer_id": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // Full replace
    let res = c
        .put(app.url("/api/Event"))
        .bearer_auth(&token)
        .json(&json!({"id": id, "name": "Renamed", "duration": 15, "organizer_id": 2}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let got: Value = c.get(app.url(&format!("/api/Event/{id}"))).bearer_auth(&token).send().await?.json().await?;
    assert_eq!(got["name"], "Renamed");
    assert_eq!(got["location"], Value::Null);

    // Remove
    let res = c.delete(app.url(&format!("/api/Event/{id}"))).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(app.url(&format!("/api/Event/{id}"))).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_relations_and_lookups_with_cookie() -> anyhow::Result<()> {
    let app = start_server(false).await?;
    let c = client();
    // No bearer header below: the auth_token cookie from login is used
    login(&app, &c, "cookie@e.com").await?;

    let acts: Vec<Value> = c.get(app.url("/api/Event/1/activities")).send().await?.json().await?;
    assert_eq!(acts.len(), 5);
    let atts: Vec<Value> = c.get(app.url("/api/Event/2/attendees")).send().await?.json().await?;
    assert_eq!(atts.len(), 3);
    let org: Value = c.get(app.url("/api/Event/2/organizer")).send().await?.json().await?;
    assert_eq!(org["name"], "Steve");
    let owned: Vec<Value> = c.get(app.url("/api/Event/organizer/4")).send().await?.json().await?;
    assert_eq!(owned.len(), 2);

    let hit: Value = c.get(app.url("/api/Event/name/brendan's%20party")).send().await?.json().await?;
    assert_eq!(hit["id"], 1);
    let res = c.get(app.url("/api/Activity/name/Skydiving")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    // FK violation and missing body
    let res = c
        .post(app.url("/api/Activity"))
        .json(&json!({"name": "Diving", "duration": 30, "event_id": 404}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let res = c.post(app.url("/api/Attendee")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(app.url("/auth/logout")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn e2e_strict_lists_reject_empty_results() -> anyhow::Result<()> {
    let app = start_server(true).await?;
    let c = client();
    let token = login(&app, &c, "strict@e.com").await?;

    let res = c.get(app.url("/api/Event/3/attendees")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Empty List");

    let res = c.get(app.url("/api/Event/1/attendees")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}
