use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::planner::repo::memory::MemoryStore;
use service::planner::{ListPolicy, PlannerDaos, PlannerService};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Wire DAOs, auth and the planner service for the configured backend.
/// The postgres backend connects, pings and migrates before returning.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let (daos, auth_repo): (PlannerDaos, Arc<dyn AuthRepository>) = match cfg.database.backend {
        StorageBackend::Memory => {
            warn!("using seeded in-memory store; data is lost on exit");
            let store = Arc::new(MemoryStore::seeded());
            let auth_repo: Arc<dyn AuthRepository> = store.clone();
            (PlannerDaos::memory(store), auth_repo)
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            models::db::ping(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Database(format!("migrate up: {e}")))?;
            info!("database migrated");
            let auth_repo: Arc<dyn AuthRepository> = Arc::new(SeaOrmAuthRepository { db: db.clone() });
            (PlannerDaos::seaorm(db), auth_repo)
        }
    };

    let auth = AuthService::new(
        auth_repo,
        AuthConfig {
            jwt_secret: cfg.auth.jwt_secret.clone(),
            password_algorithm: "argon2".into(),
            token_ttl_hours: cfg.auth.token_ttl_hours,
        },
    );
    let planner = PlannerService::new(daos, ListPolicy::from_strict(cfg.planner.strict_lists));
    Ok(ServerState { planner, auth })
}

/// Router for an already-built state.
pub fn build_app(state: ServerState, frontend_dir: &str) -> Router {
    routes::build_router(state, build_cors(), frontend_dir)
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    common::utils::logging::init_logging(&cfg.server.log_format);
    common::env::ensure_env(&cfg.server.frontend_dir).await?;

    let state = build_state(&cfg).await?;
    let app = build_app(state, &cfg.server.frontend_dir);

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.database.backend, strict_lists = cfg.planner.strict_lists, "starting planner server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
