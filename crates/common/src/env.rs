//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the router is built.

use tracing::{info, warn};

/// Warn when the static frontend directory is missing; the API still works.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<bool> {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => {
            info!(%frontend_dir, "serving frontend assets");
            Ok(true)
        }
        Ok(_) => Err(anyhow::anyhow!("{frontend_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%frontend_dir, "frontend assets directory not found; pages will 404");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ensure_env;

    #[tokio::test]
    async fn missing_dir_is_not_fatal() {
        let path = format!("target/no-such-frontend-{}", uuid::Uuid::new_v4());
        assert!(!ensure_env(&path).await.unwrap());
    }

    #[tokio::test]
    async fn file_instead_of_dir_is_an_error() {
        assert!(ensure_env("Cargo.toml").await.is_err());
    }
}
