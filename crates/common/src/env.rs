//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_data_dir() -> anyhow::Result<()> {
        let base = std::env::temp_dir().join(format!("playfolio_env_{}", std::process::id()));
        let data = base.join("data");
        let data_str = data.to_string_lossy().to_string();
        let missing_frontend = base.join("frontend").to_string_lossy().to_string();

        ensure_env(&missing_frontend, &data_str).await?;
        assert!(tokio::fs::metadata(&data).await?.is_dir());

        let _ = tokio::fs::remove_dir_all(&base).await;
        Ok(())
    }
}
