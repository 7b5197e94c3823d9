//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Create `dir` (and parents) if it does not exist yet.
pub async fn ensure_dir(dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(dir).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {dir}: {e}"))?;
    info!(%dir, "created directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ensure_dir;

    #[tokio::test]
    async fn ensure_dir_is_idempotent() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("yumyums-env-{}", std::process::id()));
        let dir = dir.to_string_lossy().to_string();
        ensure_dir(&dir).await?;
        ensure_dir(&dir).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        tokio::fs::remove_dir_all(&dir).await?;
        Ok(())
    }
}
