use anyhow::{anyhow, Result};

/// Runs CPU-bound work (workbook parsing) on tokio's blocking pool.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| anyhow!("blocking task failed: {err}"))
}
