use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 150;
pub const DEFAULT_LOG_FILTER: &str = "info";

pub(crate) const ENV_API_URL: &str = "FIN_IMPORT_API_URL";
pub(crate) const ENV_PAGE_SIZE: &str = "FIN_IMPORT_PAGE_SIZE";
pub(crate) const ENV_LOG: &str = "FIN_IMPORT_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub progress_interval_ms: u64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Ok(path) if path.is_file() => Self::from_file(&path)?,
            Ok(_) => Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "config directory unavailable, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE).and_then(|v| v.trim().parse::<usize>().ok()) {
            self.page_size = size;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        if self.progress_interval_ms == 0 {
            anyhow::bail!("progress_interval_ms must be at least 1");
        }
        reqwest::Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api_base_url: {}", self.api_base_url))?;
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "fin-import")
        .ok_or_else(|| anyhow!("unable to resolve app directories"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

pub fn default_preview_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.cache_dir().join("previews"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
