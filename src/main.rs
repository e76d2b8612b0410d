mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;


use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{default_webview_data_dir, AppConfig};

pub fn table_container_style() -> &'static str {
    "max-height: 70vh; overflow: auto; border: 1px solid #e5e7eb; border-radius: 8px; background: #fff;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 2; background: #16a34a; color: #fff; padding: 10px 12px; text-align: left; white-space: nowrap;"
}

/// `RUST_LOG` wins over the configured filter.
fn log_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
}

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.log_filter))
        .with_target(false)
        .try_init()
    {
        eprintln!("logging already initialised: {err}");
    }
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "configuration rejected, falling back to defaults");
    }
    tracing::info!(api = %config.api_base_url, page_size = config.page_size, "starting");

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title("Importation des financements"),
                )
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(App);
}
