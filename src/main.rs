mod app;
mod cache;
mod catalog;
mod config;
mod events;
mod services;
mod track;
mod ui;

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{app::App, cache::Cache, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("moodwave=info"));
    // Write logs to file so they don't interleave with the prompt
    let log_file = std::fs::File::create("/tmp/moodwave.log").ok();
    if let Some(file) = log_file {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {e}");
            eprintln!("\x1b[31mmoodwave can't start:\x1b[0m {e}");
            std::process::exit(2);
        }
    };
    info!(
        "Starting with cursor policy {} and {:?} timeout",
        config.cursor_policy, config.request_timeout
    );

    // ── Try Redis (optional — app works without it) ──────────────────────────
    let cache = match config.redis_url.as_deref() {
        Some(url) => match Cache::new(url) {
            Ok(c) if c.ping().await => {
                info!("Redis connected at {url}");
                Some(Arc::new(c))
            }
            Ok(_) => {
                warn!("Redis not reachable at {url}, search caching disabled");
                None
            }
            Err(e) => {
                warn!("Invalid REDIS_URL ({e}), search caching disabled");
                None
            }
        },
        None => None,
    };

    // ── Run the app ──────────────────────────────────────────────────────────
    let app = App::from_config(&config, cache)?;
    if let Err(e) = app.run().await {
        error!("App error: {e:?}");
        eprintln!("\n\x1b[31mmoodwave crashed:\x1b[0m {e}");
        eprintln!("Check /tmp/moodwave.log for details");
    }

    Ok(())
}
