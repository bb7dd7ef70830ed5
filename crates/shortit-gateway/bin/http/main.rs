mod cli;

use crate::cli::{Cli, LogFormat, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use shortit_core::{Repository, Shortener};
use shortit_gateway::{App, AppState};
use shortit_generator::{EncoderSettings, HashEncoder};
use shortit_shortener::{ShortenerService, ShortenerSettings};
use shortit_storage::{CachedRepository, InMemoryRepository, SqliteRepository, SqliteSettings};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting shortit gateway"
    );

    let encoder = HashEncoder::new(
        EncoderSettings::builder()
            .length(config.code_length)
            .alphabet(config.alphabet.clone())
            .build(),
    )
    .context("invalid encoder settings")?;

    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .storage_timeout(Duration::from_millis(config.storage_timeout_ms))
        .build();

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    match config.storage {
        StorageBackendArg::InMemory => {
            let shortener = build_shortener(
                InMemoryRepository::new(),
                encoder,
                settings,
                config.cache_capacity,
            );
            serve(listener, shortener).await?;
        }
        StorageBackendArg::Sqlite => {
            let sqlite = SqliteSettings::builder()
                .path(config.sqlite_path.clone())
                .build();
            let repository = SqliteRepository::connect(&sqlite)
                .await
                .with_context(|| format!("failed to open {}", config.sqlite_path.display()))?;

            let shortener =
                build_shortener(repository.clone(), encoder, settings, config.cache_capacity);
            serve(listener, shortener).await?;

            repository.close().await;
        }
    }

    info!("gateway stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn build_shortener<R: Repository>(
    repository: R,
    encoder: HashEncoder,
    settings: ShortenerSettings,
    cache_capacity: u64,
) -> Arc<dyn Shortener> {
    if cache_capacity == 0 {
        return Arc::new(ShortenerService::with_settings(repository, encoder, settings));
    }

    let cached = CachedRepository::with_capacity(repository, cache_capacity);
    Arc::new(ShortenerService::with_settings(cached, encoder, settings))
}

async fn serve(listener: TcpListener, shortener: Arc<dyn Shortener>) -> anyhow::Result<()> {
    let router = App::router(AppState::new(shortener));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
