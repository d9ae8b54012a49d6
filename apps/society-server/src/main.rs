//! Society Hub HTTP server

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use sea_orm::{ConnectOptions, Database};
use society_service::domain::TracingEventPublisher;
use society_service::infra::FsBlobStore;
use society_service::SocietyServiceModule;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LogFormat, LoggingConfig};

#[derive(Parser)]
#[command(name = "society-server")]
#[command(about = "Society Hub HTTP server")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run database migrations and exit
    #[arg(long)]
    migrate_only: bool,

    /// Override `server.bind_addr`
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("load configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    init_tracing(&config.logging);
    tracing::info!("Starting Society Hub server");

    // Connect to the database
    let mut options = ConnectOptions::new(config.database.url.clone());
    options
        .max_connections(config.database.max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .with_context(|| format!("connect to database {}", redact(&config.database.url)))?;
    tracing::info!("Connected to database");

    let module = SocietyServiceModule::new(config.society_service.clone());
    module.migrate(&db).await.context("run migrations")?;
    if cli.migrate_only {
        tracing::info!("Migrations complete, exiting");
        return Ok(());
    }

    let blobs = Arc::new(FsBlobStore::new(&config.storage.documents_dir));
    module
        .init(Arc::new(db), blobs, Arc::new(TracingEventPublisher))
        .context("initialize society service")?;

    let app = module
        .register_rest(Router::new())?
        .layer(TimeoutLayer::new(config.server.request_timeout))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("bind to {}", config.server.bind_addr))?;
    tracing::info!("Society Hub listening on http://{}", config.server.bind_addr);

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            anyhow::anyhow!("HTTP server error: {}", e)
        })?;

    tracing::info!("HTTP server shut down");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn cancel_on_signal(cancel: CancellationToken) {
    wait_for_shutdown_signal().await;
    tracing::info!("Shutdown signal received");
    cancel.cancel();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Strip credentials from a connection URL before logging it
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
