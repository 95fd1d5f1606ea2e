use anyhow::Context;
use std::time::Duration;

use crate::app::{app, with_http_layers};
use crate::auth::JwtService;
use crate::config::{AppConfig, DatabaseBackend};
use crate::database::{DatabaseManager, Repositories};
use crate::queue::{publisher_from_config, spawn_handicap_worker, HandicapQueue, RetryPolicy};
use crate::state::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    config.validate()?;

    let (repos, db) = match config.database.backend {
        DatabaseBackend::Postgres => {
            let db = DatabaseManager::connect(&config.database)
                .await
                .context("connecting to PostgreSQL")?;
            if config.database.run_migrations {
                db.migrate().await.context("running migrations")?;
            }
            (Repositories::postgres(db.pool().clone()), Some(db))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            (Repositories::in_memory(), None)
        }
    };

    let (queue, rx) = HandicapQueue::channel(config.queue.capacity);
    let publisher = publisher_from_config(&config.queue).await?;
    let worker = spawn_handicap_worker(rx, publisher, RetryPolicy::from(&config.queue));

    let jwt = JwtService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)?;
    let state = AppState::new(repos, queue, jwt, db.as_ref().map(|db| db.pool().clone()));
    let router = with_http_layers(app(state), &config);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Golf API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last queue sender; give the worker a moment to drain
    if tokio::time::timeout(Duration::from_secs(5), worker).await.is_err() {
        tracing::warn!("Handicap worker did not drain before shutdown");
    }
    if let Some(db) = db {
        db.close().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
