//! # dbcd — dbc daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Initialise the `SQLite` connection pool and run migrations
//! - Construct the repository implementation (adapter)
//! - Construct the application service, injecting the repository via its port trait
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), then close the pool
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use axum::Router;
use dbc_adapter_http_axum::state::AppState;
use dbc_adapter_storage_sqlite_sqlx::{Config as DbConfig, Database, SqlitePersonRepository};
use dbc_app::services::person_service::PersonService;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining requests");
}

/// Bind `addr` and serve `app` until a shutdown signal has drained it.
async fn serve(app: Router, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("dbcd listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Serve until shutdown, then close the pool whether or not serving succeeded.
async fn run(app: Router, db: &Database, addr: &str) -> std::io::Result<()> {
    let served = serve(app, addr).await;
    db.close().await;
    if let Err(err) = &served {
        tracing::error!(error = %err, "server stopped with an error");
    }
    served
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    // Database
    let db = DbConfig {
        database_url: config.database.url.clone(),
        max_connections: config.database.max_connections,
    }
    .build()
    .await?;

    // Repositories
    let person_repo = SqlitePersonRepository::new(db.pool().clone());

    // Services
    let person_service = PersonService::new(person_repo);

    // HTTP
    let state = AppState::new(person_service);
    let app = dbc_adapter_http_axum::router::build(state);

    run(app, &db, &config.bind_addr()).await?;

    Ok(())
}
