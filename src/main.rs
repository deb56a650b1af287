//! Cuentas ledger service.
//!
//! REST API behind a small-business finance dashboard: accounts (cash, bank,
//! card, wallet), a two-level income/expense category tree, and an
//! append-only ledger of incomes, expenses and transfers that can only be
//! voided, never edited.
//!
//! # Architecture
//!
//! - **HTTP**: axum, routes in [`routes`]
//! - **Store**: PostgreSQL via sqlx, reached only through [`store::LedgerStore`]
//! - **Authentication**: bearer API key, SHA-256 hashed, resolved to a profile and role
//!
//! # Startup
//!
//! Configuration, connection pool and migrations must all succeed before
//! the listener is bound; any failure aborts with the error from `main`.

mod config;
mod db;
mod error;
mod extract;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod store;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{routes::AppState, store::postgres::PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity, "info" when unset
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;

    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    db::run_migrations(&pool).await?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "store ready, migrations applied"
    );

    let app = routes::router(AppState {
        store: Arc::new(PgStore::new(pool)),
        movement_list_limit: config.movement_list_limit,
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server_port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "ledger service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
