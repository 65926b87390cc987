//! HTTP server initialization and runtime setup.
//!
//! Handles storage backend selection, database connections, migrations, and
//! the Axum server lifecycle.

use crate::application::services::AuthService;
use crate::config::{Config, SeedIdentity, StorageBackend};
use crate::domain::repositories::{TokenRepository, UrlRepository, UserRepository};
use crate::infrastructure::persistence::{
    InMemoryIdentityRepository, InMemoryUrlRepository, PgTokenRepository, PgUrlRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Name under which the seed token is stored.
const SEED_TOKEN_NAME: &str = "seed";

/// Opens a PostgreSQL pool sized from `config` and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Builds the application state for the configured storage backend.
///
/// # Errors
///
/// Returns an error if the database is unreachable or seeding fails.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let (url_repository, token_repository): (Arc<dyn UrlRepository>, Arc<dyn TokenRepository>) =
        match config.storage_backend {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres storage backend")?;
                let pool = Arc::new(connect_database(config, database_url).await?);

                let urls: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(pool.clone()));
                let tokens: Arc<dyn TokenRepository> = Arc::new(PgTokenRepository::new(pool));
                (urls, tokens)
            }
            StorageBackend::Memory => {
                let identities = Arc::new(InMemoryIdentityRepository::new());

                if let Some(seed) = &config.seed_identity {
                    seed_identity(identities.clone(), seed, &config.token_signing_secret).await?;
                }

                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                let urls: Arc<dyn UrlRepository> = Arc::new(InMemoryUrlRepository::new());
                let tokens: Arc<dyn TokenRepository> = identities;
                (urls, tokens)
            }
        };

    Ok(AppState::new(
        url_repository,
        token_repository,
        &config.base_url,
        &config.token_signing_secret,
    ))
}

/// Registers the seed user and its raw token in the in-memory identity store.
///
/// # Errors
///
/// Returns an error if the user or token cannot be stored.
pub async fn seed_identity(
    identities: Arc<InMemoryIdentityRepository>,
    seed: &SeedIdentity,
    signing_secret: &str,
) -> Result<()> {
    let user = identities
        .create(&seed.email)
        .await
        .context("Failed to create seed user")?;

    let auth = AuthService::new(identities, signing_secret.to_string());
    auth.register_token(user.id, SEED_TOKEN_NAME, &seed.token)
        .await
        .context("Failed to register seed token")?;

    tracing::info!(user_id = user.id, email = %user.email, "Seed identity registered");
    Ok(())
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool with migrations, or in-memory maps)
/// - Application services
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves once `signal` fires. A handler that failed to install never
/// resolves, so it cannot trigger a shutdown.
async fn wait_for_signal<E: std::fmt::Display>(
    signal: impl Future<Output = Result<(), E>>,
    name: &str,
) {
    if let Err(e) = signal.await {
        tracing::error!(error = %e, signal = name, "Failed to install signal handler");
        std::future::pending::<()>().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = wait_for_signal(tokio::signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
