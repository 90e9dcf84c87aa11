//! Tourbook API server
//!
//! Loads configuration, picks a storage backend, and serves the REST API
//! until Ctrl+C or SIGTERM.
//!
//! # Usage
//!
//! ```bash
//! # In-memory store, development signing key
//! cargo run
//!
//! # PostgreSQL with migrations
//! TOURBOOK__DATABASE__URL=postgres://localhost/tourbook \
//! TOURBOOK__DATABASE__RUN_MIGRATIONS=true \
//! cargo run
//! ```

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tourbook::adapters::http::{api_router, AppState, Ports};
use tourbook::adapters::{InMemoryStore, JwtConfig, JwtSessionValidator};
use tourbook::application::{ExpirySweeper, ExpirySweeperConfig};
use tourbook::config::{AppConfig, DatabaseConfig, ServerConfig};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        validity_days = config.quotes.validity_days,
        "Starting Tourbook API"
    );

    let ports = match config.database.url() {
        Some(url) => Ports::postgres(connect(url, &config.database).await?),
        None => {
            warn!("No database URL configured, using the in-memory store");
            Ports::in_memory(Arc::new(InMemoryStore::new()))
        }
    };

    if config.auth.uses_development_secret() {
        warn!("No JWT secret configured, using the development signing key");
    }
    let validator = Arc::new(JwtSessionValidator::new(JwtConfig::new(
        config.auth.secret_or_development(),
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
    )));

    let state = AppState::new(
        ports,
        config.quotes.expiry_policy(),
        config.quotes.reference_prefix.clone(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = config.quotes.sweep_interval().map(|interval| {
        let sweeper = ExpirySweeper::new(
            state.quote_access.clone(),
            ExpirySweeperConfig::default().with_interval(interval),
        );
        tokio::spawn(async move { sweeper.run(shutdown_rx).await })
    });

    let app = with_http_layers(api_router(state, validator), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped, stopping background tasks");
    let _ = shutdown_tx.send(true);
    if let Some(handle) = sweeper {
        if let Err(e) = handle.await {
            error!(error = %e, "Expiry sweeper task failed");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect(url: &str, database: &DatabaseConfig) -> Result<sqlx::PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .max_lifetime(database.max_lifetime())
        .connect(url)
        .await?;
    info!(max_connections = database.max_connections, "Connected to PostgreSQL");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    Ok(pool)
}

fn with_http_layers(router: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new().allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal"),
        () = terminate => info!("Received SIGTERM signal"),
    }
}
