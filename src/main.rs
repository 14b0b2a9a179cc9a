mod auth;
mod catalog;
mod config;
mod db;
mod game;
mod models;
mod routes;
mod session;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use catalog::{MemoryCatalog, PgCatalog, SquareCatalog};
use config::Config;
use game::{BoardLayout, GameManager, SQUARES_PER_LINE, SQUARE_COUNT};
use session::SessionBackend;
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often idle in-memory sessions are swept
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub db: PgPool,
    pub catalog: Arc<dyn SquareCatalog>,
    pub sessions: SessionBackend,
    pub manager: GameManager,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bingo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting bingo backend server...");

    // Grid geometry is fixed at build time, a bad value must stop the server here
    let layout = BoardLayout::with_count(SQUARE_COUNT, SQUARES_PER_LINE)?;
    tracing::info!(
        "Board layout: {}x{} ({} squares)",
        layout.side(),
        layout.side(),
        layout.square_count()
    );

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Connect to database
    let db = db::create_pool(config.database_url(), config.database.max_connections).await?;
    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Database migrations completed");

    // Load square catalog
    let catalog: Arc<dyn SquareCatalog> = match &config.game.squares_path {
        Some(path) => Arc::new(MemoryCatalog::load(path).await?),
        None => Arc::new(PgCatalog::new(db.clone())),
    };
    let available = catalog.count().await?;
    if available < layout.square_count() {
        anyhow::bail!(
            "Square catalog has {} squares, a board needs {}",
            available,
            layout.square_count()
        );
    }
    tracing::info!("Square catalog ready with {} squares", available);

    let sessions = SessionBackend::new(config.game.session_store, db.clone());
    tracing::info!("Using {:?} session store", config.game.session_store);

    // Create application state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        catalog,
        sessions,
        manager: GameManager::new(layout),
    });

    // Spawn background task to drop idle in-memory games
    if matches!(state.sessions, SessionBackend::Memory(_)) {
        let cleanup_state = state.clone();
        tokio::spawn(async move {
            session_cleanup_task(cleanup_state).await;
        });
    }

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Game frontend: {}", config.server.frontend_url);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that periodically removes games idle past the configured TTL
async fn session_cleanup_task(state: Arc<AppState>) {
    let SessionBackend::Memory(store) = &state.sessions else {
        return;
    };
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);

    loop {
        interval.tick().await;

        let removed = store.evict_idle(state.config.game.session_idle_ttl);
        if removed > 0 {
            tracing::info!(
                "Removed {} idle games ({} remaining)",
                removed,
                store.len()
            );
        }
    }
}
