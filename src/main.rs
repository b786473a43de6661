//! Serene Journal Backend
//!
//! Serves the journal's posts and gallery photos from a SQLite-backed key-value store,
//! with content rendering and assisted drafting for the admin editor.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod models;
mod render;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{KeyValueStore, MemoryStore, Repository, SqliteStore};
use generation::{ContentGenerator, GeminiGenerator};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub generator: Arc<dyn ContentGenerator>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Serene Journal Backend");
    if config.ephemeral {
        tracing::warn!("Ephemeral mode (SERENE_EPHEMERAL): data is kept in memory only");
    } else {
        tracing::info!("Database path: {:?}", config.db_path);
    }
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (SERENE_API_PSK). Admin routes are open!");
    }
    if config.generation_api_key.is_none() {
        tracing::warn!("API key not found (GEMINI_API_KEY / API_KEY). Draft generation will fail.");
    }

    // Initialize storage and seed empty collections
    let store: Arc<dyn KeyValueStore> = if config.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let pool = db::init_database(&config.db_path).await?;
        Arc::new(SqliteStore::new(pool))
    };
    let repo = Arc::new(Repository::new(store));
    repo.initialize().await?;

    let generator: Arc<dyn ContentGenerator> = Arc::new(GeminiGenerator::from_config(&config));

    let state = AppState {
        repo,
        generator,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();

    // Journal, article and gallery views
    let public_routes = Router::new()
        .route("/posts", get(api::list_posts))
        .route("/posts/{id}", get(api::get_post))
        .route("/posts/{id}/blocks", get(api::get_post_blocks))
        .route("/categories", get(api::list_categories))
        .route("/photos", get(api::list_photos));

    // Admin panel
    let admin_routes = Router::new()
        .route("/posts", post(api::create_post))
        .route("/posts/{id}", put(api::save_post).delete(api::delete_post))
        .route("/photos", post(api::upload_photo))
        .route("/preview", post(api::preview_draft))
        .route("/generate", post(api::generate_draft))
        .route_layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(psk.clone(), req, next)
        }));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
