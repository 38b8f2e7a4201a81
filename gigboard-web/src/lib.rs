//! gigboard-web library - HTTP service for venue/artist/show listings

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers.
///
/// All state lives in the database; handlers keep nothing between
/// requests beyond this pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/api/venues", get(api::list_venues).post(api::create_venue))
        .route("/api/venues/search", get(api::search_venues))
        .route(
            "/api/venues/:id",
            get(api::get_venue).put(api::update_venue).delete(api::delete_venue),
        )
        .route("/api/artists", get(api::list_artists).post(api::create_artist))
        .route("/api/artists/search", get(api::search_artists))
        .route("/api/artists/:id", get(api::get_artist).put(api::update_artist))
        .route("/api/shows", get(api::list_shows).post(api::create_show))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
