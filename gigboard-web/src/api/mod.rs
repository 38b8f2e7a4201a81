//! HTTP API handlers for gigboard-web

pub mod artists;
pub mod health;
pub mod shows;
pub mod ui;
pub mod venues;

pub use artists::{create_artist, get_artist, list_artists, search_artists, update_artist};
pub use health::health_routes;
pub use shows::{create_show, list_shows};
pub use ui::serve_index;
pub use venues::{create_venue, delete_venue, get_venue, list_venues, search_venues, update_venue};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use gigboard_common::Error;

/// HTTP-facing error wrapper for the common error taxonomy.
///
/// Not-found maps to 404, input validation to 400, everything touching
/// persistence or internals to 500. Bodies are `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
