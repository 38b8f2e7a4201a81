//! Show handlers: flat listing and creation.
//!
//! Shows are create-only association records; there is no edit or delete
//! path.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use gigboard_common::db::models::{Show, ShowInput};
use gigboard_common::db::store;

use super::ApiError;
use crate::AppState;

/// One row of the shows page: both counterpart entities plus start time
#[derive(Debug, Serialize)]
pub struct ShowView {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// GET /api/shows
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowView>>, ApiError> {
    let rows = store::all_shows(&state.db).await?;
    let views = rows
        .into_iter()
        .map(|row| ShowView {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time.to_rfc3339(),
        })
        .collect();
    Ok(Json(views))
}

/// POST /api/shows
///
/// Both referenced records must exist; dangling ids report 404 before
/// anything is written.
pub async fn create_show(
    State(state): State<AppState>,
    Json(input): Json<ShowInput>,
) -> Result<(StatusCode, Json<Show>), ApiError> {
    let show = Show {
        id: Uuid::new_v4(),
        artist_id: input.artist_id,
        venue_id: input.venue_id,
        start_time: input.start_time,
    };
    store::insert_show(&state.db, &show).await?;
    info!("Show listed: artist {} at venue {}", show.artist_id, show.venue_id);
    Ok((StatusCode::CREATED, Json(show)))
}
