//! Artist handlers: listing, detail with show partitions, search,
//! create and update (artists have no delete path)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use gigboard_common::db::models::{Artist, ArtistInput, NameRef};
use gigboard_common::db::store;
use gigboard_common::listings::{self, SearchKind, SearchResults, ShowEntry};
use gigboard_common::time;

use super::venues::SearchQuery;
use super::ApiError;
use crate::AppState;

/// One show as displayed on an artist page: the venue side
#[derive(Debug, Serialize)]
pub struct VenueShowView {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowEntry> for VenueShowView {
    fn from(entry: ShowEntry) -> Self {
        Self {
            venue_id: entry.id,
            venue_name: entry.name,
            venue_image_link: entry.image_link,
            start_time: entry.start_time.to_rfc3339(),
        }
    }
}

/// Artist detail with time-partitioned shows
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub id: Uuid,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    /// Formatted for display: AAA-BBB-CCCC
    pub phone: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShowView>,
    pub upcoming_shows: Vec<VenueShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /api/artists
///
/// Flat id/name listing, in store order.
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<Vec<NameRef>>, ApiError> {
    Ok(Json(store::list_artists(&state.db).await?))
}

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let artist = store::fetch_artist(&state.db, id).await?;
    let entries = store::shows_for_artist(&state.db, id).await?;
    let (past, upcoming) = listings::partition_shows(entries, time::now());

    let past_shows: Vec<VenueShowView> = past.into_iter().map(Into::into).collect();
    let upcoming_shows: Vec<VenueShowView> = upcoming.into_iter().map(Into::into).collect();

    Ok(Json(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres: artist.genres,
        city: artist.city,
        state: artist.state,
        phone: listings::format_phone(&artist.phone)?,
        website_link: artist.website_link,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// GET /api/artists/search?term=
pub async fn search_artists(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, ApiError> {
    let results =
        store::search_by_name(&state.db, SearchKind::Artists, &query.term, time::now()).await?;
    Ok(Json(results))
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<AppState>,
    Json(input): Json<ArtistInput>,
) -> Result<(StatusCode, Json<Artist>), ApiError> {
    let artist = listings::build_artist(Uuid::new_v4(), input)?;
    store::insert_artist(&state.db, &artist).await?;
    info!("Artist '{}' listed", artist.name);
    Ok((StatusCode::CREATED, Json(artist)))
}

/// PUT /api/artists/:id
///
/// Full-field overwrite, never a partial patch.
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ArtistInput>,
) -> Result<Json<Artist>, ApiError> {
    let artist = listings::build_artist(id, input)?;
    store::update_artist(&state.db, &artist).await?;
    info!("Artist '{}' updated", artist.name);
    Ok(Json(artist))
}
