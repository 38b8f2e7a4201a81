//! Venue handlers: location-grouped listing, detail with show partitions,
//! search, and the full create/update/delete lifecycle

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use gigboard_common::db::models::{Venue, VenueInput};
use gigboard_common::db::store;
use gigboard_common::listings::{
    self, LocationGroup, SearchKind, SearchResults, ShowEntry,
};
use gigboard_common::time;

use super::ApiError;
use crate::AppState;

/// Query parameters for name search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Substring to match anywhere in the name; empty matches everything
    #[serde(default)]
    pub term: String,
}

/// One show as displayed on a venue page: the artist side
#[derive(Debug, Serialize)]
pub struct ArtistShowView {
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowEntry> for ArtistShowView {
    fn from(entry: ShowEntry) -> Self {
        Self {
            artist_id: entry.id,
            artist_name: entry.name,
            artist_image_link: entry.image_link,
            start_time: entry.start_time.to_rfc3339(),
        }
    }
}

/// Venue detail with time-partitioned shows
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub id: Uuid,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Formatted for display: AAA-BBB-CCCC
    pub phone: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShowView>,
    pub upcoming_shows: Vec<ArtistShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /api/venues
///
/// Venues grouped by (city, state), each annotated with its total show
/// count, in distinct-pair retrieval order.
pub async fn list_venues(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationGroup>>, ApiError> {
    let locations = store::distinct_locations(&state.db).await?;
    let venues = store::all_venues(&state.db).await?;
    let counts = store::venue_show_counts(&state.db).await?;
    Ok(Json(listings::group_venues_by_location(&locations, &venues, &counts)))
}

/// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VenueDetail>, ApiError> {
    let venue = store::fetch_venue(&state.db, id).await?;
    let entries = store::shows_for_venue(&state.db, id).await?;
    let (past, upcoming) = listings::partition_shows(entries, time::now());

    let past_shows: Vec<ArtistShowView> = past.into_iter().map(Into::into).collect();
    let upcoming_shows: Vec<ArtistShowView> = upcoming.into_iter().map(Into::into).collect();

    Ok(Json(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres: venue.genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: listings::format_phone(&venue.phone)?,
        website_link: venue.website_link,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// GET /api/venues/search?term=
pub async fn search_venues(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, ApiError> {
    let results =
        store::search_by_name(&state.db, SearchKind::Venues, &query.term, time::now()).await?;
    Ok(Json(results))
}

/// POST /api/venues
pub async fn create_venue(
    State(state): State<AppState>,
    Json(input): Json<VenueInput>,
) -> Result<(StatusCode, Json<Venue>), ApiError> {
    let venue = listings::build_venue(Uuid::new_v4(), input)?;
    store::insert_venue(&state.db, &venue).await?;
    info!("Venue '{}' listed", venue.name);
    Ok((StatusCode::CREATED, Json(venue)))
}

/// PUT /api/venues/:id
///
/// Full-field overwrite, never a partial patch.
pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<VenueInput>,
) -> Result<Json<Venue>, ApiError> {
    let venue = listings::build_venue(id, input)?;
    store::update_venue(&state.db, &venue).await?;
    info!("Venue '{}' updated", venue.name);
    Ok(Json(venue))
}

/// DELETE /api/venues/:id
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let name = store::delete_venue(&state.db, id).await?;
    info!("Venue '{}' deleted", name);
    Ok(Json(json!({ "deleted": name })))
}
