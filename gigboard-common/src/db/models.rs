//! Database models and mutation inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A venue record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    /// Exactly 10 digits, normalized on write
    pub phone: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
}

/// An artist record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    /// Exactly 10 digits, normalized on write
    pub phone: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
}

/// A show: pure association between one artist and one venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub venue_id: Uuid,
    pub start_time: DateTime<Utc>,
}

/// Already-parsed form input for creating or fully overwriting a venue.
///
/// A missing seeking flag defaults to false, matching unchecked-checkbox
/// form semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
}

/// Already-parsed form input for creating or fully overwriting an artist
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
}

/// Input for creating a show
#[derive(Debug, Clone, Deserialize)]
pub struct ShowInput {
    pub artist_id: Uuid,
    pub venue_id: Uuid,
    pub start_time: DateTime<Utc>,
}

/// Minimal id/name reference used by listings and search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRef {
    pub id: Uuid,
    pub name: String,
}
