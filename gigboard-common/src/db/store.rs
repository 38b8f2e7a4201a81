//! Record store: the persistence boundary for venues, artists, and shows
//!
//! Every mutation runs inside one transaction (the unit of work): either
//! all writes and the commit succeed, or the transaction rolls back and
//! nothing is observably applied. sqlx rolls an uncommitted transaction
//! back when it is dropped, so the connection is released exactly once on
//! every exit path.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::models::{Artist, NameRef, Show, Venue};
use crate::{Error, Result};

/// Flat show row joined with both counterpart entities, for the shows page
#[derive(Debug, Clone)]
pub struct ShowListing {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| Error::Internal(format!("Malformed id in database: {}", e)))
}

fn parse_genres(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Internal(format!("Malformed genres in database: {}", e)))
}

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    Ok(Venue {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        address: row.get("address"),
        phone: row.get("phone"),
        genres: parse_genres(&row.get::<String, _>("genres"))?,
        seeking_talent: row.get("seeking_talent"),
        seeking_description: row.get("seeking_description"),
        image_link: row.get("image_link"),
        website_link: row.get("website_link"),
        facebook_link: row.get("facebook_link"),
    })
}

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        genres: parse_genres(&row.get::<String, _>("genres"))?,
        seeking_venue: row.get("seeking_venue"),
        seeking_description: row.get("seeking_description"),
        image_link: row.get("image_link"),
        website_link: row.get("website_link"),
        facebook_link: row.get("facebook_link"),
    })
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Fetch a venue by id
pub async fn fetch_venue(pool: &SqlitePool, id: Uuid) -> Result<Venue> {
    let row = sqlx::query("SELECT * FROM venues WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Venue {}", id)))?;
    venue_from_row(&row)
}

/// Fetch an artist by id
pub async fn fetch_artist(pool: &SqlitePool, id: Uuid) -> Result<Artist> {
    let row = sqlx::query("SELECT * FROM artists WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Artist {}", id)))?;
    artist_from_row(&row)
}

/// Fetch all venues, in store order
pub async fn all_venues(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let rows = sqlx::query("SELECT * FROM venues")
        .fetch_all(pool)
        .await?;
    rows.iter().map(venue_from_row).collect()
}

/// List all artists as id/name references, in store order
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<NameRef>> {
    let rows = sqlx::query("SELECT id, name FROM artists")
        .fetch_all(pool)
        .await?;
    rows.iter()
        .map(|row| {
            Ok(NameRef {
                id: parse_uuid(&row.get::<String, _>("id"))?,
                name: row.get("name"),
            })
        })
        .collect()
}

/// Distinct (city, state) pairs present among venues, in retrieval order.
///
/// Location grouping follows this order; no sort is imposed.
pub async fn distinct_locations(pool: &SqlitePool) -> Result<Vec<(String, String)>> {
    let rows = sqlx::query("SELECT DISTINCT city, state FROM venues")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|row| (row.get("city"), row.get("state")))
        .collect())
}

/// Total show count per venue (all shows, not time-filtered)
pub async fn venue_show_counts(pool: &SqlitePool) -> Result<std::collections::HashMap<Uuid, i64>> {
    let rows = sqlx::query("SELECT venue_id, COUNT(*) AS n FROM shows GROUP BY venue_id")
        .fetch_all(pool)
        .await?;
    let mut counts = std::collections::HashMap::new();
    for row in &rows {
        counts.insert(parse_uuid(&row.get::<String, _>("venue_id"))?, row.get::<i64, _>("n"));
    }
    Ok(counts)
}

/// Shows at a venue, joined with the counterpart artist fields
pub async fn shows_for_venue(
    pool: &SqlitePool,
    venue_id: Uuid,
) -> Result<Vec<crate::listings::ShowEntry>> {
    let rows = sqlx::query(
        "SELECT a.id AS counterpart_id, a.name, a.image_link, s.start_time
         FROM shows s
         JOIN artists a ON s.artist_id = a.id
         WHERE s.venue_id = ?",
    )
    .bind(venue_id.to_string())
    .fetch_all(pool)
    .await?;
    rows.iter().map(show_entry_from_row).collect()
}

/// Shows by an artist, joined with the counterpart venue fields
pub async fn shows_for_artist(
    pool: &SqlitePool,
    artist_id: Uuid,
) -> Result<Vec<crate::listings::ShowEntry>> {
    let rows = sqlx::query(
        "SELECT v.id AS counterpart_id, v.name, v.image_link, s.start_time
         FROM shows s
         JOIN venues v ON s.venue_id = v.id
         WHERE s.artist_id = ?",
    )
    .bind(artist_id.to_string())
    .fetch_all(pool)
    .await?;
    rows.iter().map(show_entry_from_row).collect()
}

fn show_entry_from_row(row: &SqliteRow) -> Result<crate::listings::ShowEntry> {
    Ok(crate::listings::ShowEntry {
        id: parse_uuid(&row.get::<String, _>("counterpart_id"))?,
        name: row.get("name"),
        image_link: row.get("image_link"),
        start_time: row.get("start_time"),
    })
}

/// All shows joined with both counterpart entities, for the shows page
pub async fn all_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        "SELECT s.venue_id, v.name AS venue_name,
                s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
                s.start_time
         FROM shows s
         JOIN venues v ON s.venue_id = v.id
         JOIN artists a ON s.artist_id = a.id",
    )
    .fetch_all(pool)
    .await?;
    rows.iter()
        .map(|row| {
            Ok(ShowListing {
                venue_id: parse_uuid(&row.get::<String, _>("venue_id"))?,
                venue_name: row.get("venue_name"),
                artist_id: parse_uuid(&row.get::<String, _>("artist_id"))?,
                artist_name: row.get("artist_name"),
                artist_image_link: row.get("artist_image_link"),
                start_time: row.get("start_time"),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Name search
// ---------------------------------------------------------------------------

/// Venues whose name contains `term` as a case-insensitive substring.
///
/// No anchoring and no minimum length: an empty term matches every row.
/// Results come back in store order.
pub async fn search_venues(pool: &SqlitePool, term: &str) -> Result<Vec<NameRef>> {
    search_names(pool, "SELECT id, name FROM venues WHERE name LIKE ?", term).await
}

/// Artists whose name contains `term` as a case-insensitive substring
pub async fn search_artists(pool: &SqlitePool, term: &str) -> Result<Vec<NameRef>> {
    search_names(pool, "SELECT id, name FROM artists WHERE name LIKE ?", term).await
}

async fn search_names(pool: &SqlitePool, sql: &str, term: &str) -> Result<Vec<NameRef>> {
    // SQLite LIKE is case-insensitive for ASCII by default
    let pattern = format!("%{}%", term);
    let rows = sqlx::query(sql).bind(pattern).fetch_all(pool).await?;
    rows.iter()
        .map(|row| {
            Ok(NameRef {
                id: parse_uuid(&row.get::<String, _>("id"))?,
                name: row.get("name"),
            })
        })
        .collect()
}

/// Case-insensitive name search across one entity kind, with each match
/// annotated by its upcoming-show count (strictly after `now`).
pub async fn search_by_name(
    pool: &SqlitePool,
    kind: crate::listings::SearchKind,
    term: &str,
    now: DateTime<Utc>,
) -> Result<crate::listings::SearchResults> {
    let matches = match kind {
        crate::listings::SearchKind::Venues => search_venues(pool, term).await?,
        crate::listings::SearchKind::Artists => search_artists(pool, term).await?,
    };

    let mut annotated = Vec::with_capacity(matches.len());
    for record in matches {
        let starts = match kind {
            crate::listings::SearchKind::Venues => venue_show_times(pool, record.id).await?,
            crate::listings::SearchKind::Artists => artist_show_times(pool, record.id).await?,
        };
        annotated.push((record, starts));
    }

    Ok(crate::listings::shape_search_results(annotated, now))
}

/// Start times of every show referencing the given venue
pub async fn venue_show_times(pool: &SqlitePool, venue_id: Uuid) -> Result<Vec<DateTime<Utc>>> {
    show_times(pool, "SELECT start_time FROM shows WHERE venue_id = ?", venue_id).await
}

/// Start times of every show referencing the given artist
pub async fn artist_show_times(pool: &SqlitePool, artist_id: Uuid) -> Result<Vec<DateTime<Utc>>> {
    show_times(pool, "SELECT start_time FROM shows WHERE artist_id = ?", artist_id).await
}

async fn show_times(pool: &SqlitePool, sql: &str, id: Uuid) -> Result<Vec<DateTime<Utc>>> {
    let rows = sqlx::query(sql).bind(id.to_string()).fetch_all(pool).await?;
    Ok(rows.iter().map(|row| row.get("start_time")).collect())
}

// ---------------------------------------------------------------------------
// Mutations (each inside one unit of work)
// ---------------------------------------------------------------------------

/// Insert a new venue
pub async fn insert_venue(pool: &SqlitePool, venue: &Venue) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO venues (id, name, city, state, address, phone, genres,
                             seeking_talent, seeking_description, image_link,
                             website_link, facebook_link)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(venue.id.to_string())
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(serde_json::to_string(&venue.genres).unwrap_or_else(|_| "[]".to_string()))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(&venue.image_link)
    .bind(&venue.website_link)
    .bind(&venue.facebook_link)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

/// Overwrite every mutable field of an existing venue (full replace)
pub async fn update_venue(pool: &SqlitePool, venue: &Venue) -> Result<()> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "UPDATE venues SET name = ?, city = ?, state = ?, address = ?, phone = ?,
                           genres = ?, seeking_talent = ?, seeking_description = ?,
                           image_link = ?, website_link = ?, facebook_link = ?
         WHERE id = ?",
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(serde_json::to_string(&venue.genres).unwrap_or_else(|_| "[]".to_string()))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(&venue.image_link)
    .bind(&venue.website_link)
    .bind(&venue.facebook_link)
    .bind(venue.id.to_string())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Venue {}", venue.id)));
    }
    tx.commit().await?;
    Ok(())
}

/// Delete a venue by id, returning its name.
///
/// Existence is checked first so a missing venue reports NotFound instead
/// of being silently ignored. Shows referencing the venue cascade.
pub async fn delete_venue(pool: &SqlitePool, id: Uuid) -> Result<String> {
    let mut tx = pool.begin().await?;
    let name: Option<String> = sqlx::query_scalar("SELECT name FROM venues WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await?;
    let name = name.ok_or_else(|| Error::NotFound(format!("Venue {}", id)))?;

    sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(name)
}

/// Insert a new artist
pub async fn insert_artist(pool: &SqlitePool, artist: &Artist) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO artists (id, name, city, state, phone, genres,
                              seeking_venue, seeking_description, image_link,
                              website_link, facebook_link)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(artist.id.to_string())
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(serde_json::to_string(&artist.genres).unwrap_or_else(|_| "[]".to_string()))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(&artist.image_link)
    .bind(&artist.website_link)
    .bind(&artist.facebook_link)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

/// Overwrite every mutable field of an existing artist (full replace)
pub async fn update_artist(pool: &SqlitePool, artist: &Artist) -> Result<()> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "UPDATE artists SET name = ?, city = ?, state = ?, phone = ?, genres = ?,
                            seeking_venue = ?, seeking_description = ?,
                            image_link = ?, website_link = ?, facebook_link = ?
         WHERE id = ?",
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(serde_json::to_string(&artist.genres).unwrap_or_else(|_| "[]".to_string()))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(&artist.image_link)
    .bind(&artist.website_link)
    .bind(&artist.facebook_link)
    .bind(artist.id.to_string())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Artist {}", artist.id)));
    }
    tx.commit().await?;
    Ok(())
}

/// Insert a new show after verifying both referenced records exist.
///
/// The explicit checks turn dangling references into NotFound instead of
/// a bare foreign-key violation from the commit.
pub async fn insert_show(pool: &SqlitePool, show: &Show) -> Result<()> {
    let mut tx = pool.begin().await?;

    let artist_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(show.artist_id.to_string())
        .fetch_one(&mut *tx)
        .await?;
    if !artist_exists {
        return Err(Error::NotFound(format!("Artist {}", show.artist_id)));
    }

    let venue_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(show.venue_id.to_string())
        .fetch_one(&mut *tx)
        .await?;
    if !venue_exists {
        return Err(Error::NotFound(format!("Venue {}", show.venue_id)));
    }

    sqlx::query("INSERT INTO shows (id, artist_id, venue_id, start_time) VALUES (?, ?, ?, ?)")
        .bind(show.id.to_string())
        .bind(show.artist_id.to_string())
        .bind(show.venue_id.to_string())
        .bind(show.start_time)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}
