//! Listing aggregation: pure functions that shape record-store rows into
//! display-ready structures.
//!
//! Three different notions of "upcoming" coexist here, inherited from the
//! product's observed behavior and deliberately NOT unified:
//! - location grouping publishes the count of ALL shows under
//!   `num_upcoming_shows` (see [`group_venues_by_location`])
//! - detail pages bucket a show starting exactly now into upcoming
//!   (see [`partition_shows`], boundary inclusive)
//! - search results count only shows starting strictly after now
//!   (see [`upcoming_count`], boundary exclusive)
//! Tests pin each boundary so unifying them is a deliberate change.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::models::{Artist, ArtistInput, NameRef, Venue, VenueInput};
use crate::{Error, Result};

/// One (city, state) pair and the venues located there
#[derive(Debug, Clone, Serialize)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Venue line inside a location group
#[derive(Debug, Clone, Serialize)]
pub struct VenueSummary {
    pub id: Uuid,
    pub name: String,
    /// Count of ALL shows referencing this venue. The field name follows
    /// the product's display contract even though the value is not
    /// time-filtered.
    pub num_upcoming_shows: i64,
}

/// A show as seen from one side: the counterpart entity plus the start time
#[derive(Debug, Clone, PartialEq)]
pub struct ShowEntry {
    pub id: Uuid,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Search result set: total count plus annotated matches
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchResult>,
}

/// One search match with its upcoming-show count (exclusive boundary)
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub id: Uuid,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Which entity kind a name search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Venues,
    Artists,
}

/// Group venues by their (city, state) pair.
///
/// `locations` supplies the distinct pairs in retrieval order; the output
/// follows that order, one group per pair. Every venue lands in exactly
/// one group because the pairs cover the venue set. The nested scan is
/// O(groups x venues), fine at listing scale.
pub fn group_venues_by_location(
    locations: &[(String, String)],
    venues: &[Venue],
    show_counts: &std::collections::HashMap<Uuid, i64>,
) -> Vec<LocationGroup> {
    locations
        .iter()
        .map(|(city, state)| LocationGroup {
            city: city.clone(),
            state: state.clone(),
            venues: venues
                .iter()
                .filter(|v| &v.city == city && &v.state == state)
                .map(|v| VenueSummary {
                    id: v.id,
                    name: v.name.clone(),
                    num_upcoming_shows: show_counts.get(&v.id).copied().unwrap_or(0),
                })
                .collect(),
        })
        .collect()
}

/// Partition shows into (past, upcoming) around a reference instant.
///
/// A show starting exactly at `now` lands in upcoming: past is strictly
/// before, upcoming is at-or-after. Counts displayed next to the lists
/// are always the lengths of the returned vectors.
pub fn partition_shows(
    shows: Vec<ShowEntry>,
    now: DateTime<Utc>,
) -> (Vec<ShowEntry>, Vec<ShowEntry>) {
    shows.into_iter().partition(|show| show.start_time < now)
}

/// Count shows starting strictly after `now`.
///
/// Used for search-result annotation; the boundary is exclusive, unlike
/// [`partition_shows`].
pub fn upcoming_count(starts: &[DateTime<Utc>], now: DateTime<Utc>) -> usize {
    starts.iter().filter(|start| **start > now).count()
}

/// Assemble a search response from matches and their show start times.
///
/// The caller pairs each matched record with the start times of its shows;
/// order is preserved from the store.
pub fn shape_search_results(matches: Vec<(NameRef, Vec<DateTime<Utc>>)>, now: DateTime<Utc>) -> SearchResults {
    let data: Vec<SearchResult> = matches
        .into_iter()
        .map(|(record, starts)| SearchResult {
            id: record.id,
            name: record.name,
            num_upcoming_shows: upcoming_count(&starts, now),
        })
        .collect();
    SearchResults { count: data.len(), data }
}

/// Format a normalized 10-digit phone number as AAA-BBB-CCCC.
///
/// Anything other than exactly 10 ASCII digits is rejected rather than
/// sliced into garbage.
pub fn format_phone(digits: &str) -> Result<String> {
    if digits.len() != 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "Phone must be exactly 10 digits, got {:?}",
            digits
        )));
    }
    Ok(format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]))
}

/// Strip non-digit characters from raw phone input and require exactly
/// 10 digits remain
pub fn normalize_phone(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return Err(Error::InvalidInput(format!(
            "Phone must contain exactly 10 digits, got {} in {:?}",
            digits.len(),
            raw
        )));
    }
    Ok(digits)
}

/// Build a venue record from validated form input.
///
/// Used by create (fresh id) and update (existing id); update is a full
/// overwrite, so both paths normalize the same way.
pub fn build_venue(id: Uuid, input: VenueInput) -> Result<Venue> {
    if input.name.trim().is_empty() {
        return Err(Error::InvalidInput("Venue name is required".to_string()));
    }
    Ok(Venue {
        id,
        name: input.name,
        city: input.city,
        state: input.state,
        address: input.address,
        phone: normalize_phone(&input.phone)?,
        genres: input.genres,
        seeking_talent: input.seeking_talent,
        seeking_description: input.seeking_description,
        image_link: input.image_link,
        website_link: input.website_link,
        facebook_link: input.facebook_link,
    })
}

/// Build an artist record from validated form input
pub fn build_artist(id: Uuid, input: ArtistInput) -> Result<Artist> {
    if input.name.trim().is_empty() {
        return Err(Error::InvalidInput("Artist name is required".to_string()));
    }
    Ok(Artist {
        id,
        name: input.name,
        city: input.city,
        state: input.state,
        phone: normalize_phone(&input.phone)?,
        genres: input.genres,
        seeking_venue: input.seeking_venue,
        seeking_description: input.seeking_description,
        image_link: input.image_link,
        website_link: input.website_link,
        facebook_link: input.facebook_link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn venue(name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id: Uuid::new_v4(),
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1 Main St".to_string(),
            phone: "1234567890".to_string(),
            genres: vec![],
            seeking_talent: false,
            seeking_description: None,
            image_link: None,
            website_link: None,
            facebook_link: None,
        }
    }

    fn entry(start: DateTime<Utc>) -> ShowEntry {
        ShowEntry {
            id: Uuid::new_v4(),
            name: "Counterpart".to_string(),
            image_link: None,
            start_time: start,
        }
    }

    #[test]
    fn test_grouping_places_every_venue_exactly_once() {
        let venues = vec![
            venue("A", "New York", "NY"),
            venue("B", "San Francisco", "CA"),
            venue("C", "New York", "NY"),
        ];
        let locations = vec![
            ("New York".to_string(), "NY".to_string()),
            ("San Francisco".to_string(), "CA".to_string()),
        ];
        let groups = group_venues_by_location(&locations, &venues, &HashMap::new());

        assert_eq!(groups.len(), 2);
        let total: usize = groups.iter().map(|g| g.venues.len()).sum();
        assert_eq!(total, venues.len());

        // (city, state) unique across the output
        let pairs: std::collections::HashSet<_> =
            groups.iter().map(|g| (&g.city, &g.state)).collect();
        assert_eq!(pairs.len(), groups.len());
    }

    #[test]
    fn test_grouping_preserves_location_retrieval_order() {
        let venues = vec![venue("A", "Austin", "TX"), venue("B", "Boston", "MA")];
        let locations = vec![
            ("Boston".to_string(), "MA".to_string()),
            ("Austin".to_string(), "TX".to_string()),
        ];
        let groups = group_venues_by_location(&locations, &venues, &HashMap::new());
        assert_eq!(groups[0].city, "Boston");
        assert_eq!(groups[1].city, "Austin");
    }

    #[test]
    fn test_grouping_counts_all_shows_not_just_upcoming() {
        let v = venue("A", "New York", "NY");
        let locations = vec![("New York".to_string(), "NY".to_string())];
        let mut counts = HashMap::new();
        counts.insert(v.id, 7i64);
        let groups = group_venues_by_location(&locations, std::slice::from_ref(&v), &counts);
        // Field is named num_upcoming_shows but carries the total count
        assert_eq!(groups[0].venues[0].num_upcoming_shows, 7);
    }

    #[test]
    fn test_partition_is_strict_and_inclusive_on_upcoming_side() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let before = entry(now - chrono::Duration::hours(1));
        let exactly = entry(now);
        let after = entry(now + chrono::Duration::hours(1));

        let input = vec![before.clone(), exactly.clone(), after.clone()];
        let (past, upcoming) = partition_shows(input.clone(), now);

        assert_eq!(past.len() + upcoming.len(), input.len());
        assert_eq!(past, vec![before]);
        // Exactly-now lands in upcoming
        assert_eq!(upcoming, vec![exactly, after]);
    }

    #[test]
    fn test_upcoming_count_boundary_is_exclusive() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let starts = vec![now, now + chrono::Duration::seconds(1)];
        // Exactly-now is NOT counted here, unlike partition_shows
        assert_eq!(upcoming_count(&starts, now), 1);
    }

    #[test]
    fn test_shape_search_results_count_matches_data() {
        let now = Utc::now();
        let matches = vec![
            (NameRef { id: Uuid::new_v4(), name: "Guns N Petals".to_string() }, vec![now + chrono::Duration::days(1)]),
            (NameRef { id: Uuid::new_v4(), name: "Matt Quevado".to_string() }, vec![]),
        ];
        let results = shape_search_results(matches, now);
        assert_eq!(results.count, 2);
        assert_eq!(results.data[0].num_upcoming_shows, 1);
        assert_eq!(results.data[1].num_upcoming_shows, 0);
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("1234567890").unwrap(), "123-456-7890");
    }

    #[test]
    fn test_format_phone_rejects_short_input() {
        assert!(matches!(format_phone("12345"), Err(Error::InvalidInput(_))));
        assert!(matches!(format_phone("123456789012"), Err(Error::InvalidInput(_))));
        assert!(matches!(format_phone("12345678ab"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_normalize_phone_strips_punctuation() {
        assert_eq!(normalize_phone("(123) 456-7890").unwrap(), "1234567890");
        assert_eq!(normalize_phone("123.456.7890").unwrap(), "1234567890");
    }

    #[test]
    fn test_normalize_phone_requires_ten_digits() {
        assert!(matches!(normalize_phone("555-1234"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_build_venue_normalizes_and_defaults() {
        let input = VenueInput {
            name: "The Hall".to_string(),
            city: "Chicago".to_string(),
            state: "IL".to_string(),
            address: "2 Oak Ave".to_string(),
            phone: "312-555-0100".to_string(),
            genres: vec!["Jazz".to_string()],
            seeking_talent: false,
            seeking_description: None,
            image_link: None,
            website_link: None,
            facebook_link: None,
        };
        let id = Uuid::new_v4();
        let built = build_venue(id, input).unwrap();
        assert_eq!(built.id, id);
        assert_eq!(built.phone, "3125550100");
        assert!(!built.seeking_talent);
    }

    #[test]
    fn test_build_venue_rejects_blank_name() {
        let input = VenueInput {
            name: "  ".to_string(),
            city: "Chicago".to_string(),
            state: "IL".to_string(),
            address: "2 Oak Ave".to_string(),
            phone: "3125550100".to_string(),
            genres: vec![],
            seeking_talent: false,
            seeking_description: None,
            image_link: None,
            website_link: None,
            facebook_link: None,
        };
        assert!(matches!(build_venue(Uuid::new_v4(), input), Err(Error::InvalidInput(_))));
    }
}
