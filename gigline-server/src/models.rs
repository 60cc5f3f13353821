//! Domain records and per-endpoint request/response shapes
//!
//! Request structs carry required fields as `Option` and validate into
//! ready-to-write `New*` records before any storage call, so missing
//! and empty input produce the same user-visible message.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stored when no seeking description is supplied.
pub const DEFAULT_SEEKING_DESCRIPTION: &str = "no details provided";

/// Display and storage format for show timestamps (naive wall clock).
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_start_time(t: NaiveDateTime) -> String {
    t.format(START_TIME_FORMAT).to_string()
}

/// Accepts the display format and its `T`-separated variant.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, START_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A performance location.
#[derive(Debug, Clone, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// A performer.
#[derive(Debug, Clone, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Id-and-name pair used by listings and search results.
#[derive(Debug, Clone, Serialize)]
pub struct IdName {
    pub id: i64,
    pub name: String,
}

/// Venue row feeding the grouped location listing.
#[derive(Debug, Clone)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// A show joined with its counterpart entity, before display
/// formatting. On a venue page the counterpart is the artist; on an
/// artist page it is the venue.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowRecord {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A show joined with both of its entities, for the flat show listing.
#[derive(Debug, Clone)]
pub struct ShowJoined {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VenueRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// A venue validated and ready to write.
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueRequest {
    pub fn into_new_venue(self) -> Result<NewVenue, &'static str> {
        Ok(NewVenue {
            name: required(self.name, "Venue name is required")?,
            city: required(self.city, "Venue city is required")?,
            state: required(self.state, "Venue state is required")?,
            address: required(self.address, "Venue address is required")?,
            phone: self.phone,
            image_link: self.image_link,
            genres: self.genres,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_talent: self.seeking_talent,
            seeking_description: self
                .seeking_description
                .unwrap_or_else(|| DEFAULT_SEEKING_DESCRIPTION.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ArtistRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// An artist validated and ready to write.
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistRequest {
    pub fn into_new_artist(self) -> Result<NewArtist, &'static str> {
        Ok(NewArtist {
            name: required(self.name, "Artist name is required")?,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            genres: self.genres,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_venue: self.seeking_venue,
            seeking_description: self
                .seeking_description
                .unwrap_or_else(|| DEFAULT_SEEKING_DESCRIPTION.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ShowRequest {
    pub artist_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub start_time: Option<String>,
}

/// A show validated and ready to write.
#[derive(Debug, Clone)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

impl ShowRequest {
    pub fn into_new_show(self) -> Result<NewShow, &'static str> {
        let artist_id = self.artist_id.ok_or("Show artist is required")?;
        let venue_id = self.venue_id.ok_or("Show venue is required")?;
        let start_time = self
            .start_time
            .as_deref()
            .and_then(parse_start_time)
            .ok_or("Show start time is required")?;

        Ok(NewShow {
            artist_id,
            venue_id,
            start_time,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub search_term: Option<String>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<IdName>,
}

/// Show entry on a venue page (the artist side).
#[derive(Debug, Serialize)]
pub struct ArtistShowEntry {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowRecord> for ArtistShowEntry {
    fn from(show: ShowRecord) -> Self {
        Self {
            artist_id: show.counterpart_id,
            artist_name: show.counterpart_name,
            artist_image_link: show.counterpart_image_link,
            start_time: format_start_time(show.start_time),
        }
    }
}

/// Show entry on an artist page (the venue side).
#[derive(Debug, Serialize)]
pub struct VenueShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowRecord> for VenueShowEntry {
    fn from(show: ShowRecord) -> Self {
        Self {
            venue_id: show.counterpart_id,
            venue_name: show.counterpart_name,
            venue_image_link: show.counterpart_image_link,
            start_time: format_start_time(show.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VenuePage {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ArtistShowEntry>,
    pub upcoming_shows: Vec<ArtistShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ArtistPage {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<VenueShowEntry>,
    pub upcoming_shows: Vec<VenueShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowJoined> for ShowListing {
    fn from(show: ShowJoined) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: format_start_time(show.start_time),
        }
    }
}

fn required(value: Option<String>, message: &'static str) -> Result<String, &'static str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(message),
    }
}
