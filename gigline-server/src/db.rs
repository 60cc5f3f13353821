//! SQLite storage for the listing service
//!
//! A single connection behind a mutex, schema applied at open, foreign
//! keys enforced. Genre lists are stored as a JSON array in a TEXT
//! column and timestamps as formatted TEXT, so show-time comparisons in
//! SQL work lexicographically.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ServerResult;
use crate::models::{
    format_start_time, parse_start_time, Artist, IdName, NewArtist, NewShow, NewVenue, ShowJoined,
    ShowRecord, Venue, VenueSummary,
};

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::init(Connection::open(&path)?)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> ServerResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // ========================================================================
    // Venues
    // ========================================================================

    /// Venue rows for the grouped location listing, with the count of
    /// shows starting at or after `now`.
    pub fn venue_summaries(&self, now: NaiveDateTime) -> ServerResult<Vec<VenueSummary>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT v.id, v.name, v.city, v.state,
                   (SELECT COUNT(*) FROM shows s
                     WHERE s.venue_id = v.id AND s.start_time >= ?) as num_upcoming_shows
            FROM venues v
            ORDER BY v.id
            "#,
        )?;

        let venues = stmt
            .query_map([format_start_time(now)], |row| {
                Ok(VenueSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city: row.get(2)?,
                    state: row.get(3)?,
                    num_upcoming_shows: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(venues)
    }

    /// Case-insensitive substring match on venue names. An empty term
    /// matches every venue.
    pub fn search_venues(&self, term: &str) -> ServerResult<Vec<IdName>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name FROM venues WHERE name LIKE ? ORDER BY id")?;

        let pattern = format!("%{}%", term);
        let venues = stmt
            .query_map([pattern], id_name_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(venues)
    }

    pub fn get_venue(&self, id: i64) -> ServerResult<Option<Venue>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, city, state, address, phone, image_link, genres,
                   facebook_link, website, seeking_talent, seeking_description
            FROM venues WHERE id = ?
            "#,
        )?;

        let venue = stmt
            .query_row([id], |row| {
                Ok(Venue {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city: row.get(2)?,
                    state: row.get(3)?,
                    address: row.get(4)?,
                    phone: row.get(5)?,
                    image_link: row.get(6)?,
                    genres: parse_genres(row.get::<_, String>(7)?),
                    facebook_link: row.get(8)?,
                    website: row.get(9)?,
                    seeking_talent: row.get(10)?,
                    seeking_description: row.get(11)?,
                })
            })
            .optional()?;

        Ok(venue)
    }

    pub fn create_venue(&self, venue: &NewVenue) -> ServerResult<i64> {
        let genres = serde_json::to_string(&venue.genres)?;
        let mut conn = self.conn.lock().unwrap();

        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO venues (name, city, state, address, phone, image_link, genres,
                                facebook_link, website, seeking_talent, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                venue.name,
                venue.city,
                venue.state,
                venue.address,
                venue.phone,
                venue.image_link,
                genres,
                venue.facebook_link,
                venue.website,
                venue.seeking_talent,
                venue.seeking_description,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    /// Full-record overwrite. Returns false when the id matched no row.
    pub fn update_venue(&self, id: i64, venue: &NewVenue) -> ServerResult<bool> {
        let genres = serde_json::to_string(&venue.genres)?;
        let mut conn = self.conn.lock().unwrap();

        let tx = conn.transaction()?;
        let affected = tx.execute(
            r#"
            UPDATE venues
            SET name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
                genres = ?, facebook_link = ?, website = ?, seeking_talent = ?,
                seeking_description = ?
            WHERE id = ?
            "#,
            params![
                venue.name,
                venue.city,
                venue.state,
                venue.address,
                venue.phone,
                venue.image_link,
                genres,
                venue.facebook_link,
                venue.website,
                venue.seeking_talent,
                venue.seeking_description,
                id,
            ],
        )?;
        tx.commit()?;

        Ok(affected > 0)
    }

    /// Shows at a venue, joined with the performing artist.
    pub fn shows_for_venue(&self, venue_id: i64) -> ServerResult<Vec<ShowRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT s.artist_id, a.name, a.image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = ?
            ORDER BY s.start_time
            "#,
        )?;

        let shows = stmt
            .query_map([venue_id], show_record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(shows)
    }

    // ========================================================================
    // Artists
    // ========================================================================

    pub fn list_artists(&self) -> ServerResult<Vec<IdName>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name FROM artists ORDER BY id")?;

        let artists = stmt
            .query_map([], id_name_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(artists)
    }

    /// Case-insensitive substring match on artist names. An empty term
    /// matches every artist.
    pub fn search_artists(&self, term: &str) -> ServerResult<Vec<IdName>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name FROM artists WHERE name LIKE ? ORDER BY id")?;

        let pattern = format!("%{}%", term);
        let artists = stmt
            .query_map([pattern], id_name_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(artists)
    }

    pub fn get_artist(&self, id: i64) -> ServerResult<Option<Artist>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, city, state, phone, image_link, genres,
                   facebook_link, website, seeking_venue, seeking_description
            FROM artists WHERE id = ?
            "#,
        )?;

        let artist = stmt
            .query_row([id], |row| {
                Ok(Artist {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city: row.get(2)?,
                    state: row.get(3)?,
                    phone: row.get(4)?,
                    image_link: row.get(5)?,
                    genres: parse_genres(row.get::<_, String>(6)?),
                    facebook_link: row.get(7)?,
                    website: row.get(8)?,
                    seeking_venue: row.get(9)?,
                    seeking_description: row.get(10)?,
                })
            })
            .optional()?;

        Ok(artist)
    }

    pub fn create_artist(&self, artist: &NewArtist) -> ServerResult<i64> {
        let genres = serde_json::to_string(&artist.genres)?;
        let mut conn = self.conn.lock().unwrap();

        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO artists (name, city, state, phone, image_link, genres,
                                 facebook_link, website, seeking_venue, seeking_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                artist.name,
                artist.city,
                artist.state,
                artist.phone,
                artist.image_link,
                genres,
                artist.facebook_link,
                artist.website,
                artist.seeking_venue,
                artist.seeking_description,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    /// Full-record overwrite. Returns false when the id matched no row.
    pub fn update_artist(&self, id: i64, artist: &NewArtist) -> ServerResult<bool> {
        let genres = serde_json::to_string(&artist.genres)?;
        let mut conn = self.conn.lock().unwrap();

        let tx = conn.transaction()?;
        let affected = tx.execute(
            r#"
            UPDATE artists
            SET name = ?, city = ?, state = ?, phone = ?, image_link = ?, genres = ?,
                facebook_link = ?, website = ?, seeking_venue = ?, seeking_description = ?
            WHERE id = ?
            "#,
            params![
                artist.name,
                artist.city,
                artist.state,
                artist.phone,
                artist.image_link,
                genres,
                artist.facebook_link,
                artist.website,
                artist.seeking_venue,
                artist.seeking_description,
                id,
            ],
        )?;
        tx.commit()?;

        Ok(affected > 0)
    }

    /// Shows played by an artist, joined with the hosting venue.
    pub fn shows_for_artist(&self, artist_id: i64) -> ServerResult<Vec<ShowRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT s.venue_id, v.name, v.image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = ?
            ORDER BY s.start_time
            "#,
        )?;

        let shows = stmt
            .query_map([artist_id], show_record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(shows)
    }

    // ========================================================================
    // Shows
    // ========================================================================

    pub fn list_shows(&self) -> ServerResult<Vec<ShowJoined>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time
            "#,
        )?;

        let shows = stmt
            .query_map([], |row| {
                Ok(ShowJoined {
                    venue_id: row.get(0)?,
                    venue_name: row.get(1)?,
                    artist_id: row.get(2)?,
                    artist_name: row.get(3)?,
                    artist_image_link: row.get(4)?,
                    start_time: parse_stored_time(row.get::<_, String>(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(shows)
    }

    /// Insert a show. The foreign key check fails inside the
    /// transaction when the artist or venue does not exist.
    pub fn create_show(&self, show: &NewShow) -> ServerResult<i64> {
        let mut conn = self.conn.lock().unwrap();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)",
            params![
                show.artist_id,
                show.venue_id,
                format_start_time(show.start_time),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }
}

fn id_name_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<IdName> {
    Ok(IdName {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn show_record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ShowRecord> {
    Ok(ShowRecord {
        counterpart_id: row.get(0)?,
        counterpart_name: row.get(1)?,
        counterpart_image_link: row.get(2)?,
        start_time: parse_stored_time(row.get::<_, String>(3)?),
    })
}

fn parse_genres(text: String) -> Vec<String> {
    serde_json::from_str(&text).unwrap_or_default()
}

/// Malformed stored timestamps sort as the epoch.
fn parse_stored_time(text: String) -> NaiveDateTime {
    parse_start_time(&text).unwrap_or_default()
}

const SCHEMA: &str = r#"
-- Performance locations
CREATE TABLE IF NOT EXISTS venues (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    address TEXT NOT NULL,
    phone TEXT,
    image_link TEXT,
    genres TEXT NOT NULL DEFAULT '[]',
    facebook_link TEXT,
    website TEXT,
    seeking_talent INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT NOT NULL DEFAULT 'no details provided'
);

-- Performers
CREATE TABLE IF NOT EXISTS artists (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    city TEXT,
    state TEXT,
    phone TEXT,
    image_link TEXT,
    genres TEXT NOT NULL DEFAULT '[]',
    facebook_link TEXT,
    website TEXT,
    seeking_venue INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT NOT NULL DEFAULT 'no details provided'
);

-- Scheduled events joining one venue and one artist
CREATE TABLE IF NOT EXISTS shows (
    id INTEGER PRIMARY KEY,
    artist_id INTEGER NOT NULL REFERENCES artists(id),
    venue_id INTEGER NOT NULL REFERENCES venues(id),
    start_time TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id);
CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id);
CREATE INDEX IF NOT EXISTS idx_venues_location ON venues(state, city);
"#;
