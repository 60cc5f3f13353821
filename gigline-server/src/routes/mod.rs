//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod shows;
pub mod venues;

pub use artists::{create_artist, edit_artist, list_artists, search_artists, show_artist};
pub use health::health_check;
pub use shows::{create_show, list_shows};
pub use venues::{create_venue, edit_venue, list_venues, search_venues, show_venue};
