//! gigline-server: venue, artist, and show listing service
//!
//! Read endpoints serve grouped venue locations, name search, and
//! per-entity show histories split into past and upcoming. Write
//! endpoints insert or overwrite single records inside a transaction
//! and answer with a flash-carrying redirect.

pub mod db;
pub mod error;
pub mod flash;
pub mod history;
pub mod locations;
pub mod models;
pub mod routes;
pub mod server;

pub use db::Database;
pub use error::{ServerError, ServerResult};
