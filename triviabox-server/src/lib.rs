//! triviabox-server: trivia question API
//!
//! Serves categories and a paginated question bank, free-text question
//! search, and a quiz endpoint that draws a random not-yet-asked
//! question from a chosen category.

pub mod db;
pub mod error;
pub mod models;
pub mod paging;
pub mod quiz;
pub mod routes;
pub mod server;

pub use db::Database;
pub use error::{ApiError, ApiResult};
