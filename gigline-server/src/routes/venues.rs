//! Venue routes - grouped listing, search, detail with show history,
//! create and edit

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;

use crate::db::Database;
use crate::error::ServerResult;
use crate::flash::redirect_with_flash;
use crate::history;
use crate::locations::{self, LocationGroup};
use crate::models::{
    ArtistShowEntry, SearchForm, SearchResults, VenuePage, VenueRequest,
};

/// GET /venues - venues grouped by (city, state)
pub async fn list_venues(State(db): State<Database>) -> ServerResult<Json<Vec<LocationGroup>>> {
    let now = Local::now().naive_local();
    let venues = db.venue_summaries(now)?;
    Ok(Json(locations::group_by_location(venues)))
}

/// POST /venues/search - substring match on venue names
pub async fn search_venues(
    State(db): State<Database>,
    Form(form): Form<SearchForm>,
) -> ServerResult<Json<SearchResults>> {
    let term = form.search_term.unwrap_or_default();
    let data = db.search_venues(&term)?;

    Ok(Json(SearchResults {
        count: data.len(),
        data,
    }))
}

/// GET /venues/{id} - venue detail with past and upcoming shows
pub async fn show_venue(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Response> {
    let Some(venue) = db.get_venue(id)? else {
        return Ok(redirect_with_flash(
            "/venues",
            &format!("Error! Details on Venue with ID: {} is not found.", id),
        ));
    };

    let now = Local::now().naive_local();
    let (past, upcoming) = history::partition(db.shows_for_venue(id)?, now);

    let page = VenuePage {
        venue,
        past_shows_count: past.len(),
        upcoming_shows_count: upcoming.len(),
        past_shows: past.into_iter().map(ArtistShowEntry::from).collect(),
        upcoming_shows: upcoming.into_iter().map(ArtistShowEntry::from).collect(),
    };

    Ok(Json(page).into_response())
}

/// POST /venues/create - insert one venue, then redirect home
pub async fn create_venue(
    State(db): State<Database>,
    Json(req): Json<VenueRequest>,
) -> Response {
    let venue = match req.into_new_venue() {
        Ok(venue) => venue,
        Err(message) => return redirect_with_flash("/", message),
    };

    match db.create_venue(&venue) {
        Ok(_) => redirect_with_flash(
            "/",
            &format!("Venue {} was successfully listed!", venue.name),
        ),
        Err(err) => {
            tracing::error!("Failed to create venue: {}", err);
            redirect_with_flash(
                "/",
                &format!("Error! issue faced while trying to add {}", venue.name),
            )
        }
    }
}

/// POST /venues/{id}/edit - full-record overwrite
pub async fn edit_venue(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<VenueRequest>,
) -> Response {
    let venue = match req.into_new_venue() {
        Ok(venue) => venue,
        Err(message) => return redirect_with_flash(&format!("/venues/{}", id), message),
    };

    match db.update_venue(id, &venue) {
        Ok(true) => Redirect::to(&format!("/venues/{}", id)).into_response(),
        Ok(false) => redirect_with_flash(
            "/venues",
            &format!("Error! Details on Venue with ID: {} is not found.", id),
        ),
        Err(err) => {
            tracing::error!("Failed to update venue {}: {}", id, err);
            redirect_with_flash(
                &format!("/venues/{}", id),
                &format!("Error! issue faced while trying to update {}", venue.name),
            )
        }
    }
}
