//! Artist routes - listing, search, detail with show history, create
//! and edit

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
use crate::models::{
    ArtistPage, ArtistRequest, IdName, SearchForm, SearchResults, VenueShowEntry,
};

/// GET /artists - every artist as an id/name pair
pub async fn list_artists(State(db): State<Database>) -> ServerResult<Json<Vec<IdName>>> {
    Ok(Json(db.list_artists()?))
}

/// POST /artists/search - substring match on artist names
pub async fn search_artists(
    State(db): State<Database>,
    Form(form): Form<SearchForm>,
) -> ServerResult<Json<SearchResults>> {
    let term = form.search_term.unwrap_or_default();
    let data = db.search_artists(&term)?;

    Ok(Json(SearchResults {
        count: data.len(),
        data,
    }))
}

/// GET /artists/{id} - artist detail with past and upcoming shows
pub async fn show_artist(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Response> {
    let Some(artist) = db.get_artist(id)? else {
        return Ok(redirect_with_flash(
            "/artists",
            &format!("Error! Details on Artist with ID: {} is not found.", id),
        ));
    };

    let now = Local::now().naive_local();
    let (past, upcoming) = history::partition(db.shows_for_artist(id)?, now);

    let page = ArtistPage {
        artist,
        past_shows_count: past.len(),
        upcoming_shows_count: upcoming.len(),
        past_shows: past.into_iter().map(VenueShowEntry::from).collect(),
        upcoming_shows: upcoming.into_iter().map(VenueShowEntry::from).collect(),
    };

    Ok(Json(page).into_response())
}

/// POST /artists/create - insert one artist, then redirect home
pub async fn create_artist(
    State(db): State<Database>,
    Json(req): Json<ArtistRequest>,
) -> Response {
    let artist = match req.into_new_artist() {
        Ok(artist) => artist,
        Err(message) => return redirect_with_flash("/", message),
    };

    match db.create_artist(&artist) {
        Ok(_) => redirect_with_flash(
            "/",
            &format!("Artist {} was successfully listed!", artist.name),
        ),
        Err(err) => {
            tracing::error!("Failed to create artist: {}", err);
            redirect_with_flash(
                "/",
                &format!("Error! issue faced while trying to add {}", artist.name),
            )
        }
    }
}

/// POST /artists/{id}/edit - full-record overwrite
pub async fn edit_artist(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<ArtistRequest>,
) -> Response {
    let artist = match req.into_new_artist() {
        Ok(artist) => artist,
        Err(message) => return redirect_with_flash(&format!("/artists/{}", id), message),
    };

    match db.update_artist(id, &artist) {
        Ok(true) => Redirect::to(&format!("/artists/{}", id)).into_response(),
        Ok(false) => redirect_with_flash(
            "/artists",
            &format!("Error! Details on Artist with ID: {} is not found.", id),
        ),
        Err(err) => {
            tracing::error!("Failed to update artist {}: {}", id, err);
            redirect_with_flash(
                &format!("/artists/{}", id),
                &format!("Error! issue faced while trying to update {}", artist.name),
            )
        }
    }
}
