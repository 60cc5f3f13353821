//! Show routes - flat listing and create

use axum::{
    extract::State,
    response::Response,
    Json,
};

use crate::db::Database;
use crate::error::ServerResult;
use crate::flash::redirect_with_flash;
use crate::models::{format_start_time, ShowListing, ShowRequest};

/// GET /shows - every show with both of its entities
pub async fn list_shows(State(db): State<Database>) -> ServerResult<Json<Vec<ShowListing>>> {
    let shows = db
        .list_shows()?
        .into_iter()
        .map(ShowListing::from)
        .collect();
    Ok(Json(shows))
}

/// POST /shows/create - insert one show, then redirect home
pub async fn create_show(State(db): State<Database>, Json(req): Json<ShowRequest>) -> Response {
    let show = match req.into_new_show() {
        Ok(show) => show,
        Err(message) => return redirect_with_flash("/", message),
    };

    match db.create_show(&show) {
        Ok(_) => redirect_with_flash(
            "/",
            &format!(
                "Show to be held in {} is successfully listed!",
                format_start_time(show.start_time)
            ),
        ),
        Err(err) => {
            tracing::error!("Failed to create show: {}", err);
            redirect_with_flash("/", "Error! Show could not be listed.")
        }
    }
}
