//! Axum server setup and router configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db::Database;
use crate::routes;

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3030")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Database file path (default: ~/.gigline/gigline.db)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 3030,
            bind: "127.0.0.1".to_string(),
            db_path: None,
            timeout: 30,
        }
    }
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    let db_path = args.db_path.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gigline")
            .join("gigline.db")
    });

    info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let app = create_router(db, args.timeout);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Starting gigline-server on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(db: Database, timeout_secs: u64) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors);

    Router::new()
        .route("/", get(routes::health_check))
        .route("/health", get(routes::health_check))
        // Venues
        .route("/venues", get(routes::list_venues))
        .route("/venues/search", post(routes::search_venues))
        .route("/venues/create", post(routes::create_venue))
        .route("/venues/{id}", get(routes::show_venue))
        .route("/venues/{id}/edit", post(routes::edit_venue))
        // Artists
        .route("/artists", get(routes::list_artists))
        .route("/artists/search", post(routes::search_artists))
        .route("/artists/create", post(routes::create_artist))
        .route("/artists/{id}", get(routes::show_artist))
        .route("/artists/{id}/edit", post(routes::edit_artist))
        // Shows
        .route("/shows", get(routes::list_shows))
        .route("/shows/create", post(routes::create_show))
        .with_state(db)
        .layer(middleware)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::models::{ArtistRequest, ShowRequest, VenueRequest};

    fn test_app() -> (Router, Database) {
        let db = Database::open_in_memory().unwrap();
        (create_router(db.clone(), 30), db)
    }

    fn seed_venue(db: &Database, name: &str, city: &str, state: &str) -> i64 {
        db.create_venue(
            &VenueRequest {
                name: Some(name.to_string()),
                city: Some(city.to_string()),
                state: Some(state.to_string()),
                address: Some("1015 Folsom Street".to_string()),
                phone: None,
                image_link: Some("https://example.com/venue.jpg".to_string()),
                genres: vec!["Jazz".to_string()],
                facebook_link: None,
                website: None,
                seeking_talent: false,
                seeking_description: None,
            }
            .into_new_venue()
            .unwrap(),
        )
        .unwrap()
    }

    fn seed_artist(db: &Database, name: &str) -> i64 {
        db.create_artist(
            &ArtistRequest {
                name: Some(name.to_string()),
                city: Some("San Francisco".to_string()),
                state: Some("CA".to_string()),
                phone: None,
                image_link: Some("https://example.com/artist.jpg".to_string()),
                genres: vec!["Rock n Roll".to_string()],
                facebook_link: None,
                website: None,
                seeking_venue: false,
                seeking_description: None,
            }
            .into_new_artist()
            .unwrap(),
        )
        .unwrap()
    }

    fn seed_show(db: &Database, artist_id: i64, venue_id: i64, start: &str) {
        db.create_show(
            &ShowRequest {
                artist_id: Some(artist_id),
                venue_id: Some(venue_id),
                start_time: Some(start.to_string()),
            }
            .into_new_show()
            .unwrap(),
        )
        .unwrap();
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get("location")
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, location, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _db) = test_app();
        let (status, _, body) = send(app, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn venues_group_by_location() {
        let (app, db) = test_app();
        seed_venue(&db, "The Musical Hop", "San Francisco", "CA");
        seed_venue(&db, "The Dueling Pianos Bar", "New York", "NY");
        seed_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA");

        let (status, _, body) = send(app, get("/venues")).await;

        assert_eq!(status, StatusCode::OK);
        let groups = body.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["state"], "CA");
        assert_eq!(groups[0]["venues"].as_array().unwrap().len(), 2);
        assert_eq!(groups[1]["city"], "New York");
    }

    #[tokio::test]
    async fn venue_search_matches_case_insensitive_substrings() {
        let (app, db) = test_app();
        seed_venue(&db, "The Musical Hop", "San Francisco", "CA");
        seed_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA");
        seed_venue(&db, "The Dueling Pianos Bar", "New York", "NY");

        let (status, _, body) =
            send(app.clone(), post_form("/venues/search", "search_term=Hop")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["name"], "The Musical Hop");

        let (_, _, body) =
            send(app.clone(), post_form("/venues/search", "search_term=Music")).await;
        assert_eq!(body["count"], 2);

        // An empty term matches every venue.
        let (_, _, body) = send(app, post_form("/venues/search", "search_term=")).await;
        assert_eq!(body["count"], 3);
    }

    #[tokio::test]
    async fn venue_detail_partitions_show_history() {
        let (app, db) = test_app();
        let venue_id = seed_venue(&db, "The Musical Hop", "San Francisco", "CA");
        let artist_id = seed_artist(&db, "Guns N Petals");
        seed_show(&db, artist_id, venue_id, "2015-05-21 21:30:00");
        seed_show(&db, artist_id, venue_id, "2035-05-21 21:30:00");

        let (status, _, body) = send(app, get(&format!("/venues/{}", venue_id))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "The Musical Hop");
        assert_eq!(body["past_shows_count"], 1);
        assert_eq!(body["upcoming_shows_count"], 1);
        assert_eq!(body["past_shows"][0]["artist_name"], "Guns N Petals");
        assert_eq!(body["past_shows"][0]["start_time"], "2015-05-21 21:30:00");
        assert_eq!(body["upcoming_shows"][0]["artist_id"], artist_id);
    }

    #[tokio::test]
    async fn missing_venue_redirects_with_flash() {
        let (app, _db) = test_app();
        let (status, location, _) = send(app, get("/venues/999")).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = location.unwrap();
        assert!(location.starts_with("/venues?flash="));
        assert!(location.contains("999"));
    }

    #[tokio::test]
    async fn create_venue_persists_and_flashes_success() {
        let (app, db) = test_app();

        let (status, location, _) = send(
            app,
            post_json(
                "/venues/create",
                json!({
                    "name": "The Musical Hop",
                    "city": "San Francisco",
                    "state": "CA",
                    "address": "1015 Folsom Street",
                    "genres": ["Jazz", "Reggae"],
                    "seeking_talent": true
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(location.unwrap().contains("successfully%20listed"));

        let venues = db.search_venues("Musical Hop").unwrap();
        assert_eq!(venues.len(), 1);
    }

    #[tokio::test]
    async fn create_venue_with_missing_fields_flashes_an_error() {
        let (app, db) = test_app();

        let (status, location, _) = send(
            app,
            post_json("/venues/create", json!({"city": "San Francisco"})),
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(location.unwrap().contains("flash="));
        assert!(db.search_venues("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_venue_overwrites_the_record() {
        let (app, db) = test_app();
        let venue_id = seed_venue(&db, "The Musical Hop", "San Francisco", "CA");

        let (status, location, _) = send(
            app,
            post_json(
                &format!("/venues/{}/edit", venue_id),
                json!({
                    "name": "The Musical Hop Annex",
                    "city": "Oakland",
                    "state": "CA",
                    "address": "6000 Shellmound St"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.unwrap(), format!("/venues/{}", venue_id));

        let venue = db.get_venue(venue_id).unwrap().unwrap();
        assert_eq!(venue.name, "The Musical Hop Annex");
        assert_eq!(venue.city, "Oakland");
    }

    #[tokio::test]
    async fn edit_missing_venue_redirects_with_flash() {
        let (app, _db) = test_app();

        let (status, location, _) = send(
            app,
            post_json(
                "/venues/500/edit",
                json!({
                    "name": "Ghost Hall",
                    "city": "Nowhere",
                    "state": "KS",
                    "address": "0 Null Street"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(location.unwrap().starts_with("/venues?flash="));
    }

    #[tokio::test]
    async fn artist_listing_and_detail() {
        let (app, db) = test_app();
        let artist_id = seed_artist(&db, "Guns N Petals");
        let venue_id = seed_venue(&db, "The Musical Hop", "San Francisco", "CA");
        seed_show(&db, artist_id, venue_id, "2035-05-21 21:30:00");

        let (status, _, body) = send(app.clone(), get("/artists")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Guns N Petals");

        let (status, _, body) = send(app, get(&format!("/artists/{}", artist_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["upcoming_shows_count"], 1);
        assert_eq!(body["upcoming_shows"][0]["venue_name"], "The Musical Hop");
        assert_eq!(body["past_shows_count"], 0);
    }

    #[tokio::test]
    async fn artist_search_and_create() {
        let (app, db) = test_app();
        seed_artist(&db, "The Wild Sax Band");

        let (status, _, body) =
            send(app.clone(), post_form("/artists/search", "search_term=band")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);

        let (status, location, _) = send(
            app,
            post_json("/artists/create", json!({"name": "Matt Quevedo"})),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(location.unwrap().contains("successfully%20listed"));
        assert_eq!(db.list_artists().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn show_listing_joins_both_entities() {
        let (app, db) = test_app();
        let venue_id = seed_venue(&db, "The Musical Hop", "San Francisco", "CA");
        let artist_id = seed_artist(&db, "Guns N Petals");
        seed_show(&db, artist_id, venue_id, "2035-05-21 21:30:00");

        let (status, _, body) = send(app, get("/shows")).await;

        assert_eq!(status, StatusCode::OK);
        let shows = body.as_array().unwrap();
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0]["venue_name"], "The Musical Hop");
        assert_eq!(shows[0]["artist_name"], "Guns N Petals");
        assert_eq!(shows[0]["start_time"], "2035-05-21 21:30:00");
    }

    #[tokio::test]
    async fn create_show_requires_existing_references() {
        let (app, db) = test_app();
        let venue_id = seed_venue(&db, "The Musical Hop", "San Francisco", "CA");
        let artist_id = seed_artist(&db, "Guns N Petals");

        let (status, location, _) = send(
            app.clone(),
            post_json(
                "/shows/create",
                json!({
                    "artist_id": artist_id,
                    "venue_id": venue_id,
                    "start_time": "2035-05-21 21:30:00"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(location.unwrap().contains("successfully%20listed"));
        assert_eq!(db.list_shows().unwrap().len(), 1);

        // Unknown references fail the foreign key check and roll back.
        let (status, location, _) = send(
            app,
            post_json(
                "/shows/create",
                json!({
                    "artist_id": 12345,
                    "venue_id": venue_id,
                    "start_time": "2035-05-21 21:30:00"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(location.unwrap().contains("could%20not%20be%20listed"));
        assert_eq!(db.list_shows().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_shows_are_allowed() {
        let (_app, db) = test_app();
        let venue_id = seed_venue(&db, "The Musical Hop", "San Francisco", "CA");
        let artist_id = seed_artist(&db, "Guns N Petals");
        seed_show(&db, artist_id, venue_id, "2035-05-21 21:30:00");
        seed_show(&db, artist_id, venue_id, "2035-05-21 21:30:00");

        assert_eq!(db.list_shows().unwrap().len(), 2);
    }
}
