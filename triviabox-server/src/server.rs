//! Axum server setup and router configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    routing::{delete, get, post},
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
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Database file path (default: ~/.triviabox/trivia.db)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 5000,
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
            .join(".triviabox")
            .join("trivia.db")
    });

    info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let app = create_router(db, args.timeout);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Starting triviabox-server on http://{}", addr);

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
        .route("/categories", get(routes::list_categories))
        .route(
            "/categories/{id}/questions",
            get(routes::questions_by_category),
        )
        .route(
            "/questions",
            get(routes::list_questions).post(routes::create_question),
        )
        .route("/questions/{id}", delete(routes::delete_question))
        .route("/questions/search", post(routes::search_questions))
        .route("/quizzes", post(routes::play_quiz))
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
