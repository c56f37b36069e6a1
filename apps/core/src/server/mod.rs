//! # HTTP Server
//!
//! Axum router exposing the chat responder, content search, accounts,
//! journal and the transcription relay. The page at `/` is static; every
//! other route speaks JSON.

pub mod routes;
pub mod state;

pub use state::AppState;

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppError;

/// Router settings taken from `Config`.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Caps request bodies, which in practice only matters for `/transcribe`.
    pub max_upload_bytes: usize,
    /// CORS origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: 25 * 1024 * 1024,
            allowed_origins: Vec::new(),
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            allowed_origins: config.allowed_origins.clone(),
        }
    }
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return AllowOrigin::any();
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    AllowOrigin::list(values)
}

/// Builds the application router.
pub fn router(state: AppState, options: RouterOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&options.allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        // Pages
        .route("/", get(routes::index))
        .route("/login", get(routes::index).post(routes::login))
        .route("/health", get(routes::health))
        // Voice journal
        .route("/transcribe", post(routes::transcribe))
        // Chat and content
        .route("/chat", post(routes::chat))
        .route("/search", get(routes::search))
        .route("/categories", get(routes::categories))
        // Accounts
        .route("/signup", post(routes::sign_up))
        .route("/logout", post(routes::logout))
        .route("/session", get(routes::session))
        // Journal
        .route(
            "/journal",
            get(routes::journal_list).post(routes::journal_save),
        )
        .route("/journal/prompt", get(routes::journal_prompt))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds `address` and serves until Ctrl+C or SIGTERM.
pub async fn serve(address: &str, app: Router) -> Result<(), AppError> {
    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
