#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the ward AQI dashboard.
//!
//! Serves the JSON API consumed by the map and chart frontend, plus the
//! built frontend bundle itself when it is present on disk. The dataset is
//! loaded once at startup and shared read-only; citizen suggestions are
//! kept in process memory only.

mod handlers;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use ward_aqi_dataset::{Dataset, DatasetError};
use ward_aqi_suggestions::SuggestionStore;

/// Directory the frontend bundle is served from when `STATIC_DIR` is unset.
pub const DEFAULT_STATIC_DIR: &str = "app/dist";

/// Shared application state.
pub struct AppState {
    /// Fixture data, read-only after startup.
    pub dataset: Arc<Dataset>,
    /// Citizen suggestions. The only mutable state in the server.
    pub suggestions: Mutex<SuggestionStore>,
}

impl AppState {
    /// Creates state over `dataset` with an empty suggestion store.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            suggestions: Mutex::new(SuggestionStore::new()),
        }
    }
}

/// Loads fixtures from `data_dir`, or the bundled fixtures when `None`.
///
/// # Errors
///
/// Returns a [`DatasetError`] if any fixture is missing, malformed, or
/// fails validation.
pub fn load_dataset(data_dir: Option<&Path>) -> Result<Dataset, DatasetError> {
    match data_dir {
        Some(dir) => Dataset::load_dir(dir),
        None => {
            log::info!("Loading bundled fixtures...");
            Dataset::bundled()
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error))
            .route("/health", web::get().to(handlers::health))
            .route("/legend", web::get().to(handlers::legend))
            .route("/stats", web::get().to(handlers::stats))
            .route("/wards", web::get().to(handlers::wards))
            .route("/wards/{id}", web::get().to(handlers::ward_detail))
            .route("/wards/{id}/sources", web::get().to(handlers::ward_sources))
            .route("/wards/{id}/trends", web::get().to(handlers::ward_trends))
            .route("/wards/{id}/prediction", web::get().to(handlers::ward_prediction))
            .route("/wards/{id}/actions", web::get().to(handlers::ward_actions))
            .route("/wards/{id}/policies", web::get().to(handlers::ward_policies))
            .route("/wards/{id}/suggestions", web::get().to(handlers::list_suggestions))
            .route("/wards/{id}/suggestions", web::post().to(handlers::submit_suggestion))
            .route("/wards/{id}/report", web::get().to(handlers::ward_report))
            .route("/actions/{pollutant}", web::get().to(handlers::pollutant_actions))
            .route("/suggestions/categories", web::get().to(handlers::suggestion_categories))
            .route("/data", web::get().to(handlers::data_files))
            .route("/data/{file}", web::get().to(handlers::data_file)),
    );
}

/// Starts the ward AQI API server.
///
/// Reads `BIND_ADDR`, `PORT`, `DATA_DIR` and `STATIC_DIR` from the
/// environment, loads and validates the dataset, and runs the Actix-Web
/// HTTP server. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if the dataset fails to load, or if the HTTP server
/// fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir = std::env::var("DATA_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from);
    let dataset = load_dataset(data_dir.as_deref()).map_err(|e| {
        log::error!("Failed to load dataset: {e}");
        std::io::Error::other(e)
    })?;

    let state = web::Data::new(AppState::new(dataset));

    let static_dir = PathBuf::from(
        std::env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
    );
    let static_dir = if static_dir.is_dir() {
        Some(static_dir)
    } else {
        log::warn!(
            "Static directory {} not found, serving API only",
            static_dir.display()
        );
        None
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure);

        // Serve frontend static files (production)
        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
