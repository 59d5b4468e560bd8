#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the country compare application.
//!
//! Loads the curated country `GeoJSON` dataset into a spatial index at
//! startup, holds the single comparison session behind a mutex, and
//! exposes the click/clear/state API the static frontend drives. Chart
//! configs are built server-side and rendered by the frontend's
//! charting library; the two external data providers (flags, housing
//! price indexes) are queried from spawned tasks so a click never
//! blocks on the network.

mod handlers;
pub mod session;

use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use country_compare_geography::CountryIndex;

use session::CompareSession;

/// Shared application state.
pub struct AppState {
    /// Read-only spatial index over the country polygons.
    pub index: CountryIndex,
    /// The one mutable interaction session.
    pub session: Mutex<CompareSession>,
    /// Shared HTTP client for the external data providers.
    pub client: reqwest::Client,
    /// URL the frontend loads the country layer from.
    pub dataset_url: String,
}

/// Starts the country compare server.
///
/// Reads `BIND_ADDR`, `PORT`, `DATASET_PATH` and `ASSETS_DIR` from the
/// environment (with defaults), loads and indexes the dataset, and
/// starts the Actix-Web HTTP server. This is a regular async function —
/// the caller provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the dataset cannot be loaded.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let dataset_path = PathBuf::from(
        std::env::var("DATASET_PATH").unwrap_or_else(|_| "data/baltic.geojson".to_string()),
    );
    let assets_dir = std::env::var("ASSETS_DIR").unwrap_or_else(|_| "app/dist".to_string());

    log::info!("Loading country dataset from {}", dataset_path.display());
    let index = CountryIndex::load(&dataset_path).expect("Failed to load country dataset");

    let dataset_file = dataset_path
        .file_name()
        .map_or_else(|| "baltic.geojson".to_string(), |f| f.to_string_lossy().to_string());
    let data_dir = dataset_path
        .parent()
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let state = web::Data::new(AppState {
        index,
        session: Mutex::new(CompareSession::new()),
        client: reqwest::Client::new(),
        dataset_url: format!("/data/{dataset_file}"),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/map", web::get().to(handlers::map_config))
                    .route("/click", web::post().to(handlers::click))
                    .route("/clear", web::post().to(handlers::clear))
                    .route("/state", web::get().to(handlers::view_state)),
            )
            // Serve the country layer
            .service(Files::new("/data", data_dir.clone()))
            // Serve frontend static files (production)
            .service(Files::new("/", assets_dir.clone()).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
