#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the house price dashboard.
//!
//! Serves the REST API for county lookups, the highlighted county map and
//! price predictions, plus the static dashboard page under `app/`. The
//! housing dataset, county dataset and model are loaded on first use and
//! shared by every worker for the life of the process.

mod handlers;
pub mod interactive;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use house_price_prediction::{ArtifactStore, paths};

/// Shared application state.
pub struct AppState {
    /// Lazily loaded artifacts.
    pub artifacts: Arc<ArtifactStore>,
}

/// Network and static file configuration for [`run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
    /// Directory holding the dashboard page.
    pub app_dir: PathBuf,
}

impl ServerConfig {
    /// Reads `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `8080`).
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            bind_addr,
            port,
            app_dir: paths::project_root().join("app"),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error))
            .route("/health", web::get().to(handlers::health))
            .route("/regions", web::get().to(handlers::regions))
            .route("/map", web::get().to(handlers::map))
            .route("/predict", web::post().to(handlers::predict))
            .route("/dataset", web::get().to(handlers::dataset))
            .route("/input-bounds", web::get().to(handlers::input_bounds)),
    );
}

/// Starts the house price API server.
///
/// Artifacts are not read here; the first request that needs one loads
/// it. This is a regular async function; the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig, artifacts: Arc<ArtifactStore>) -> std::io::Result<()> {
    let state = web::Data::new(AppState { artifacts });

    let ServerConfig {
        bind_addr,
        port,
        app_dir,
    } = config;

    log::info!(
        "Serving artifacts from {}",
        state.artifacts.paths().regions.display()
    );
    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve the dashboard page
            .service(Files::new("/", app_dir.clone()).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
