#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the fire map dashboard.
//!
//! Serves the aggregate, cause, coverage, and correlation endpoints the
//! single-page frontend renders. The coordinate lookup is loaded once
//! at startup; when it cannot be loaded, the map endpoints return 503
//! while the non-geographic endpoints keep working.

mod cache;
mod handlers;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use fire_map_geography::CoordinateLookup;
use fire_map_source::registry;
use fire_map_source::source_def::SourceDefinition;

pub use cache::FetchCache;

/// Source definition ID served by this deployment.
const SOURCE_ID: &str = "boyaca_incendios";

/// Shared application state.
pub struct AppState {
    /// The configured incident data source.
    pub definition: SourceDefinition,
    /// Coordinate lookup, `None` when loading failed at startup (map
    /// features disabled, non-geographic views still served).
    pub lookup: Option<Arc<CoordinateLookup>>,
    /// Memoized last fetch, keyed by the fetch filter set.
    pub cache: Mutex<FetchCache>,
}

/// Starts the fire map API server.
///
/// Loads the coordinate lookup and the source registry, then binds the
/// Actix-Web HTTP server. This is a regular async function; the caller
/// provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the embedded source registry does not contain the
/// configured source (a build-time invariant).
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let definition = registry::find_source(SOURCE_ID)
        .unwrap_or_else(|| panic!("source {SOURCE_ID} missing from the embedded registry"));
    log::info!("Serving data source: {}", definition.name);

    let lookup = match CoordinateLookup::load() {
        Ok(lookup) => {
            log::info!("Coordinate lookup ready ({} municipalities)", lookup.len());
            Some(Arc::new(lookup))
        }
        Err(e) => {
            log::error!("Failed to load coordinate lookup, map features disabled: {e}");
            None
        }
    };

    let state = web::Data::new(AppState {
        definition,
        lookup,
        cache: Mutex::new(FetchCache::new()),
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
                    .route("/aggregates", web::get().to(handlers::aggregates))
                    .route("/causes", web::get().to(handlers::causes))
                    .route("/coverage", web::get().to(handlers::coverage))
                    .route("/correlation", web::get().to(handlers::correlation)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
