//! # reeldrop: video-reel sharing backend
//!
//! `reeldrop` is the backend for a video-reel sharing product. Users upload
//! videos, wrap them in *reels* - a shareable package carrying a title,
//! description, privacy flag, delivery schedule, and a list of recipient
//! email addresses - and recipients receive delivery of the reel once its
//! contact email confirms via an emailed token.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL (via SQLx) for all persistence.
//!
//! The **API layer** ([`api`]) exposes a REST surface under `/v1`:
//! registration and profile management, video metadata registration, and the
//! reel lifecycle (create, confirm, update, soft-delete, recipient
//! management, and a cursor-paginated listing). Caller identity arrives via
//! a trusted proxy header resolved by the [`auth`] extractor - session
//! handling itself lives upstream.
//!
//! The **database layer** ([`db`]) uses the repository pattern: one
//! repository per aggregate (users, videos, reels) wrapping a
//! `&mut PgConnection`, returning models from [`db::models`] and classified
//! errors from [`db::errors`]. Reads never see soft-deleted rows; writes are
//! guarded by affected-row-count checks.
//!
//! Two storage details are worth knowing about. A reel's recipients are not
//! rows: they live inside the reel's JSONB `recipients` column, encoded and
//! decoded by [`db::models::reels::Recipients`], which silently drops
//! soft-deleted entries on every read. And listings are cursor-paginated
//! over ULID ids ([`api::models::pagination`]): the query layer fetches one
//! row past the page size, so "has more pages" falls out of the row count
//! without a separate count query.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use reeldrop::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = reeldrop::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     reeldrop::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Migrations run automatically on startup; see the [`config`] module for
//! configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::openapi::ApiDoc;
use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
pub use config::Config;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// Holds the PostgreSQL connection pool and the configuration loaded at
/// startup; there is no other shared mutable state between requests.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the reeldrop database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration; `None` when no origins are allowed.
fn create_cors_layer(config: &Config) -> anyhow::Result<Option<CorsLayer>> {
    if config.cors.allowed_origins.is_empty() {
        return Ok(None);
    }

    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    ))
}

/// Build the application router with all endpoints and middleware.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/v1/users", post(api::handlers::users::register))
        .route("/v1/me", get(api::handlers::users::get_me).patch(api::handlers::users::update_me))
        .route("/v1/videos", post(api::handlers::videos::create_video))
        .route("/v1/videos/{id}", get(api::handlers::videos::get_video))
        .route(
            "/v1/reels",
            get(api::handlers::reels::list_reels).post(api::handlers::reels::create_reel),
        )
        .route("/v1/reels/confirm", post(api::handlers::reels::confirm_reel))
        .route(
            "/v1/reels/{id}",
            get(api::handlers::reels::get_reel)
                .put(api::handlers::reels::update_reel)
                .delete(api::handlers::reels::delete_reel),
        )
        .route("/v1/reels/{id}/recipients", post(api::handlers::reels::add_recipients))
        .route(
            "/v1/reels/{id}/recipients/{recipient_id}",
            delete(api::handlers::reels::delete_recipient),
        )
        .with_state(state.clone());

    let mut router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    if let Some(cors_layer) = create_cors_layer(&state.config)? {
        router = router.layer(cors_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the pool and runs migrations
/// 2. **Serve**: [`Application::serve`] binds the listener and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.pool.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.database.pool.acquire_timeout_secs))
            .connect(&config.database.url)
            .await?;

        migrator().run(&pool).await?;

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("reeldrop listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
