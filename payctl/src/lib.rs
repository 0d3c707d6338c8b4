//! # payctl: Employee Benefits Control Plane
//!
//! `payctl` records employees and their dependents, holds one global benefits configuration,
//! and estimates what each employee takes home after benefit costs.
//!
//! ## Overview
//!
//! The server is a thin HTTP JSON layer over PostgreSQL. A single configuration row carries the
//! salary per paycheck, the number of paychecks per year, the yearly benefit cost of an
//! employee and of a dependent, and the discount granted to anyone whose name starts with an
//! `A`. Employees own an ordered list of dependents; the order the caller sends is the order
//! that is stored and returned.
//!
//! The estimate itself is computed client-side by [`calculation`], so an editing form can
//! recompute it on every keystroke without a round trip. [`client`] provides the typed HTTP
//! client and that editing session.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Requests flow through
//! a tracing layer and CORS, reach a handler in [`api::handlers`], which validates the body
//! (see [`validation`]), acquires a pooled connection and calls a repository in
//! [`db::handlers`]. Repositories own transaction boundaries: creating, replacing and deleting an
//! employee together with its dependents each happen in one transaction.
//!
//! On startup the application runs the embedded migrations and provisions the configuration row
//! from the `seed` section of the config if no row exists yet.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use payctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = payctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     payctl::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Point `DATABASE_URL` (or `database.url` in `config.yaml`) at a PostgreSQL database.
//! Migrations under `migrations/` run automatically on startup.

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

use crate::config::{CorsOrigin, PoolSettings};
use crate::db::handlers::Configurations;
use crate::openapi::ApiDoc;
use axum::{
    Json, Router,
    http::{self, HeaderValue, Method},
    routing::get,
};
use bon::Builder;
pub use config::Config;
use sqlx::{ConnectOptions, PgPool, postgres::PgConnectOptions, postgres::PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{DependentId, EmployeeId};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the payctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Provision the benefits configuration row from the `seed` config section.
///
/// Idempotent: an existing row, including one edited through the API, is left untouched.
#[instrument(skip_all)]
pub async fn seed_database(seed: &config::SeedConfig, db: &PgPool) -> anyhow::Result<()> {
    let mut conn = db.acquire().await?;
    let mut repo = Configurations::new(&mut conn);

    if repo.seed(&seed.into()).await? {
        info!("Seeded benefits configuration");
    } else {
        debug!("Benefits configuration already present, skipping seed");
    }
    Ok(())
}

fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    let optional = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(optional(settings.idle_timeout_secs))
        .max_lifetime(optional(settings.max_lifetime_secs))
}

/// Connect to the database, run migrations and provision the configuration row.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    info!("Connecting to database");
    let connect_options = PgConnectOptions::from_str(&config.database.url)?.log_slow_statements(
        log::LevelFilter::Warn,
        Duration::from_millis(config.slow_statement_threshold_ms),
    );
    let pool = pool_options(&config.database.pool).connect_with(connect_options).await?;

    prepare_database(config, &pool).await?;
    Ok(pool)
}

async fn prepare_database(config: &Config, pool: &PgPool) -> anyhow::Result<()> {
    migrator().run(pool).await?;
    seed_database(&config.seed, pool).await
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let allowed = &config.cors.allowed_origins;
    let allow_origin = if allowed.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::with_capacity(allowed.len());
        for origin in allowed {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry the trailing slash that Url adds
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE]);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// - `/api/configuration` and `/api/employee/*` JSON endpoints
/// - `/api/openapi.json` and the Scalar viewer at `/api/docs`
/// - `/healthz` liveness probe
/// - CORS and request tracing layers
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    use api::handlers::{configuration, employees};

    let cors = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        .route(
            "/configuration",
            get(configuration::get_configuration).put(configuration::update_configuration),
        )
        .route("/employee", axum::routing::post(employees::create_employee))
        .route("/employee/manage", get(employees::list_employees))
        .route(
            "/employee/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state);

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// The assembled server: router, state and database pool.
///
/// 1. **Create**: [`Application::new`] connects, runs migrations and seeds the configuration
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests finish and the pool
///    is closed
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application, reusing `pool` instead of connecting when one is given.
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!("Starting payctl with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => {
                prepare_database(&config, &pool).await?;
                pool
            }
            None => setup_database(&config).await?,
        };

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "payctl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
