//! EMS Server - Equipment Management System
//!
//! REST API server for lending company devices to employees.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ems_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("ems_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting EMS Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let repository = Repository::new(pool);
    let services = Services::new(repository.clone());

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        repository,
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Branches
        .route(
            "/branches",
            get(api::branches::list_branches).post(api::branches::create_branch),
        )
        .route(
            "/branches/:id",
            get(api::branches::get_branch)
                .put(api::branches::update_branch)
                .delete(api::branches::delete_branch),
        )
        // Producers
        .route(
            "/producers",
            get(api::producers::list_producers).post(api::producers::create_producer),
        )
        .route(
            "/producers/:id",
            get(api::producers::get_producer)
                .put(api::producers::update_producer)
                .delete(api::producers::delete_producer),
        )
        // Device types
        .route(
            "/device-types",
            get(api::device_types::list_device_types).post(api::device_types::create_device_type),
        )
        .route(
            "/device-types/:id",
            get(api::device_types::get_device_type)
                .put(api::device_types::update_device_type)
                .delete(api::device_types::delete_device_type),
        )
        // Employees
        .route(
            "/employees",
            get(api::employees::list_employees).post(api::employees::create_employee),
        )
        .route(
            "/employees/:id",
            get(api::employees::get_employee)
                .put(api::employees::update_employee)
                .delete(api::employees::delete_employee),
        )
        .route("/employees/:id/loans/active", get(api::loans::get_employee_active_loans))
        .route("/employees/:id/loans/history", get(api::loans::get_employee_loan_history))
        // Devices
        .route(
            "/devices",
            get(api::devices::list_devices).post(api::devices::create_device),
        )
        .route("/devices/available", get(api::devices::list_available_devices))
        .route("/devices/producer/:id", get(api::devices::list_devices_by_producer))
        .route("/devices/type/:id", get(api::devices::list_devices_by_type))
        .route(
            "/devices/:id",
            get(api::devices::get_device)
                .put(api::devices::update_device)
                .delete(api::devices::delete_device),
        )
        // Loans
        .route("/loans", get(api::loans::list_loans).post(api::loans::create_loan))
        .route("/loans/active", get(api::loans::list_active_loans))
        .route(
            "/loans/:id",
            get(api::loans::get_loan)
                .put(api::loans::update_loan)
                .delete(api::loans::delete_loan),
        )
        .route("/loans/:id/return", post(api::loans::return_loan))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}
