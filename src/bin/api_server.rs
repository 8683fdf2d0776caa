// src/bin/api_server.rs

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use students_api::infra::{telemetry, Config};
use students_api::transport;
use students_api::SqliteStorage;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Student records HTTP API
#[derive(Parser, Debug)]
#[command(name = "students-api")]
#[command(version)]
struct Args {
    /// Path to a TOML config file (defaults to $CONFIG_PATH)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let args = Args::parse();

    // --- Configuration ---
    let config = Config::load(args.config.as_deref())?;
    let addr = config.socket_addr()?;

    // --- Storage Initialization ---
    let storage = SqliteStorage::open(&config.storage_path).await?;
    tracing::info!(
        env = %config.env,
        version = env!("CARGO_PKG_VERSION"),
        storage_path = %config.storage_path,
        "storage initialized"
    );

    let app_state = transport::http::AppState::new(Arc::new(storage.clone()));

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "server started");

    transport::http::serve(
        listener,
        app,
        transport::http::shutdown_signal(),
        config.shutdown_grace(),
    )
    .await?;

    if !storage.close_within(config.shutdown_grace()).await {
        tracing::warn!("storage pool still busy after grace period, exiting anyway");
    }
    tracing::info!("server shutdown successfully");
    Ok(())
}
