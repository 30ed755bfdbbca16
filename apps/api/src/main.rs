mod advisor;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::FallbackInvoker;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Advisor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and make sure the tables exist
    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;

    // Seed the course catalog on first boot, if a CSV was provided
    if let Some(csv_path) = &config.catalog_csv {
        if store::courses::count(&pool).await? == 0 {
            info!("Courses table is empty, seeding from {csv_path}...");
            let seeded = store::courses::seed_from_csv(&pool, csv_path).await?;
            info!("Seeded {seeded} unique courses");
        }
    }

    // Initialize the LLM invoker with the default model fallback chain
    let llm = FallbackInvoker::anthropic(config.anthropic_api_key.clone());
    info!(
        "LLM invoker initialized (models: {})",
        llm_client::MODEL_CHAIN.join(" -> ")
    );

    // Build app state
    let state = AppState {
        db: pool,
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
