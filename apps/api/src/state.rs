use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::FallbackInvoker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: FallbackInvoker,
    pub config: Config,
}
