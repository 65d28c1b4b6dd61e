use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::password::{HashCost, PasswordHasher};
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;
    info!("database ready");

    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.access_token_ttl_seconds,
    ));
    let hasher = PasswordHasher::new(HashCost::default())
        .map_err(|err| anyhow!("password hasher init failed: {err}"))?;

    let state = AppState::new(pool, jwt, hasher, settings.refresh_token_ttl_seconds);
    server::run_http(&settings, state).await
}
