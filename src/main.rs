use anyhow::Result;
use promo_engine::config::config_loader;
use promo_engine::domain::clock::SystemClock;
use promo_engine::infrastructure::axum_http::http_serve;
use promo_engine::infrastructure::in_memory::promo_codes::InMemoryPromoCodeStore;
use promo_engine::infrastructure::postgres::{
    postgres_connection, repositories::promo_codes::PromoCodePostgres,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Promo engine exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    promo_engine::observability::init_observability("promo-engine")?;

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!(stage = %config_loader::get_stage(), "ENV has been loaded");

    let clock = Arc::new(SystemClock);

    match dotenvy_env.database.url.as_deref() {
        Some(database_url) => {
            let postgres_pool = postgres_connection::establish_connection(
                database_url,
                dotenvy_env.database.max_connections,
            )?;
            info!("Postgres connection has been established");

            let promo_code_repository = Arc::new(PromoCodePostgres::new(Arc::new(postgres_pool)));
            http_serve::start(dotenvy_env, promo_code_repository, clock).await?;
        }
        None => {
            warn!("DATABASE_URL is not set; promo codes are kept in memory and lost on restart");

            let promo_code_repository = Arc::new(InMemoryPromoCodeStore::new());
            http_serve::start(dotenvy_env, promo_code_repository, clock).await?;
        }
    }

    Ok(())
}
