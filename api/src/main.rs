use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use mp_api::{create_app, AppState};
use mp_infra::database::{
    DatabasePool, MySqlOfferRepository, MySqlOrderRepository, MySqlProviderRepository,
    MySqlServiceCategoryRepository, MySqlUserRepository,
};
use mp_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // `MP_CONFIG_FILE` selects a TOML file; otherwise plain environment variables
    let config = match std::env::var("MP_CONFIG_FILE") {
        Ok(path) => AppConfig::load(&path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        Err(_) => {
            let config = AppConfig::from_env().context("invalid configuration")?;
            config.validate().context("invalid configuration")?;
            config
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    )
    .format_module_path(config.logging.source_location)
    .init();

    info!("Starting marketplace API ({:?})", config.environment);
    if config.auth.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to apply database migrations")?;
    info!("{}", pool.get_statistics());

    let sql = pool.get_pool().clone();
    let state = AppState::new(
        Arc::new(MySqlOrderRepository::new(sql.clone())),
        Arc::new(MySqlOfferRepository::new(sql.clone())),
        Arc::new(MySqlUserRepository::new(sql.clone())),
        Arc::new(MySqlProviderRepository::new(sql.clone())),
        Arc::new(MySqlServiceCategoryRepository::new(sql)),
        config.workflow.clone(),
    )
    .with_health_check(Arc::new(pool.clone()));
    let state = web::Data::new(state);
    info!("Order transitions use the {:?} policy", config.workflow.policy);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
