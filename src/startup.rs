use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    error::AppError,
    service::translation::{HttpTranslator, NoTranslator, Translator},
    util::backoff::{retry_forever, BackoffConfig, ExponentialBackoff},
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the subscription table exists before the
/// cache is loaded. Blocks until both succeed, retrying with backoff while the
/// database is unreachable.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `DatabaseConnection` - Connected database with migrations applied
pub async fn connect_to_database(config: &Config) -> sea_orm::DatabaseConnection {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, DbErr};

    let backoff = ExponentialBackoff::with_config(BackoffConfig {
        initial_delay_ms: 1_000,
        max_delay_ms: 30_000,
        ..BackoffConfig::default()
    });

    retry_forever("Database connection", backoff, move || async move {
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.sqlx_logging(false);

        let db = Database::connect(opt).await?;
        Migrator::up(&db, None).await?;

        Ok::<_, DbErr>(db)
    })
    .await
}

/// Builds the HTTP client used for media downloads and translation.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend failed to initialize
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()?;

    Ok(client)
}

/// Picks the translator for post content.
///
/// Falls back to no translation when no endpoint is configured.
pub fn setup_translator(config: &Config, client: reqwest::Client) -> Arc<dyn Translator> {
    match &config.translation_url {
        Some(endpoint) => Arc::new(HttpTranslator::new(
            client,
            endpoint.clone(),
            config.translation_key.clone(),
        )),
        None => {
            tracing::warn!("TRANSLATION_URL is not set, posts will not be translated");
            Arc::new(NoTranslator)
        }
    }
}
