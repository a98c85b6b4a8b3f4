use std::{str::FromStr, time::Duration};

use url::Url;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_MEDIA_FOLDER: &str = "ucube/";
const DEFAULT_MEDIA_PUBLIC_URL: &str = "https://images.irenebot.com/ucube/";
const DEFAULT_SEND_DELAY_MS: u64 = 2000;
const DEFAULT_NOTIFICATION_QUEUE_CAPACITY: usize = 32;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub command_prefix: String,

    /// Translation endpoint; translations are skipped when unset.
    pub translation_url: Option<String>,
    pub translation_key: String,

    /// Local folder media is downloaded into.
    pub media_folder: String,
    /// Public URL the media folder is served from.
    pub media_public_url: Url,
    /// Attach downloaded media directly instead of linking the public URL.
    pub upload_from_host: bool,

    /// Minimum delay between two channel deliveries of the same notification.
    pub send_delay: Duration,
    pub notification_queue_capacity: usize,
    /// Drop and reseed the subscription table from the loaded cache on startup.
    pub rebuild_subscriptions: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            command_prefix: std::env::var("COMMAND_PREFIX")
                .unwrap_or_else(|_| DEFAULT_COMMAND_PREFIX.to_string()),
            translation_url: std::env::var("TRANSLATION_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            translation_key: std::env::var("TRANSLATION_KEY").unwrap_or_default(),
            media_folder: std::env::var("UCUBE_FOLDER_LOCATION")
                .unwrap_or_else(|_| DEFAULT_MEDIA_FOLDER.to_string()),
            media_public_url: parsed_or("MEDIA_PUBLIC_URL", || {
                Url::parse(DEFAULT_MEDIA_PUBLIC_URL).map_err(|e| ConfigError::InvalidEnvVar {
                    name: "MEDIA_PUBLIC_URL".to_string(),
                    value: DEFAULT_MEDIA_PUBLIC_URL.to_string(),
                    reason: e.to_string(),
                })
            })?,
            upload_from_host: parsed_or("UPLOAD_FROM_HOST", || Ok(false))?,
            send_delay: Duration::from_millis(parsed_or("SEND_DELAY_MS", || {
                Ok(DEFAULT_SEND_DELAY_MS)
            })?),
            notification_queue_capacity: parsed_or("NOTIFICATION_QUEUE_CAPACITY", || {
                Ok(DEFAULT_NOTIFICATION_QUEUE_CAPACITY)
            })?,
            rebuild_subscriptions: parsed_or("REBUILD_SUBSCRIPTIONS", || Ok(false))?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Parses an optional environment variable, falling back to `default` when unset.
fn parsed_or<T, F>(name: &str, default: F) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: FnOnce() -> Result<T, ConfigError>,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
                reason: e.to_string(),
            }),
        Err(_) => default(),
    }
}
