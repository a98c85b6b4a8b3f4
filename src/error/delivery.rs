//! Delivery failure classification.
//!
//! Any failure to resolve a channel evicts its subscription. Once a channel resolved,
//! only a permission failure evicts; everything else during send is transient and only
//! logged.

use thiserror::Error;

/// Failure while resolving, sending to or publishing in a Discord channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The bot is not allowed to view or post in the channel (HTTP 403).
    #[error("Missing permission: {0}")]
    PermissionDenied(String),

    /// The channel no longer exists or cannot be resolved (HTTP 404).
    #[error("Channel not found: {0}")]
    NotFound(String),

    /// Network hiccup, rate limit, unexpected content or any other failure.
    #[error("{0}")]
    Transient(String),
}

impl DeliveryError {
    /// Returns true if a failed send should evict the subscription.
    pub fn is_permanent(&self) -> bool {
        matches!(self, DeliveryError::PermissionDenied(_))
    }

    /// Classifies an HTTP status code returned by Discord.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            403 => DeliveryError::PermissionDenied(message.into()),
            404 => DeliveryError::NotFound(message.into()),
            _ => DeliveryError::Transient(message.into()),
        }
    }
}

/// Classifies a serenity error by the HTTP status Discord responded with.
///
/// Errors without a Discord response (connection failures, decode errors) are
/// transient.
impl From<serenity::Error> for DeliveryError {
    fn from(err: serenity::Error) -> Self {
        use serenity::http::HttpError;

        let message = err.to_string();
        match &err {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                DeliveryError::from_status(response.status_code.as_u16(), message)
            }
            _ => DeliveryError::Transient(message),
        }
    }
}
