use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to convert Unix timestamp to Discord timestamp
    ///
    /// Occurs when a valid Unix timestamp cannot be converted to Discord's
    /// timestamp format, typically due to timestamp being out of range.
    #[error("Failed to convert Unix timestamp {timestamp} to Discord timestamp: {reason}")]
    InvalidDiscordTimestamp {
        /// The Unix timestamp that failed to convert
        timestamp: i64,
        /// The reason for conversion failure
        reason: String,
    },

    /// Failure to build a public media URL from the configured base URL
    #[error("Failed to build media URL for '{file_name}': {source}")]
    InvalidMediaUrl {
        /// The file name that was joined onto the base URL
        file_name: String,
        /// The underlying URL parse error
        #[source]
        source: url::ParseError,
    },

    /// The notification dispatcher stopped consuming the feed
    #[error("Notification feed is closed")]
    FeedClosed,
}
