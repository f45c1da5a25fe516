use thiserror::Error;

/// Failures of the upstream stats layer. Scoring itself never fails.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Rate limited by the stats provider, please try again later")]
    RateLimited,

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No champion stats returned for {0}")]
    NoChampionStats(String),
}
