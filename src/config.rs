use crate::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_REGION: &str = "euw";
const DEFAULT_TIER: &str = "emerald_plus";
const DEFAULT_REQUESTS_PER_SECOND: u32 = 5;
const DEFAULT_LOG: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub stats_api_url: Option<String>,
    pub region: String,
    pub tier: String,
    pub cache_dir: PathBuf,
    pub requests_per_second: u32,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let stats_api_url = env::var("DRAFT_STATS_API_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let region = env::var("DRAFT_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let tier = env::var("DRAFT_TIER").unwrap_or_else(|_| DEFAULT_TIER.to_string());

        let cache_dir = env::var("DRAFT_CACHE_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(crate::cache::DiskCache::default_dir);

        let requests_per_second =
            parse_var("DRAFT_REQUESTS_PER_SECOND")?.unwrap_or(DEFAULT_REQUESTS_PER_SECOND);
        if requests_per_second == 0 {
            return Err(AppError::ConfigError(
                "DRAFT_REQUESTS_PER_SECOND must be at least 1".to_string(),
            ));
        }

        let log_filter = env::var("DRAFT_LOG").unwrap_or_else(|_| DEFAULT_LOG.to_string());

        Ok(Config {
            stats_api_url,
            region,
            tier,
            cache_dir,
            requests_per_second,
            log_filter,
        })
    }

    pub fn require_stats_api_url(&self) -> Result<&str, AppError> {
        self.stats_api_url.as_deref().ok_or_else(|| {
            AppError::ConfigError(
                "DRAFT_STATS_API_URL not found in environment or .env file".to_string(),
            )
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::ConfigError(format!("{} is not a valid number: {}", name, raw))),
        Err(_) => Ok(None),
    }
}
