use crate::analysis::champion_stats::ChampionStat;
use crate::api::endpoints::champion_slug;
use crate::api::models::{MatchupSheet, PlayerProfile};
use crate::api::provider::{StatsProvider, StatsQuery};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const TIER_LIST_TTL_MINS: u64 = 6 * 60;
pub const MATCHUPS_TTL_MINS: u64 = 12 * 60;
pub const PLAYER_TTL_MINS: u64 = 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheEntry<T> {
    pub key: String,
    pub fetched_at: DateTime<Utc>,
    pub records: T,
}

impl<T> CacheEntry<T> {
    pub fn new(key: &str, records: T) -> Self {
        CacheEntry {
            key: key.to_string(),
            fetched_at: Utc::now(),
            records,
        }
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.fetched_at);
        age.num_minutes() >= max_age_mins as i64
    }
}

/// JSON files under one directory, one per cache key.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DiskCache { dir: dir.into() }
    }

    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".draft_for_me")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }

    /// A missing or unreadable entry is a miss, not an error.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let path = self.path_for(key);
        let content = fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, entry: &CacheEntry<T>) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::CacheError(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.path_for(&entry.key);
        let json = serde_json::to_string_pretty(entry)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize cache: {}", e)))?;

        fs::write(&path, json).map_err(|e| {
            AppError::CacheError(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// Wraps a provider with the disk cache.
///
/// Fetches are single-flight per key: a second caller for the same key waits
/// for the first and then reads what it stored.
pub struct CachedProvider<P> {
    inner: P,
    disk: DiskCache,
    refresh: bool,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<P: StatsProvider> CachedProvider<P> {
    pub fn new(inner: P, disk: DiskCache) -> Self {
        CachedProvider {
            inner,
            disk,
            refresh: false,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Skip cache reads. Fresh results are still written back.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.key_locks
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn get_or_fetch<T, F, S>(
        &self,
        key: &str,
        ttl_mins: u64,
        should_store: S,
        fetch: F,
    ) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, AppError>,
        S: Fn(&T) -> bool,
    {
        let lock = self.key_lock(key);
        let _guard = lock.lock();

        if !self.refresh {
            if let Some(entry) = self.disk.load::<T>(key) {
                if !entry.is_stale(ttl_mins) {
                    tracing::info!(key, "cache hit");
                    return Ok(entry.records);
                }
                tracing::debug!(key, fetched_at = %entry.fetched_at, "cache entry is stale");
            }
        }

        let records = fetch()?;
        if should_store(&records) {
            let entry = CacheEntry::new(key, records);
            if let Err(e) = self.disk.save(&entry) {
                tracing::warn!(key, error = %e, "failed to write cache entry");
            }
            return Ok(entry.records);
        }
        Ok(records)
    }
}

pub fn tier_list_key(query: &StatsQuery) -> String {
    format!("tierlist_{}_{}_{}", query.region, query.tier, query.position())
}

pub fn matchups_key(champion: &str, role: &str, region: &str) -> String {
    format!("matchups_{}_{}_{}", champion_slug(champion), role, region)
}

pub fn player_key(summoner: &str, region: &str) -> String {
    format!("player_{}_{}", region, summoner.replace('#', "-"))
}

impl<P: StatsProvider> StatsProvider for CachedProvider<P> {
    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn fetch_champion_stats(&self, query: &StatsQuery) -> Result<Vec<ChampionStat>, AppError> {
        self.get_or_fetch(
            &tier_list_key(query),
            TIER_LIST_TTL_MINS,
            |stats: &Vec<ChampionStat>| !stats.is_empty(),
            || self.inner.fetch_champion_stats(query),
        )
    }

    fn fetch_matchups(
        &self,
        champion: &str,
        role: &str,
        region: &str,
    ) -> Result<MatchupSheet, AppError> {
        self.get_or_fetch(
            &matchups_key(champion, role, region),
            MATCHUPS_TTL_MINS,
            |sheet: &MatchupSheet| !sheet.is_empty(),
            || self.inner.fetch_matchups(champion, role, region),
        )
    }

    fn fetch_player_profile(
        &self,
        summoner: &str,
        region: &str,
    ) -> Result<PlayerProfile, AppError> {
        self.get_or_fetch(
            &player_key(summoner, region),
            PLAYER_TTL_MINS,
            |_: &PlayerProfile| true,
            || self.inner.fetch_player_profile(summoner, region),
        )
    }
}
