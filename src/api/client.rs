use crate::analysis::champion_stats::ChampionStat;
use crate::config::Config;
use crate::error::AppError;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints::{champion_slug, join_url, CHAMPION_STATS_PATH, MATCHUPS_PATH, PLAYER_PATH};
use super::models::{MatchupSheet, PlayerProfile};
use super::provider::{StatsProvider, StatsQuery};

const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = "draft_for_me/0.1.0";

/// Client for the stats service that serves already-normalized records.
pub struct HttpStatsProvider {
    base_url: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl HttpStatsProvider {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let base_url = config.require_stats_api_url()?.to_string();
        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(HttpStatsProvider {
            base_url,
            rate_limiter,
            clock: DefaultClock::default(),
        })
    }

    fn wait_for_slot(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request(&self, path: &str, query: &[(&str, &str)]) -> Result<String, AppError> {
        let url = join_url(&self.base_url, path);
        let mut retry_count = 0;

        loop {
            self.wait_for_slot();

            let mut request = ureq::get(&url).set("User-Agent", USER_AGENT);
            for (key, value) in query {
                request = request.query(key, value);
            }

            match request.call() {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    tracing::warn!(url = %url, wait_ms, "rate limited by stats provider, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(status, _)) => {
                    return Err(AppError::HttpStatus { url, status });
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let body = self.execute_request(path, query)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(format!("{}: {}", path, e)))
    }
}

impl StatsProvider for HttpStatsProvider {
    fn provider_name(&self) -> &'static str {
        "http_stats"
    }

    fn fetch_champion_stats(&self, query: &StatsQuery) -> Result<Vec<ChampionStat>, AppError> {
        let position = query.position();
        tracing::info!(region = %query.region, tier = %query.tier, position = %position, "fetching tier list");

        let stats: Vec<ChampionStat> = self.get_json(
            CHAMPION_STATS_PATH,
            &[
                ("region", query.region.as_str()),
                ("tier", query.tier.as_str()),
                ("role", position.as_str()),
            ],
        )?;

        if stats.is_empty() {
            return Err(AppError::NoChampionStats(format!(
                "{} {} {}",
                query.region, query.tier, position
            )));
        }
        Ok(stats)
    }

    fn fetch_matchups(
        &self,
        champion: &str,
        role: &str,
        region: &str,
    ) -> Result<MatchupSheet, AppError> {
        let path = format!("{}/{}", MATCHUPS_PATH, champion_slug(champion));
        tracing::info!(champion, role, region, "fetching matchups");

        let mut sheet: MatchupSheet = self.get_json(&path, &[("region", region), ("role", role)])?;
        if sheet.champion.is_empty() {
            sheet.champion = champion.to_string();
        }
        sheet.classify();
        Ok(sheet)
    }

    fn fetch_player_profile(
        &self,
        summoner: &str,
        region: &str,
    ) -> Result<PlayerProfile, AppError> {
        tracing::info!(summoner, region, "fetching player profile");

        match self.get_json::<PlayerProfile>(PLAYER_PATH, &[("summoner", summoner), ("region", region)]) {
            Err(AppError::HttpStatus { status: 404, .. }) => {
                Err(AppError::PlayerNotFound(summoner.to_string()))
            }
            other => other,
        }
    }
}
