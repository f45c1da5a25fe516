use super::champion_stats::{ChampionStat, MatchupTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time stats handed to the recommender.
///
/// The caller owns fetching and caching; the recommender only reads this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub champion_stats: Vec<ChampionStat>,
    #[serde(default)]
    pub matchups: MatchupTable,
    pub fetched_at: DateTime<Utc>,
}

impl StatsSnapshot {
    pub fn new(champion_stats: Vec<ChampionStat>, matchups: MatchupTable) -> Self {
        StatsSnapshot {
            champion_stats,
            matchups,
            fetched_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        Utc::now().signed_duration_since(self.fetched_at).num_minutes()
    }
}
