use crate::analysis::champion_stats::{MatchupRecord, PoolEntry};
use crate::analysis::normalize::{lenient_optional_count, lenient_string};
use serde::{Deserialize, Serialize};

// Counter page for one champion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchupSheet {
    #[serde(default, deserialize_with = "lenient_string")]
    pub champion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(default)]
    pub all_matchups: Vec<MatchupRecord>,
    #[serde(default)]
    pub strong_against: Vec<MatchupRecord>,
    #[serde(default)]
    pub weak_against: Vec<MatchupRecord>,
}

impl MatchupSheet {
    pub fn new(champion: &str, role: &str, all_matchups: Vec<MatchupRecord>) -> Self {
        let mut sheet = MatchupSheet {
            champion: champion.to_string(),
            role: role.to_string(),
            all_matchups,
            strong_against: Vec::new(),
            weak_against: Vec::new(),
        };
        sheet.classify();
        sheet
    }

    /// Rebuild the strong/weak lists from `all_matchups`.
    pub fn classify(&mut self) {
        let rated = self.all_matchups.iter().filter_map(|m| m.win_rate.map(|wr| (wr, m)));

        let (mut strong, mut weak): (Vec<_>, Vec<_>) = rated.partition(|(wr, _)| *wr >= 50.0);
        strong.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        weak.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        self.strong_against = strong.into_iter().map(|(_, m)| m.clone()).collect();
        self.weak_against = weak.into_iter().map(|(_, m)| m.clone()).collect();
    }

    pub fn is_empty(&self) -> bool {
        self.all_matchups.is_empty()
    }
}

// Summoner profile with most played champions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub summoner_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: String,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_count")]
    pub lp: Option<u64>,
    #[serde(default)]
    pub most_played: Vec<PoolEntry>,
}
