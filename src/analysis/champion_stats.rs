use super::normalize::{
    lenient_f64, lenient_games, lenient_optional_count, lenient_rank, lenient_string,
    lenient_string_list,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Minimum games on a champion before it counts as part of the player's pool.
pub const MIN_GAMES_FOR_POOL: u32 = 10;

/// One tier list row from the stats provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChampionStat {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// 1 = strongest.
    #[serde(default, deserialize_with = "lenient_rank")]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub win_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pick_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ban_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub kda: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_count")]
    pub games_played: Option<u64>,
    /// Champions known to struggle against this one. Advisory only.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub counters: Vec<String>,
}

impl ChampionStat {
    pub fn new(name: impl Into<String>) -> Self {
        ChampionStat {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }
}

/// One champion from the player's own history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub champion: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub win_rate: Option<f64>,
    /// Averaged feeds can report fractional counts.
    #[serde(default, deserialize_with = "lenient_games")]
    pub games: f64,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub kda: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_count", skip_serializing_if = "Option::is_none")]
    pub wins: Option<u64>,
    #[serde(default, deserialize_with = "lenient_optional_count", skip_serializing_if = "Option::is_none")]
    pub losses: Option<u64>,
}

impl PoolEntry {
    pub fn new(champion: impl Into<String>, win_rate: Option<f64>, games: u32) -> Self {
        PoolEntry {
            champion: champion.into(),
            win_rate,
            games: f64::from(games),
            ..Default::default()
        }
    }

    pub fn is_significant(&self) -> bool {
        self.games >= f64::from(MIN_GAMES_FOR_POOL)
    }
}

/// First pool entry whose champion matches `name`, ignoring case.
pub fn find_pool_entry<'a>(pool: &'a [PoolEntry], name: &str) -> Option<&'a PoolEntry> {
    pool.iter().find(|p| p.champion.eq_ignore_ascii_case(name))
}

/// True when at least one pool entry meets the games threshold.
pub fn has_significant_pool(pool: &[PoolEntry]) -> bool {
    pool.iter().any(PoolEntry::is_significant)
}

/// Head-to-head record of a subject champion against `enemy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchupRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub enemy: String,
    /// Percentage of games the subject wins against `enemy`.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub win_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_count", skip_serializing_if = "Option::is_none")]
    pub games: Option<u64>,
}

impl MatchupRecord {
    pub fn new(enemy: impl Into<String>, win_rate: Option<f64>) -> Self {
        MatchupRecord {
            enemy: enemy.into(),
            win_rate,
            games: None,
        }
    }
}

/// Matchup records keyed by subject champion, case-insensitive.
///
/// Keys that differ only in case are merged in key order, so lookups on the
/// same input always resolve to the same record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<MatchupRecord>>", into = "HashMap<String, Vec<MatchupRecord>>")]
pub struct MatchupTable {
    by_champion: HashMap<String, Vec<MatchupRecord>>,
}

impl MatchupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to any records already held for `champion`; earlier ones win lookups.
    pub fn insert(&mut self, champion: &str, records: Vec<MatchupRecord>) {
        self.by_champion
            .entry(champion.to_lowercase())
            .or_default()
            .extend(records);
    }

    pub fn records_for(&self, champion: &str) -> &[MatchupRecord] {
        self.by_champion
            .get(&champion.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The subject's record against `enemy`, first match wins.
    pub fn lookup(&self, champion: &str, enemy: &str) -> Option<&MatchupRecord> {
        self.records_for(champion)
            .iter()
            .find(|m| !m.enemy.is_empty() && m.enemy.eq_ignore_ascii_case(enemy))
    }

    pub fn contains(&self, champion: &str) -> bool {
        self.by_champion.contains_key(&champion.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.by_champion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_champion.is_empty()
    }
}

impl From<BTreeMap<String, Vec<MatchupRecord>>> for MatchupTable {
    fn from(raw: BTreeMap<String, Vec<MatchupRecord>>) -> Self {
        let mut table = MatchupTable::new();
        for (champion, records) in raw {
            table.insert(&champion, records);
        }
        table
    }
}

impl From<MatchupTable> for HashMap<String, Vec<MatchupRecord>> {
    fn from(table: MatchupTable) -> Self {
        table.by_champion
    }
}

impl FromIterator<(String, Vec<MatchupRecord>)> for MatchupTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<MatchupRecord>)>>(iter: I) -> Self {
        let mut table = MatchupTable::new();
        for (champion, records) in iter {
            table.insert(&champion, records);
        }
        table
    }
}
