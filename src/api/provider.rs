use super::endpoints::role_to_position;
use super::models::{MatchupSheet, PlayerProfile};
use crate::analysis::champion_stats::ChampionStat;
use crate::error::AppError;

/// Which tier list to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatsQuery {
    pub region: String,
    pub tier: String,
    pub role: String,
}

impl StatsQuery {
    pub fn new(region: &str, tier: &str, role: &str) -> Self {
        StatsQuery {
            region: region.to_lowercase(),
            tier: tier.to_lowercase(),
            role: role.to_lowercase(),
        }
    }

    pub fn position(&self) -> String {
        role_to_position(&self.role)
    }
}

/// Source of normalized records for the recommender.
///
/// Implementations hide transport, retries and page-shape quirks. What comes
/// back is either complete for the query or an error.
pub trait StatsProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn fetch_champion_stats(&self, query: &StatsQuery) -> Result<Vec<ChampionStat>, AppError>;

    fn fetch_matchups(
        &self,
        champion: &str,
        role: &str,
        region: &str,
    ) -> Result<MatchupSheet, AppError>;

    fn fetch_player_profile(&self, summoner: &str, region: &str)
        -> Result<PlayerProfile, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_normalizes_case_and_role() {
        let query = StatsQuery::new("EUW", "Emerald_Plus", "Bottom");
        assert_eq!(query.region, "euw");
        assert_eq!(query.tier, "emerald_plus");
        assert_eq!(query.position(), "adc");
    }
}
