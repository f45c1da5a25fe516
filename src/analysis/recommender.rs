use super::champion_stats::{find_pool_entry, has_significant_pool, ChampionStat, PoolEntry};
use super::scoring::{counter_score, meta_score, player_score};
use super::snapshot::StatsSnapshot;
use super::weights::Weights;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_PRIORITY: i64 = 50;
pub const DEFAULT_TOP_N: i64 = 10;

/// What is known about the draft when asking for a pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftContext {
    pub enemy_picks: Vec<String>,
    pub banned: Vec<String>,
    pub already_picked: Vec<String>,
    /// 0 = favour the player's pool, 100 = favour the meta. Clamped.
    pub priority: i64,
    /// Zero or negative yields no recommendations.
    pub top_n: i64,
}

impl DraftContext {
    /// Lowercased names of banned and already picked champions.
    pub fn excluded(&self) -> HashSet<String> {
        self.banned
            .iter()
            .chain(&self.already_picked)
            .map(|n| n.trim().to_lowercase())
            .collect()
    }
}

impl Default for DraftContext {
    fn default() -> Self {
        DraftContext {
            enemy_picks: Vec::new(),
            banned: Vec::new(),
            already_picked: Vec::new(),
            priority: DEFAULT_PRIORITY,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Raw tier list numbers passed through for display. Missing numbers are 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStats {
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_rate: f64,
    pub kda: f64,
    pub games_played: u64,
    pub counters: Vec<String>,
    pub rank: u32,
}

impl From<&ChampionStat> for DisplayStats {
    fn from(stat: &ChampionStat) -> Self {
        DisplayStats {
            win_rate: stat.win_rate.unwrap_or(0.0),
            pick_rate: stat.pick_rate.unwrap_or(0.0),
            ban_rate: stat.ban_rate.unwrap_or(0.0),
            kda: stat.kda.unwrap_or(0.0),
            games_played: stat.games_played.unwrap_or(0),
            counters: stat.counters.clone(),
            rank: stat.rank.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub champion: String,
    pub total_score: f64,
    pub meta_score: f64,
    pub player_score: f64,
    pub counter_score: f64,
    pub is_in_pool: bool,
    pub player_games: u32,
    pub weights: Weights,
    pub stats: DisplayStats,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct PickRecommender;

impl PickRecommender {
    /// Score one candidate with weights already computed for the call.
    pub fn calculate_score(
        stat: &ChampionStat,
        snapshot: &StatsSnapshot,
        player_pool: &[PoolEntry],
        enemy_picks: &[String],
        weights: Weights,
        total_champions: usize,
    ) -> Recommendation {
        let meta = meta_score(stat, total_champions);
        let player = player_score(&stat.name, player_pool);
        let counter = counter_score(&stat.name, enemy_picks, &snapshot.matchups);
        let total = weights.blend(meta, player, counter);

        let pool_entry = find_pool_entry(player_pool, &stat.name);

        Recommendation {
            champion: stat.name.clone(),
            total_score: round1(total),
            meta_score: round1(meta),
            player_score: round1(player),
            counter_score: round1(counter),
            is_in_pool: pool_entry.map(PoolEntry::is_significant).unwrap_or(false),
            player_games: pool_entry.map(|p| p.games.round() as u32).unwrap_or(0),
            weights,
            stats: DisplayStats::from(stat),
        }
    }

    /// Rank every eligible champion in the snapshot and keep the best `top_n`.
    ///
    /// Banned and already picked champions are removed before scoring. Ties
    /// keep the snapshot order.
    pub fn get_recommendations(
        snapshot: &StatsSnapshot,
        player_pool: &[PoolEntry],
        draft: &DraftContext,
    ) -> Vec<Recommendation> {
        let top_n = usize::try_from(draft.top_n).unwrap_or(0);
        if top_n == 0 {
            return Vec::new();
        }

        let excluded = draft.excluded();

        let candidates: Vec<&ChampionStat> = snapshot
            .champion_stats
            .iter()
            .filter(|s| !s.name.is_empty() && !excluded.contains(&s.name.to_lowercase()))
            .collect();

        let enemy_picks: Vec<String> = draft
            .enemy_picks
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        let weights = Weights::compute(
            draft.priority,
            !enemy_picks.is_empty(),
            has_significant_pool(player_pool),
        );

        tracing::debug!(
            candidates = candidates.len(),
            excluded = excluded.len(),
            enemies = enemy_picks.len(),
            w_meta = weights.meta,
            w_player = weights.player,
            w_counter = weights.counter,
            "scoring draft candidates"
        );

        let total_champions = candidates.len();
        let mut recommendations: Vec<Recommendation> = candidates
            .into_iter()
            .map(|stat| {
                Self::calculate_score(
                    stat,
                    snapshot,
                    player_pool,
                    &enemy_picks,
                    weights,
                    total_champions,
                )
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recommendations.truncate(top_n);

        recommendations
    }

    /// Eligible candidates ordered by tier list rank, best first.
    pub fn best_ranked_candidates<'a>(
        snapshot: &'a StatsSnapshot,
        draft: &DraftContext,
        limit: usize,
    ) -> Vec<&'a ChampionStat> {
        let excluded = draft.excluded();

        let mut candidates: Vec<&ChampionStat> = snapshot
            .champion_stats
            .iter()
            .filter(|s| !s.name.is_empty() && !excluded.contains(&s.name.to_lowercase()))
            .collect();
        candidates.sort_by_key(|s| s.rank.unwrap_or(u32::MAX));
        candidates.truncate(limit);
        candidates
    }

    /// Champions worth fetching matchups for: the best `limit` by rank plus
    /// every significant pool champion still available, without duplicates.
    pub fn matchup_candidates(
        snapshot: &StatsSnapshot,
        player_pool: &[PoolEntry],
        draft: &DraftContext,
        limit: usize,
    ) -> Vec<String> {
        let excluded = draft.excluded();

        let pool_picks = player_pool
            .iter()
            .filter(|p| p.is_significant())
            .filter_map(|p| {
                snapshot
                    .champion_stats
                    .iter()
                    .find(|s| !s.name.is_empty() && s.name.eq_ignore_ascii_case(&p.champion))
            })
            .filter(|s| !excluded.contains(&s.name.to_lowercase()));

        let mut seen = HashSet::new();
        Self::best_ranked_candidates(snapshot, draft, limit)
            .into_iter()
            .chain(pool_picks)
            .filter(|s| seen.insert(s.name.to_lowercase()))
            .map(|s| s.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::champion_stats::{MatchupRecord, MatchupTable};

    fn snapshot(stats: Vec<ChampionStat>) -> StatsSnapshot {
        StatsSnapshot::new(stats, MatchupTable::new())
    }

    fn tier_list(names: &[&str]) -> Vec<ChampionStat> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| ChampionStat::new(*n).with_rank(i as u32 + 1))
            .collect()
    }

    #[test]
    fn excluded_champions_never_appear() {
        let snap = snapshot(tier_list(&["Ahri", "Zed", "Lux", "Jinx"]));
        let draft = DraftContext {
            banned: vec!["ahri".to_string()],
            already_picked: vec!["JINX".to_string()],
            ..Default::default()
        };

        let recs = PickRecommender::get_recommendations(&snap, &[], &draft);
        let names: Vec<&str> = recs.iter().map(|r| r.champion.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Lux"]);
    }

    #[test]
    fn excluded_champion_does_not_count_toward_rank_normalization() {
        let snap = snapshot(tier_list(&["Ahri", "Zed"]));
        let draft = DraftContext {
            banned: vec!["Ahri".to_string()],
            ..Default::default()
        };

        let recs = PickRecommender::get_recommendations(&snap, &[], &draft);
        // Zed is rank 2 out of a single candidate.
        assert!((recs[0].meta_score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn sorted_descending_and_truncated() {
        let snap = snapshot(tier_list(&["Ahri", "Zed", "Lux", "Jinx", "Ashe"]));
        let draft = DraftContext {
            top_n: 3,
            ..Default::default()
        };

        let recs = PickRecommender::get_recommendations(&snap, &[], &draft);
        assert_eq!(recs.len(), 3);
        assert!(recs.windows(2).all(|w| w[0].total_score >= w[1].total_score));
        assert_eq!(recs[0].champion, "Ahri");
    }

    #[test]
    fn non_positive_top_n_is_empty() {
        let snap = snapshot(tier_list(&["Ahri"]));
        for top_n in [0, -3] {
            let draft = DraftContext {
                top_n,
                ..Default::default()
            };
            assert!(PickRecommender::get_recommendations(&snap, &[], &draft).is_empty());
        }
    }

    #[test]
    fn ties_keep_snapshot_order() {
        let stats = vec![
            ChampionStat::new("Lux"),
            ChampionStat::new("Ahri"),
            ChampionStat::new("Zed"),
        ];
        let recs =
            PickRecommender::get_recommendations(&snapshot(stats), &[], &DraftContext::default());
        let names: Vec<&str> = recs.iter().map(|r| r.champion.as_str()).collect();
        assert_eq!(names, vec!["Lux", "Ahri", "Zed"]);
    }

    #[test]
    fn pool_favourite_wins_at_low_priority() {
        let snap = snapshot(tier_list(&["Ahri", "Zed", "Lux"]));
        let pool = vec![PoolEntry::new("Lux", Some(58.0), 80)];
        let draft = DraftContext {
            priority: 0,
            ..Default::default()
        };

        let recs = PickRecommender::get_recommendations(&snap, &pool, &draft);
        assert_eq!(recs[0].champion, "Lux");
        assert!(recs[0].is_in_pool);
        assert_eq!(recs[0].player_games, 80);
    }

    #[test]
    fn counter_pick_rises_when_enemy_known() {
        let mut matchups = MatchupTable::new();
        matchups.insert("Lux", vec![MatchupRecord::new("Zed", Some(62.0))]);
        let mut stats = tier_list(&["Ahri", "Lux", "Zed"]);
        stats.extend((4..=20).map(|r| ChampionStat::new(format!("Filler{r}")).with_rank(r)));
        let snap = StatsSnapshot::new(stats, matchups);

        let draft = DraftContext {
            enemy_picks: vec!["Zed".to_string()],
            already_picked: vec!["Zed".to_string()],
            ..Default::default()
        };

        let recs = PickRecommender::get_recommendations(&snap, &[], &draft);
        assert_eq!(recs[0].champion, "Lux");
        assert!((recs[0].counter_score - 98.0).abs() < 1e-9);
        assert!((recs[0].weights.counter - 0.4).abs() < 1e-9);
    }

    #[test]
    fn display_stats_default_to_zero() {
        let snap = snapshot(vec![ChampionStat::new("Ahri")]);
        let recs = PickRecommender::get_recommendations(&snap, &[], &DraftContext::default());
        let stats = &recs[0].stats;
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.rank, 0);
        assert!(stats.counters.is_empty());
    }

    #[test]
    fn unnamed_rows_are_skipped() {
        let snap = snapshot(vec![ChampionStat::new(""), ChampionStat::new("Ahri").with_rank(1)]);
        let recs = PickRecommender::get_recommendations(&snap, &[], &DraftContext::default());
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn best_ranked_candidates_skip_excluded() {
        let mut stats = tier_list(&["Ahri", "Zed", "Lux"]);
        stats.reverse();
        let snap = snapshot(stats);
        let draft = DraftContext {
            banned: vec!["Ahri".to_string()],
            ..Default::default()
        };

        let best = PickRecommender::best_ranked_candidates(&snap, &draft, 1);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].name, "Zed");
    }

    #[test]
    fn blank_enemy_picks_do_not_enable_counter_weight() {
        let snap = snapshot(tier_list(&["Ahri", "Zed"]));
        let draft = DraftContext {
            enemy_picks: vec![String::new(), "   ".to_string()],
            ..Default::default()
        };

        let recs = PickRecommender::get_recommendations(&snap, &[], &draft);
        assert_eq!(recs[0].weights.counter, 0.0);
        assert_eq!(recs[0].counter_score, 50.0);
    }

    #[test]
    fn matchup_candidates_include_pool_champions_outside_the_top() {
        let mut stats = tier_list(&["Ahri", "Zed", "Lux", "Jinx", "Ashe"]);
        stats.push(ChampionStat::new("Teemo").with_rank(40));
        let snap = snapshot(stats);
        let pool = vec![
            PoolEntry::new("teemo", Some(55.0), 60),
            PoolEntry::new("Ashe", Some(51.0), 4),
            PoolEntry::new("ahri", Some(50.0), 20),
            PoolEntry::new("Jinx", Some(52.0), 30),
            PoolEntry::new("Kindred", Some(70.0), 90),
        ];
        let draft = DraftContext {
            banned: vec!["JINX".to_string()],
            ..Default::default()
        };

        let names = PickRecommender::matchup_candidates(&snap, &pool, &draft, 2);
        assert_eq!(names, vec!["Ahri", "Zed", "Teemo"]);
    }
}
