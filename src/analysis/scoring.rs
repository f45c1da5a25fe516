use super::champion_stats::{find_pool_entry, ChampionStat, MatchupTable, PoolEntry};

/// Rank assumed for a tier list row without one.
pub const DEFAULT_RANK: u32 = 50;
/// Player score for champions the player has not played enough.
pub const UNSEEN_PLAYER_SCORE: f64 = 5.0;
/// Counter score when no enemy pick is known.
pub const NEUTRAL_COUNTER_SCORE: f64 = 50.0;
pub const NEUTRAL_WIN_RATE: f64 = 50.0;

fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Meta strength from tier list rank.
///
/// Rank 1 scores 100 and rank `total_champions` scores 10, linearly in between.
pub fn meta_score(stat: &ChampionStat, total_champions: usize) -> f64 {
    let rank = stat.rank.unwrap_or(DEFAULT_RANK) as f64;
    let total = total_champions.max(1) as f64;
    clamp_score(100.0 - (rank - 1.0) / total * 90.0)
}

/// How well the player performs on `champion`.
///
/// Entries below the games threshold are no better than never having played
/// the champion. Otherwise the win rate deviation from 50% counts double and
/// volume adds up to 35 points.
pub fn player_score(champion: &str, pool: &[PoolEntry]) -> f64 {
    match find_pool_entry(pool, champion) {
        Some(entry) if entry.is_significant() => {
            let win_rate = entry.win_rate.unwrap_or(NEUTRAL_WIN_RATE);
            let win_rate_bonus = (win_rate - 50.0) * 2.0;
            let games_bonus = (entry.games * 0.6).min(35.0);
            clamp_score(35.0 + win_rate_bonus + games_bonus)
        }
        _ => UNSEEN_PLAYER_SCORE,
    }
}

/// Head-to-head strength of `champion` against the enemy picks so far.
///
/// Unknown matchups contribute nothing rather than a penalty.
pub fn counter_score(champion: &str, enemy_picks: &[String], matchups: &MatchupTable) -> f64 {
    if enemy_picks.is_empty() {
        return NEUTRAL_COUNTER_SCORE;
    }

    let total: f64 = enemy_picks
        .iter()
        .map(|enemy| {
            matchups
                .lookup(champion, enemy)
                .and_then(|m| m.win_rate)
                .map(|win_rate| (win_rate - 50.0) * 4.0)
                .unwrap_or(0.0)
        })
        .sum();

    clamp_score(NEUTRAL_COUNTER_SCORE + total / enemy_picks.len() as f64)
}
