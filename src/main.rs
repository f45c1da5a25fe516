use anyhow::Context;
use clap::Parser;
use draft_for_me::api::client::HttpStatsProvider;
use draft_for_me::api::endpoints::{is_known_region, role_to_position};
use draft_for_me::api::provider::{StatsProvider, StatsQuery};
use draft_for_me::cache::{CachedProvider, DiskCache};
use draft_for_me::config::Config;
use draft_for_me::display::output::{
    display_error, display_info, display_recommendations, display_recommendations_json,
    display_success,
};
use draft_for_me::{
    ChampionStat, DraftContext, MatchupTable, PickRecommender, PoolEntry, StatsSnapshot,
};
use indicatif::ProgressBar;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "DraftForMe")]
#[command(about = "Get champion pick recommendations during draft", long_about = None)]
struct Args {
    /// Tier list JSON file (skips the stats service)
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Player pool JSON file, e.g. [{"champion": "Jinx", "win_rate": 55, "games": 50}]
    #[arg(long)]
    pool: Option<PathBuf>,

    /// Riot ID (Name#TAG) whose pool is fetched from the stats service
    #[arg(long, conflicts_with = "pool")]
    summoner: Option<String>,

    /// Matchup table JSON file, e.g. {"Ahri": [{"enemy": "Zed", "win_rate": 52.1}]}
    #[arg(long)]
    matchups: Option<PathBuf>,

    /// Enemy champion already picked (repeatable)
    #[arg(short, long = "enemy")]
    enemies: Vec<String>,

    /// Banned champion (repeatable)
    #[arg(short, long = "ban")]
    bans: Vec<String>,

    /// Champion already picked by either team (repeatable)
    #[arg(long = "picked")]
    picked: Vec<String>,

    /// 0 = favour your pool, 100 = favour the meta
    #[arg(short, long, default_value = "50", allow_negative_numbers = true)]
    priority: i64,

    /// Number of picks to display (default: 10)
    #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
    top_n: i64,

    /// Role of the tier list: top, jungle, mid, adc, support or all
    #[arg(long, default_value = "all")]
    role: String,

    /// Tier filter (default from DRAFT_TIER)
    #[arg(long)]
    tier: Option<String>,

    /// Region (default from DRAFT_REGION)
    #[arg(short, long)]
    region: Option<String>,

    /// How many of the best ranked candidates get matchup data when enemies are known.
    /// Pool champions with enough games always get it.
    #[arg(long, default_value = "20")]
    matchup_depth: usize,

    /// Print recommendations as JSON
    #[arg(long)]
    json: bool,

    /// Ignore cached stats and fetch again
    #[arg(long)]
    refresh: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn needs_network(args: &Args) -> bool {
    args.stats.is_none()
        || args.summoner.is_some()
        || (args.matchups.is_none() && args.enemies.iter().any(|e| !e.trim().is_empty()))
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    init_tracing(&config);

    if let Some(region) = &args.region {
        config.region = region.to_lowercase();
    }
    if let Some(tier) = &args.tier {
        config.tier = tier.to_lowercase();
    }
    if !is_known_region(&config.region) {
        tracing::warn!(region = %config.region, "unknown region, passing it through as-is");
    }

    // Quiet mode keeps stdout valid JSON
    let info = |message: &str| {
        if !args.json {
            display_info(message);
        }
    };
    let success = |message: &str| {
        if !args.json {
            display_success(message);
        }
    };

    let provider = if needs_network(&args) {
        let http = HttpStatsProvider::new(&config)?;
        let disk = DiskCache::new(config.cache_dir.clone());
        tracing::debug!(cache_dir = %disk.dir().display(), "using disk cache");
        Some(CachedProvider::new(http, disk).with_refresh(args.refresh))
    } else {
        None
    };

    // Step 1: tier list
    let champion_stats: Vec<ChampionStat> = match (&args.stats, &provider) {
        (Some(path), _) => {
            info(&format!("Loading tier list from {}", path.display()));
            load_json(path)?
        }
        (None, Some(provider)) => {
            info(&format!(
                "Fetching {} tier list for {} ({})",
                args.role, config.region, config.tier
            ));
            let query = StatsQuery::new(&config.region, &config.tier, &args.role);
            provider.fetch_champion_stats(&query)?
        }
        (None, None) => anyhow::bail!("no tier list source: pass --stats or set DRAFT_STATS_API_URL"),
    };
    success(&format!("{} champions in the tier list", champion_stats.len()));

    // Step 2: player pool
    let player_pool: Vec<PoolEntry> = match (&args.pool, &args.summoner, &provider) {
        (Some(path), _, _) => load_json(path)?,
        (None, Some(summoner), Some(provider)) => {
            info(&format!("Fetching champion pool for {}", summoner));
            let profile = provider.fetch_player_profile(summoner, &config.region)?;
            if let Some(tier) = &profile.tier {
                success(&format!("{} is {}", summoner, tier));
            }
            profile.most_played
        }
        _ => Vec::new(),
    };
    let significant = player_pool.iter().filter(|p| p.is_significant()).count();
    success(&format!(
        "{} pool champions, {} with enough games to count",
        player_pool.len(),
        significant
    ));

    let draft = DraftContext {
        enemy_picks: args
            .enemies
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect(),
        banned: args.bans.clone(),
        already_picked: args.picked.clone(),
        priority: args.priority,
        top_n: args.top_n,
    };

    let mut snapshot = StatsSnapshot::new(champion_stats, MatchupTable::new());

    // Step 3: matchups against the enemy picks
    if let Some(path) = &args.matchups {
        snapshot.matchups = load_json(path)?;
    } else if let Some(provider) = provider.as_ref().filter(|_| !draft.enemy_picks.is_empty()) {
        let position = match role_to_position(&args.role).as_str() {
            "all" => String::new(),
            other => other.to_string(),
        };
        let candidates =
            PickRecommender::matchup_candidates(&snapshot, &player_pool, &draft, args.matchup_depth);
        tracing::debug!(
            provider = provider.provider_name(),
            candidates = candidates.len(),
            "fetching matchups"
        );

        let pb = if args.json {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(candidates.len() as u64)
        };
        pb.set_message("Fetching matchups");

        let mut failures = 0;
        for champion in &candidates {
            match provider.fetch_matchups(champion, &position, &config.region) {
                Ok(sheet) => snapshot.matchups.insert(champion, sheet.all_matchups),
                Err(e) => {
                    tracing::warn!(champion = %champion, error = %e, "matchups unavailable");
                    failures += 1;
                }
            }
            pb.inc(1);
        }
        pb.finish_with_message("✓ Matchups fetched");

        if failures > 0 {
            info(&format!(
                "⚠️ Matchups missing for {} of {} champions, their counter score stays neutral",
                failures,
                candidates.len()
            ));
        }
    }

    if !draft.enemy_picks.is_empty() && snapshot.matchups.is_empty() {
        info("⚠️ No matchup data, counter scores stay neutral");
    }

    tracing::debug!(
        age_mins = snapshot.age_minutes(),
        matchup_subjects = snapshot.matchups.len(),
        "scoring snapshot"
    );

    // Step 4: recommendations
    let recommendations = PickRecommender::get_recommendations(&snapshot, &player_pool, &draft);

    if args.json {
        display_recommendations_json(&recommendations)?;
    } else {
        display_recommendations(&recommendations, &draft);
    }

    Ok(())
}
