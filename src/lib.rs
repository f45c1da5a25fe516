//! Champion pick recommendations for the League of Legends draft phase.
//!
//! Three signals are blended per candidate: meta strength from the tier
//! list, the player's own pool, and head-to-head matchups against enemy picks
//! already revealed. [`PickRecommender`] is pure and stateless; fetching and
//! caching the stats it reads is the job of [`api`] and [`cache`].

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod error;

pub use analysis::champion_stats::{
    ChampionStat, MatchupRecord, MatchupTable, PoolEntry, MIN_GAMES_FOR_POOL,
};
pub use analysis::recommender::{DraftContext, PickRecommender, Recommendation};
pub use analysis::snapshot::StatsSnapshot;
pub use analysis::weights::Weights;
pub use error::AppError;
