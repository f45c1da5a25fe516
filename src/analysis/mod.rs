pub mod champion_stats;
pub mod normalize;
pub mod recommender;
pub mod scoring;
pub mod snapshot;
pub mod weights;
