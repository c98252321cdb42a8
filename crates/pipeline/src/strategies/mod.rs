//! Scoring strategies that turn a filtered context into a
//! RecommendationSet.
//!
//! The optimization goal is a closed set, so dispatch is a single match
//! over the enum rather than a trait hierarchy. Every strategy is
//! stateless and side-effect-free: the same context and preferences
//! always produce the same selection and ordering.

pub mod activity;
pub mod budget;
pub mod comfort;
pub mod time_efficient;

use crate::context::{FilterContext, Scored};
use serde::Serialize;
use travel_data::{Location, Lodging, OptimizationGoal, Transport};

/// Strategy-specific byproducts of selection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StrategyMetadata {
    pub estimated_cost: Option<f64>,
    pub variety_score: Option<f32>,
    pub comfort_score: Option<f32>,
    pub travel_time_hours: Option<f32>,
}

/// The strategy's output: trimmed, ordered candidate subsets plus the
/// strategy name and its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSet {
    pub locations: Vec<Scored<Location>>,
    pub lodgings: Vec<Scored<Lodging>>,
    pub transports: Vec<Scored<Transport>>,
    pub strategy: String,
    pub metadata: StrategyMetadata,
}

/// Select, score, and truncate candidates for the requested goal.
pub fn select_recommendations(
    goal: OptimizationGoal,
    context: &FilterContext,
) -> RecommendationSet {
    match goal {
        OptimizationGoal::Budget => budget::select(context),
        OptimizationGoal::Activity => activity::select(context),
        OptimizationGoal::Comfort => comfort::select(context),
        OptimizationGoal::Time => time_efficient::select(context),
    }
}

/// Transport options every strategy returns at most.
pub(crate) const TRANSPORT_COUNT: usize = 3;

/// Lodging count shared by most strategies: one per two trip days.
pub(crate) fn lodging_count(duration: u32) -> usize {
    (duration as usize).div_ceil(2)
}

pub(crate) fn sort_by_score_desc<T>(pool: &mut [Scored<T>]) {
    pool.sort_by(|a, b| b.score.total_cmp(&a.score));
}
