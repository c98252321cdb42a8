//! Filter that enforces the minimum rating threshold.
//!
//! Drops candidates below the threshold in all three pools, then sorts
//! each pool by rating descending, tie-broken by review count. Unrated
//! records are dropped: a missing rating cannot clear a quality bar.

use crate::context::{FilterContext, Scored};
use crate::traits::FilterStage;
use anyhow::Result;
use travel_data::{Preferences, Rated};

/// Drops candidates below the minimum rating in every pool.
pub struct RatingFilter;

fn enforce<T: Rated>(pool: &mut Vec<Scored<T>>, min_rating: f32) {
    pool.retain(|s| s.item.rating().map(|r| r >= min_rating).unwrap_or(false));
    pool.sort_by(|a, b| {
        b.item
            .rating_or_zero()
            .total_cmp(&a.item.rating_or_zero())
            .then(b.item.review_count().cmp(&a.item.review_count()))
    });
}

impl FilterStage for RatingFilter {
    fn name(&self) -> &str {
        "RatingFilter"
    }

    fn applies(&self, preferences: &Preferences) -> bool {
        preferences.min_rating > 0.0
    }

    fn handle(&self, mut context: FilterContext) -> Result<FilterContext> {
        let min_rating = context.preferences.min_rating;
        enforce(&mut context.pools.locations, min_rating);
        enforce(&mut context.pools.lodgings, min_rating);
        enforce(&mut context.pools.transports, min_rating);
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CandidatePools;
    use travel_data::{Location, OptimizationGoal, Preferences};

    fn location(id: &str, rating: Option<f32>, review_count: u32) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_string(),
            city: "Lisbon".to_string(),
            region: "Portugal".to_string(),
            categories: vec![],
            rating,
            review_count,
            entry_fee: 0.0,
            description: String::new(),
        }
    }

    fn run(min_rating: f32, locations: Vec<Location>) -> FilterContext {
        let mut prefs = Preferences::new(1000.0, 3, OptimizationGoal::Budget);
        prefs.min_rating = min_rating;
        let prefs = prefs.normalized().unwrap();
        let pools = CandidatePools::from_records(locations, vec![], vec![]);
        RatingFilter
            .handle(FilterContext::new(prefs, pools))
            .unwrap()
    }

    #[test]
    fn test_below_threshold_and_unrated_are_dropped() {
        let out = run(
            3.5,
            vec![
                location("good", Some(4.2), 10),
                location("bad", Some(2.9), 400),
                location("unrated", None, 50),
            ],
        );
        let ids: Vec<&str> = out
            .pools
            .locations
            .iter()
            .map(|s| s.item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["good"]);
    }

    #[test]
    fn test_ties_break_on_review_count() {
        let out = run(
            3.0,
            vec![
                location("few", Some(4.5), 12),
                location("many", Some(4.5), 300),
            ],
        );
        assert_eq!(out.pools.locations[0].item.id, "many");
    }

    #[test]
    fn test_perfect_threshold_can_empty_the_pool() {
        // The orchestrator reports this as NoMatchingCandidates
        let out = run(5.0, vec![location("good", Some(4.9), 10)]);
        assert!(out.pools.locations.is_empty());
    }
}
