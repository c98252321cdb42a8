//! Activity-driven selection.
//!
//! Maximizes category variety: items are scored on rating, category
//! relevance, and a review-count popularity proxy, then admitted through
//! a diversity-constrained walk that allows at most two items per
//! primary category.

use super::{RecommendationSet, StrategyMetadata, TRANSPORT_COUNT, lodging_count,
    sort_by_score_desc};
use crate::context::{FilterContext, Scored};
use std::collections::{HashMap, HashSet};
use travel_data::{OptimizationGoal, Rated};

/// Activity slots targeted per trip day.
const SLOTS_PER_DAY: usize = 4;

/// Admitted items allowed per primary category.
const MAX_PER_CATEGORY: usize = 2;

pub(crate) fn select(context: &FilterContext) -> RecommendationSet {
    let duration = context.preferences.duration;
    let target = duration as usize * SLOTS_PER_DAY;

    let max_reviews = context
        .pools
        .locations
        .iter()
        .map(|s| s.item.review_count)
        .max()
        .unwrap_or(1)
        .max(1) as f32;

    // Relevance arrives as the running score set by the category filter
    let mut ranked: Vec<_> = context
        .pools
        .locations
        .iter()
        .map(|s| {
            let popularity = s.item.review_count as f32 / max_reviews;
            let score =
                0.5 * (s.item.rating_or_zero() / 5.0) + 0.3 * s.score + 0.2 * popularity;
            Scored::with_score(s.item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut ranked);

    // Diversity-constrained walk: admit at most two per primary category
    // until the target count is reached or the pool is exhausted
    let mut admitted_per_category: HashMap<String, usize> = HashMap::new();
    let mut locations = Vec::new();
    for scored in ranked {
        if locations.len() >= target {
            break;
        }
        let category = scored.item.primary_category().to_string();
        let admitted = admitted_per_category.entry(category).or_insert(0);
        if *admitted < MAX_PER_CATEGORY {
            *admitted += 1;
            locations.push(scored);
        }
    }

    let mut lodgings: Vec<_> = context
        .pools
        .lodgings
        .iter()
        .map(|s| Scored::with_score(s.item.clone(), s.item.rating_or_zero() / 5.0))
        .collect();
    sort_by_score_desc(&mut lodgings);
    lodgings.truncate(lodging_count(duration));

    let mut transports: Vec<_> = context
        .pools
        .transports
        .iter()
        .map(|s| Scored::with_score(s.item.clone(), s.item.rating_or_zero() / 5.0))
        .collect();
    sort_by_score_desc(&mut transports);
    transports.truncate(TRANSPORT_COUNT);

    let distinct: HashSet<&str> = locations
        .iter()
        .map(|s| s.item.primary_category())
        .collect();
    let variety_score = if locations.is_empty() {
        0.0
    } else {
        distinct.len() as f32 / locations.len() as f32
    };

    RecommendationSet {
        locations,
        lodgings,
        transports,
        strategy: OptimizationGoal::Activity.label().to_string(),
        metadata: StrategyMetadata {
            variety_score: Some(variety_score),
            ..StrategyMetadata::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CandidatePools;
    use travel_data::{Location, Preferences};

    fn location(id: &str, category: &str, rating: f32, review_count: u32) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_string(),
            city: "Porto".to_string(),
            region: "Portugal".to_string(),
            categories: vec![category.to_string()],
            rating: Some(rating),
            review_count,
            entry_fee: 0.0,
            description: String::new(),
        }
    }

    fn run(locations: Vec<Location>, duration: u32) -> RecommendationSet {
        let prefs = Preferences::new(1000.0, duration, OptimizationGoal::Activity)
            .normalized()
            .unwrap();
        let context =
            FilterContext::new(prefs, CandidatePools::from_records(locations, vec![], vec![]));
        select(&context)
    }

    #[test]
    fn test_at_most_two_per_primary_category() {
        let locations = (0..8)
            .map(|i| location(&format!("museum-{i}"), "museum", 4.8 - i as f32 * 0.05, 100))
            .chain((0..2).map(|i| location(&format!("park-{i}"), "park", 3.8, 50)))
            .collect();
        let set = run(locations, 3);

        let museums = set
            .locations
            .iter()
            .filter(|s| s.item.primary_category() == "museum")
            .count();
        assert_eq!(museums, 2);
        assert_eq!(set.locations.len(), 4);
    }

    #[test]
    fn test_target_count_is_four_slots_per_day() {
        let locations = (0..40)
            .map(|i| location(&format!("loc-{i}"), &format!("cat-{i}"), 4.0, 10))
            .collect();
        let set = run(locations, 2);
        assert_eq!(set.locations.len(), 8);
    }

    #[test]
    fn test_variety_score_reflects_distinct_categories() {
        let locations = vec![
            location("a", "museum", 4.5, 10),
            location("b", "park", 4.4, 10),
            location("c", "beach", 4.3, 10),
        ];
        let set = run(locations, 1);
        assert_eq!(set.metadata.variety_score, Some(1.0));
    }
}
