//! Time-efficient selection.
//!
//! Groups locations by city (region when the city is missing) and
//! round-robins across the groups, taking the highest-rated unused item
//! from each in turn. This spreads the trip across areas instead of
//! concentrating all time in one, while keeping inferred inter-location
//! travel low. Simple grouping, not true geospatial clustering.

use super::{RecommendationSet, StrategyMetadata, TRANSPORT_COUNT, lodging_count,
    sort_by_score_desc};
use crate::context::{FilterContext, Scored};
use crate::filters::parse_travel_hours;
use std::collections::BTreeMap;
use travel_data::{Location, OptimizationGoal, Rated};

/// Sightseeing slots per day under the time goal.
const SLOTS_PER_DAY: usize = 3;

/// Assumed hours to move between two clusters.
const INTER_CLUSTER_HOURS: f32 = 1.5;

fn cluster_key(location: &Location) -> String {
    if !location.city.is_empty() {
        location.city.to_lowercase()
    } else if !location.region.is_empty() {
        location.region.to_lowercase()
    } else {
        "unclustered".to_string()
    }
}

pub(crate) fn select(context: &FilterContext) -> RecommendationSet {
    let duration = context.preferences.duration;
    let target = duration as usize * SLOTS_PER_DAY;

    // BTreeMap keeps cluster iteration order stable across runs
    let mut clusters: BTreeMap<String, Vec<Scored<Location>>> = BTreeMap::new();
    for scored in &context.pools.locations {
        clusters
            .entry(cluster_key(&scored.item))
            .or_default()
            .push(Scored::with_score(
                scored.item.clone(),
                scored.item.rating_or_zero() / 5.0,
            ));
    }
    for members in clusters.values_mut() {
        sort_by_score_desc(members);
    }

    // Round-robin: highest-rated unused item per cluster until the
    // target count is met or every cluster is drained
    let mut locations = Vec::new();
    let mut cursors: BTreeMap<&String, usize> = clusters.keys().map(|k| (k, 0)).collect();
    while locations.len() < target {
        let mut picked_any = false;
        for (key, members) in &clusters {
            if locations.len() >= target {
                break;
            }
            let cursor = cursors.get_mut(key).expect("cursor per cluster");
            if *cursor < members.len() {
                locations.push(members[*cursor].clone());
                *cursor += 1;
                picked_any = true;
            }
        }
        if !picked_any {
            break;
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

    // Fast legs first
    let mut transports: Vec<_> = context
        .pools
        .transports
        .iter()
        .map(|s| {
            let hours = parse_travel_hours(&s.item.duration);
            Scored::with_score(s.item.clone(), 1.0 / (1.0 + hours))
        })
        .collect();
    sort_by_score_desc(&mut transports);
    transports.truncate(TRANSPORT_COUNT);

    let clusters_used = locations
        .iter()
        .map(|s| cluster_key(&s.item))
        .collect::<std::collections::HashSet<_>>()
        .len();
    let travel_time_hours = clusters_used.saturating_sub(1) as f32 * INTER_CLUSTER_HOURS;

    RecommendationSet {
        locations,
        lodgings,
        transports,
        strategy: OptimizationGoal::Time.label().to_string(),
        metadata: StrategyMetadata {
            travel_time_hours: Some(travel_time_hours),
            ..StrategyMetadata::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CandidatePools;
    use travel_data::Preferences;

    fn location(id: &str, city: &str, rating: f32) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_string(),
            city: city.to_string(),
            region: "Portugal".to_string(),
            categories: vec![],
            rating: Some(rating),
            review_count: 10,
            entry_fee: 0.0,
            description: String::new(),
        }
    }

    fn run(locations: Vec<Location>, duration: u32) -> RecommendationSet {
        let prefs = Preferences::new(1000.0, duration, OptimizationGoal::Time)
            .normalized()
            .unwrap();
        let context =
            FilterContext::new(prefs, CandidatePools::from_records(locations, vec![], vec![]));
        select(&context)
    }

    #[test]
    fn test_round_robin_alternates_clusters() {
        let locations = vec![
            location("lis-1", "Lisbon", 4.9),
            location("lis-2", "Lisbon", 4.8),
            location("por-1", "Porto", 4.7),
            location("por-2", "Porto", 4.6),
        ];
        let set = run(locations, 1); // target 3

        let cities: Vec<&str> = set.locations.iter().map(|s| s.item.city.as_str()).collect();
        // One from each cluster first, then the second pass
        assert_eq!(cities, vec!["Lisbon", "Porto", "Lisbon"]);
        assert_eq!(set.locations[0].item.id, "lis-1");
        assert_eq!(set.locations[1].item.id, "por-1");
    }

    #[test]
    fn test_travel_estimate_scales_with_clusters() {
        let locations = vec![
            location("a", "Lisbon", 4.5),
            location("b", "Porto", 4.4),
            location("c", "Sintra", 4.3),
        ];
        let set = run(locations, 1);
        assert_eq!(set.metadata.travel_time_hours, Some(3.0));
    }

    #[test]
    fn test_drained_clusters_stop_the_walk() {
        let locations = vec![location("only", "Lisbon", 4.0)];
        let set = run(locations, 3); // target 9, pool of 1
        assert_eq!(set.locations.len(), 1);
    }
}
