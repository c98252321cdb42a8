//! Comfort-prioritized selection.
//!
//! Rating and amenity/class richness outweigh cost. Fewer locations are
//! selected (two per day) in exchange for more lodging headroom and a
//! bias toward higher-class transport.

use super::{RecommendationSet, StrategyMetadata, TRANSPORT_COUNT, lodging_count,
    sort_by_score_desc};
use crate::context::{FilterContext, Scored};
use travel_data::{OptimizationGoal, Rated, Transport};

/// Sightseeing slots per day under the comfort goal.
const SLOTS_PER_DAY: usize = 2;

/// Amenity count treated as "fully equipped".
const AMENITY_CEILING: f32 = 8.0;

fn class_score(transport: &Transport) -> f32 {
    match transport.class.as_deref().map(str::to_lowercase).as_deref() {
        Some("first") => 1.0,
        Some("business") => 0.8,
        Some("premium") => 0.6,
        _ => 0.3,
    }
}

pub(crate) fn select(context: &FilterContext) -> RecommendationSet {
    let duration = context.preferences.duration;

    let mut locations: Vec<_> = context
        .pools
        .locations
        .iter()
        .map(|s| {
            // Prior score carries the interest relevance when present
            let score = 0.8 * (s.item.rating_or_zero() / 5.0) + 0.2 * s.score;
            Scored::with_score(s.item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut locations);
    locations.truncate(duration as usize * SLOTS_PER_DAY);

    let mut lodgings: Vec<_> = context
        .pools
        .lodgings
        .iter()
        .map(|s| {
            let amenity_richness = (s.item.amenities.len() as f32 / AMENITY_CEILING).min(1.0);
            let stars = f32::from(s.item.stars.unwrap_or(0)) / 5.0;
            let score =
                0.5 * (s.item.rating_or_zero() / 5.0) + 0.3 * amenity_richness + 0.2 * stars;
            Scored::with_score(s.item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut lodgings);
    // One extra option beyond the usual count, for headroom
    lodgings.truncate(lodging_count(duration) + 1);

    let mut transports: Vec<_> = context
        .pools
        .transports
        .iter()
        .map(|s| {
            let score = 0.6 * class_score(&s.item) + 0.4 * (s.item.rating_or_zero() / 5.0);
            Scored::with_score(s.item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut transports);
    transports.truncate(TRANSPORT_COUNT);

    let comfort_score = if lodgings.is_empty() {
        0.0
    } else {
        lodgings.iter().map(|s| s.item.rating_or_zero() / 5.0).sum::<f32>()
            / lodgings.len() as f32
    };

    RecommendationSet {
        locations,
        lodgings,
        transports,
        strategy: OptimizationGoal::Comfort.label().to_string(),
        metadata: StrategyMetadata {
            comfort_score: Some(comfort_score),
            ..StrategyMetadata::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CandidatePools;
    use travel_data::{Lodging, Preferences};

    fn lodging(id: &str, rating: f32, amenities: usize, stars: u8) -> Lodging {
        Lodging {
            id: id.to_string(),
            name: id.to_string(),
            city: "Sintra".to_string(),
            kind: "hotel".to_string(),
            price_per_night: 200.0,
            currency: "USD".to_string(),
            pricing_unit: "per_night".to_string(),
            rating: Some(rating),
            review_count: 10,
            amenities: (0..amenities).map(|i| format!("amenity-{i}")).collect(),
            stars: Some(stars),
        }
    }

    fn transport(id: &str, class: Option<&str>, rating: f32) -> Transport {
        Transport {
            id: id.to_string(),
            mode: "train".to_string(),
            operator: String::new(),
            origin: "Sintra".to_string(),
            destination: "Lisbon".to_string(),
            price: 40.0,
            currency: "USD".to_string(),
            pricing_unit: "per_trip".to_string(),
            duration: "1h".to_string(),
            class: class.map(str::to_string),
            rating: Some(rating),
            review_count: 10,
        }
    }

    #[test]
    fn test_amenity_rich_lodging_beats_equal_rating() {
        let prefs = Preferences::new(3000.0, 2, OptimizationGoal::Comfort)
            .normalized()
            .unwrap();
        let context = FilterContext::new(
            prefs,
            CandidatePools::from_records(
                vec![],
                vec![lodging("bare", 4.5, 0, 3), lodging("plush", 4.5, 8, 5)],
                vec![],
            ),
        );
        let set = select(&context);
        assert_eq!(set.lodgings[0].item.id, "plush");
    }

    #[test]
    fn test_first_class_transport_leads() {
        let prefs = Preferences::new(3000.0, 2, OptimizationGoal::Comfort)
            .normalized()
            .unwrap();
        let context = FilterContext::new(
            prefs,
            CandidatePools::from_records(
                vec![],
                vec![],
                vec![
                    transport("economy", None, 4.9),
                    transport("first", Some("first"), 4.0),
                ],
            ),
        );
        let set = select(&context);
        assert_eq!(set.transports[0].item.id, "first");
    }

    #[test]
    fn test_lodging_headroom_is_one_extra() {
        let lodgings = (0..6).map(|i| lodging(&format!("ldg-{i}"), 4.0, 2, 3)).collect();
        let prefs = Preferences::new(3000.0, 4, OptimizationGoal::Comfort)
            .normalized()
            .unwrap();
        let context =
            FilterContext::new(prefs, CandidatePools::from_records(vec![], lodgings, vec![]));
        let set = select(&context);
        assert_eq!(set.lodgings.len(), 3); // ceil(4/2) + 1
    }
}
