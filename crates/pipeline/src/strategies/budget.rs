//! Budget-optimized selection.
//!
//! Cost dominates the score, with rating as the secondary signal. The
//! cost weight rises with how structural the expense is: entry fees are
//! weighted 0.6, nightly prices 0.7, trip prices 0.8.

use super::{RecommendationSet, StrategyMetadata, TRANSPORT_COUNT, lodging_count,
    sort_by_score_desc};
use crate::context::{FilterContext, Scored};
use travel_data::{OptimizationGoal, Rated};

const LOCATION_COST_WEIGHT: f32 = 0.6;
const LODGING_COST_WEIGHT: f32 = 0.7;
const TRANSPORT_COST_WEIGHT: f32 = 0.8;

/// Normalized cost in [0, 1] against the pool's maximum.
fn normalized(cost: f64, max_cost: f64) -> f32 {
    (cost / max_cost) as f32
}

fn cost_score(cost: f64, max_cost: f64, rating: f32, cost_weight: f32) -> f32 {
    cost_weight * (1.0 - normalized(cost, max_cost)) + (1.0 - cost_weight) * (rating / 5.0)
}

pub(crate) fn select(context: &FilterContext) -> RecommendationSet {
    let duration = context.preferences.duration;
    let nights = f64::from(duration.max(1));

    let max_fee = context
        .pools
        .locations
        .iter()
        .map(|s| s.item.entry_fee)
        .fold(0.0, f64::max)
        .max(1.0);
    let mut locations: Vec<_> = context
        .pools
        .locations
        .iter()
        .map(|s| {
            let score = cost_score(
                s.item.entry_fee,
                max_fee,
                s.item.rating_or_zero(),
                LOCATION_COST_WEIGHT,
            );
            Scored::with_score(s.item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut locations);
    locations.truncate(duration as usize * 3);

    let max_nightly = context
        .pools
        .lodgings
        .iter()
        .map(|s| s.item.price_per_night)
        .fold(0.0, f64::max)
        .max(1.0);
    let mut lodgings: Vec<_> = context
        .pools
        .lodgings
        .iter()
        .map(|s| {
            let score = cost_score(
                s.item.price_per_night,
                max_nightly,
                s.item.rating_or_zero(),
                LODGING_COST_WEIGHT,
            );
            Scored::with_score(s.item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut lodgings);
    lodgings.truncate(lodging_count(duration));

    let max_price = context
        .pools
        .transports
        .iter()
        .map(|s| s.item.price)
        .fold(0.0, f64::max)
        .max(1.0);
    let mut transports: Vec<_> = context
        .pools
        .transports
        .iter()
        .map(|s| {
            let score = cost_score(
                s.item.price,
                max_price,
                s.item.rating_or_zero(),
                TRANSPORT_COST_WEIGHT,
            );
            Scored::with_score(s.item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut transports);
    transports.truncate(TRANSPORT_COUNT);

    // Cheapest plausible trip: best lodging nightly rate for every night,
    // the best transport leg, and all selected entry fees
    let estimated_cost = lodgings
        .first()
        .map(|s| s.item.price_per_night * nights)
        .unwrap_or(0.0)
        + transports.first().map(|s| s.item.price).unwrap_or(0.0)
        + locations.iter().map(|s| s.item.entry_fee).sum::<f64>();

    RecommendationSet {
        locations,
        lodgings,
        transports,
        strategy: OptimizationGoal::Budget.label().to_string(),
        metadata: StrategyMetadata {
            estimated_cost: Some(estimated_cost),
            ..StrategyMetadata::default()
        },
    }
}
