//! Filter that narrows the pools against fixed budget shares.
//!
//! The total budget splits into fixed shares: 40% lodging, 30% transport,
//! 30% activities and entry fees. Lodgings and transport priced at zero
//! are treated as invalid records, not as free.

use crate::context::FilterContext;
use crate::traits::FilterStage;
use anyhow::Result;
use travel_data::{Preferences, Rated};

pub const LODGING_SHARE: f64 = 0.40;
pub const TRANSPORT_SHARE: f64 = 0.30;
pub const ACTIVITY_SHARE: f64 = 0.30;

/// Entry fees at or below this land in the mid priority tier.
const LOW_FEE_CEILING: f64 = 50.0;

/// Narrows lodgings, transport, and location fees to the budget shares.
///
/// ## Algorithm
/// 1. Drop lodgings whose nightly price x duration exceeds the lodging
///    share, or whose price is zero
/// 2. Drop transport over the transport share, or priced at zero
/// 3. Drop locations whose entry fee alone exceeds the activity share
/// 4. Tier remaining locations: free first, then low-fee, then the rest,
///    each tier sorted by rating descending
pub struct BudgetFilter;

fn fee_tier(entry_fee: f64) -> u8 {
    if entry_fee == 0.0 {
        0
    } else if entry_fee <= LOW_FEE_CEILING {
        1
    } else {
        2
    }
}

fn tier_score(tier: u8) -> f32 {
    match tier {
        0 => 1.0,
        1 => 0.7,
        _ => 0.4,
    }
}

impl FilterStage for BudgetFilter {
    fn name(&self) -> &str {
        "BudgetFilter"
    }

    fn applies(&self, preferences: &Preferences) -> bool {
        preferences.budget > 0.0
    }

    fn handle(&self, mut context: FilterContext) -> Result<FilterContext> {
        let budget = context.preferences.budget;
        let nights = f64::from(context.preferences.duration.max(1));
        let lodging_cap = budget * LODGING_SHARE;
        let transport_cap = budget * TRANSPORT_SHARE;
        let activity_cap = budget * ACTIVITY_SHARE;

        context.pools.lodgings.retain(|s| {
            s.item.price_per_night > 0.0 && s.item.price_per_night * nights <= lodging_cap
        });

        context
            .pools
            .transports
            .retain(|s| s.item.price > 0.0 && s.item.price <= transport_cap);

        // Locations are never dropped for cost unless the entry fee alone
        // blows the activity share
        context
            .pools
            .locations
            .retain(|s| s.item.entry_fee <= activity_cap);

        for scored in &mut context.pools.locations {
            scored.score = tier_score(fee_tier(scored.item.entry_fee));
        }
        context.pools.locations.sort_by(|a, b| {
            fee_tier(a.item.entry_fee)
                .cmp(&fee_tier(b.item.entry_fee))
                .then(b.item.rating_or_zero().total_cmp(&a.item.rating_or_zero()))
        });

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CandidatePools;
    use travel_data::{Location, Lodging, OptimizationGoal, Preferences, Transport};

    fn location(id: &str, entry_fee: f64, rating: f32) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_string(),
            city: "Lisbon".to_string(),
            region: "Portugal".to_string(),
            categories: vec!["museum".to_string()],
            rating: Some(rating),
            review_count: 10,
            entry_fee,
            description: String::new(),
        }
    }

    fn lodging(id: &str, price_per_night: f64) -> Lodging {
        Lodging {
            id: id.to_string(),
            name: id.to_string(),
            city: "Lisbon".to_string(),
            kind: "hotel".to_string(),
            price_per_night,
            currency: "USD".to_string(),
            pricing_unit: "per_night".to_string(),
            rating: Some(4.0),
            review_count: 10,
            amenities: vec![],
            stars: Some(3),
        }
    }

    fn transport(id: &str, price: f64) -> Transport {
        Transport {
            id: id.to_string(),
            mode: "train".to_string(),
            operator: String::new(),
            origin: "Lisbon".to_string(),
            destination: "Porto".to_string(),
            price,
            currency: "USD".to_string(),
            pricing_unit: "per_trip".to_string(),
            duration: "2h".to_string(),
            class: None,
            rating: Some(4.0),
            review_count: 10,
        }
    }

    fn run(budget: f64, duration: u32, pools: CandidatePools) -> FilterContext {
        let prefs = Preferences::new(budget, duration, OptimizationGoal::Budget)
            .normalized()
            .unwrap();
        BudgetFilter
            .handle(FilterContext::new(prefs, pools))
            .unwrap()
    }

    #[test]
    fn test_lodgings_respect_the_lodging_share() {
        let budget = 1000.0;
        let duration = 4;
        let pools = CandidatePools::from_records(
            vec![],
            vec![
                lodging("cheap", 50.0),   // 200 total, within 400
                lodging("edge", 100.0),   // 400 total, exactly the share
                lodging("costly", 150.0), // 600 total, over
            ],
            vec![],
        );

        let out = run(budget, duration, pools);
        let nights = f64::from(duration);
        for scored in &out.pools.lodgings {
            assert!(scored.item.price_per_night * nights <= budget * LODGING_SHARE);
        }
        assert_eq!(out.pools.lodgings.len(), 2);
    }

    #[test]
    fn test_zero_priced_records_are_invalid_not_free() {
        let pools = CandidatePools::from_records(
            vec![],
            vec![lodging("zero", 0.0)],
            vec![transport("zero", 0.0)],
        );
        let out = run(1000.0, 3, pools);
        assert!(out.pools.lodgings.is_empty());
        assert!(out.pools.transports.is_empty());
    }

    #[test]
    fn test_free_locations_lead_then_low_fee_then_rating() {
        let pools = CandidatePools::from_records(
            vec![
                location("pricey", 80.0, 5.0),
                location("low-b", 20.0, 4.0),
                location("free", 0.0, 3.6),
                location("low-a", 10.0, 4.8),
            ],
            vec![],
            vec![],
        );
        let out = run(1000.0, 3, pools);
        let ids: Vec<&str> = out
            .pools
            .locations
            .iter()
            .map(|s| s.item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["free", "low-a", "low-b", "pricey"]);
    }

    #[test]
    fn test_location_over_activity_share_is_dropped() {
        let pools =
            CandidatePools::from_records(vec![location("gala", 400.0, 5.0)], vec![], vec![]);
        let out = run(1000.0, 3, pools); // activity share 300
        assert!(out.pools.locations.is_empty());
    }
}
