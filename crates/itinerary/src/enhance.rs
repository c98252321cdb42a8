//! Thematic enhancement layers over a built itinerary.
//!
//! Each enhancement wraps the itinerary with extra features, synthetic
//! activities, and upgrade notes, and scales the cost by a fixed
//! multiplier. Enhancements stack: features accumulate, multipliers
//! compose multiplicatively, and the description records the order
//! they were applied in. Synthetic activities carry no cost of their
//! own, so the final cost is exactly the base times the product of
//! the multipliers regardless of order.

use crate::draft::{ActivityItem, ItineraryDraft};
use serde::{Deserialize, Serialize};
use tracing::debug;
use travel_data::EnhancementKind;

/// What one enhancement adds to an itinerary.
struct EnhancementProfile {
    label: &'static str,
    multiplier: f64,
    features: &'static [&'static str],
    activities: &'static [&'static str],
    lodging_upgrade: Option<&'static str>,
    transport_upgrade: Option<&'static str>,
}

fn profile(kind: EnhancementKind) -> EnhancementProfile {
    match kind {
        EnhancementKind::Luxury => EnhancementProfile {
            label: "luxury",
            multiplier: 2.0,
            features: &[
                "Premium accommodations",
                "Fine dining reservations",
                "Private transfers",
            ],
            activities: &["Sunset fine dining experience", "Spa afternoon"],
            lodging_upgrade: Some("suite upgrade"),
            transport_upgrade: Some("first-class seating"),
        },
        EnhancementKind::Adventure => EnhancementProfile {
            label: "adventure",
            multiplier: 1.4,
            features: &["Guided outdoor excursions", "Gear rental included"],
            activities: &["Guided coastal hike", "Kayak tour"],
            lodging_upgrade: None,
            transport_upgrade: None,
        },
        EnhancementKind::Cultural => EnhancementProfile {
            label: "cultural",
            multiplier: 1.3,
            features: &["Local heritage walks", "Museum passes"],
            activities: &["Old town walking tour", "Craft workshop"],
            lodging_upgrade: None,
            transport_upgrade: None,
        },
        EnhancementKind::FamilyFriendly => EnhancementProfile {
            label: "family-friendly",
            multiplier: 1.25,
            features: &["Kid-friendly scheduling", "Family room preferences"],
            activities: &["City park picnic", "Interactive science museum visit"],
            lodging_upgrade: Some("family room"),
            transport_upgrade: None,
        },
        EnhancementKind::EcoFriendly => EnhancementProfile {
            label: "eco-friendly",
            multiplier: 1.1,
            features: &["Low-impact transport choices", "Certified eco stays"],
            activities: &["Guided bike tour", "Farm-to-table tasting"],
            lodging_upgrade: Some("eco-certified stay"),
            transport_upgrade: Some("rail-preferred routing"),
        },
    }
}

/// An itinerary with zero or more enhancement layers applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedItinerary {
    pub description: String,
    pub cost: f64,
    pub features: Vec<String>,
    pub applied: Vec<EnhancementKind>,
    pub data: ItineraryDraft,
}

impl EnhancedItinerary {
    /// Wrap a draft with no enhancements applied yet.
    pub fn base(draft: ItineraryDraft) -> Self {
        Self {
            description: format!(
                "{}-day itinerary for {}",
                draft.duration, draft.traveler
            ),
            cost: draft.estimated_cost,
            features: vec![
                format!("{} destinations", draft.destinations.len()),
                format!("{} strategy", draft.strategy),
            ],
            applied: Vec::new(),
            data: draft,
        }
    }

    /// Apply one enhancement layer on top of the current state.
    pub fn enhance(mut self, kind: EnhancementKind) -> Self {
        let profile = profile(kind);
        self.cost *= profile.multiplier;
        self.description.push_str(" + ");
        self.description.push_str(profile.label);
        self.features
            .extend(profile.features.iter().map(|f| f.to_string()));
        self.applied.push(kind);

        self.data
            .activities
            .extend(profile.activities.iter().map(|name| ActivityItem {
                name: name.to_string(),
                date: None,
                cost: 0.0,
                tag: Some(profile.label.to_string()),
            }));
        if let Some(upgrade) = profile.lodging_upgrade {
            for booking in &mut self.data.accommodations {
                booking.upgrades.push(upgrade.to_string());
            }
        }
        if let Some(upgrade) = profile.transport_upgrade {
            for leg in &mut self.data.transportation {
                leg.upgrades.push(upgrade.to_string());
            }
        }

        debug!(enhancement = profile.label, cost = self.cost, "enhancement applied");
        self
    }

    /// Apply a whole stack of enhancements in the given order.
    pub fn apply_stack(draft: ItineraryDraft, kinds: &[EnhancementKind]) -> Self {
        kinds
            .iter()
            .fold(Self::base(draft), |itinerary, &kind| itinerary.enhance(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::ItineraryAssembler;
    use chrono::NaiveDate;
    use travel_data::Location;

    fn draft_with_cost(cost: f64) -> ItineraryDraft {
        let mut assembler = ItineraryAssembler::new();
        assembler
            .title("Lisbon Getaway")
            .traveler("guest")
            .dates(
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
            )
            .strategy("budget-optimized")
            .add_destinations(&[Location {
                id: "loc-1".to_string(),
                name: "Castle".to_string(),
                city: "Lisbon".to_string(),
                region: "Portugal".to_string(),
                categories: vec!["cultural".to_string()],
                rating: Some(4.7),
                review_count: 300,
                entry_fee: cost,
                description: String::new(),
            }]);
        assembler.build().unwrap()
    }

    #[test]
    fn test_luxury_doubles_the_cost() {
        let enhanced = EnhancedItinerary::base(draft_with_cost(500.0))
            .enhance(EnhancementKind::Luxury);
        assert_eq!(enhanced.cost, 1000.0);
        assert!(enhanced
            .features
            .iter()
            .any(|f| f == "Premium accommodations"));
    }

    #[test]
    fn test_stack_cost_is_order_independent() {
        let a = EnhancedItinerary::apply_stack(
            draft_with_cost(500.0),
            &[EnhancementKind::Luxury, EnhancementKind::Adventure],
        );
        let b = EnhancedItinerary::apply_stack(
            draft_with_cost(500.0),
            &[EnhancementKind::Adventure, EnhancementKind::Luxury],
        );
        assert!((a.cost - b.cost).abs() < 1e-9);
        assert!((a.cost - 1400.0).abs() < 1e-9);
    }

    #[test]
    fn test_description_records_application_order() {
        let a = EnhancedItinerary::apply_stack(
            draft_with_cost(100.0),
            &[EnhancementKind::Luxury, EnhancementKind::Cultural],
        );
        let b = EnhancedItinerary::apply_stack(
            draft_with_cost(100.0),
            &[EnhancementKind::Cultural, EnhancementKind::Luxury],
        );
        assert!(a.description.ends_with("+ luxury + cultural"));
        assert!(b.description.ends_with("+ cultural + luxury"));
        assert_ne!(a.description, b.description);
    }

    #[test]
    fn test_layers_accumulate_without_removal() {
        let enhanced = EnhancedItinerary::apply_stack(
            draft_with_cost(100.0),
            &[EnhancementKind::Adventure, EnhancementKind::EcoFriendly],
        );
        let tags: Vec<_> = enhanced
            .data
            .activities
            .iter()
            .filter_map(|a| a.tag.as_deref())
            .collect();
        assert!(tags.contains(&"adventure"));
        assert!(tags.contains(&"eco-friendly"));
        assert_eq!(
            enhanced.applied,
            vec![EnhancementKind::Adventure, EnhancementKind::EcoFriendly]
        );
    }

    #[test]
    fn test_upgrades_attach_to_bookings() {
        let mut assembler = ItineraryAssembler::new();
        assembler
            .title("Upgraded")
            .traveler("guest")
            .dates(
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 2).unwrap(),
            )
            .add_destinations(&[Location {
                id: "loc-1".to_string(),
                name: "Castle".to_string(),
                city: "Lisbon".to_string(),
                region: String::new(),
                categories: vec![],
                rating: Some(4.0),
                review_count: 10,
                entry_fee: 0.0,
                description: String::new(),
            }])
            .add_accommodations(&[travel_data::Lodging {
                id: "ldg-1".to_string(),
                name: "Hotel Central".to_string(),
                city: "Lisbon".to_string(),
                kind: "hotel".to_string(),
                price_per_night: 90.0,
                currency: "USD".to_string(),
                pricing_unit: "per_night".to_string(),
                rating: Some(4.3),
                review_count: 80,
                amenities: vec![],
                stars: Some(4),
            }]);
        let draft = assembler.build().unwrap();

        let enhanced = EnhancedItinerary::base(draft).enhance(EnhancementKind::Luxury);
        assert_eq!(
            enhanced.data.accommodations[0].upgrades,
            vec!["suite upgrade"]
        );
    }
}
