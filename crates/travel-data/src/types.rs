//! Candidate record types.
//!
//! Three independent record kinds come back from the candidate supplier:
//! locations (things to see), lodgings (places to stay), and transport
//! options (ways to move between places). Each carries at minimum an
//! identifier, an optional 0-5 rating, and a kind-specific cost field.

use serde::{Deserialize, Serialize};

/// A sight, attraction, or point of interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub region: String,
    /// Free-form category tags ("museum", "hiking", "beach", ...)
    #[serde(default)]
    pub categories: Vec<String>,
    /// Average visitor rating on a 0-5 scale; absent for unrated records
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: u32,
    /// Entry fee per person; 0.0 means free admission
    #[serde(default)]
    pub entry_fee: f64,
    #[serde(default)]
    pub description: String,
}

impl Location {
    /// Primary category used for diversity-constrained selection.
    pub fn primary_category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or("general")
    }
}

/// A place to stay, priced per night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lodging {
    pub id: String,
    pub name: String,
    pub city: String,
    /// Lodging kind ("hotel", "hostel", "guesthouse", ...)
    #[serde(default)]
    pub kind: String,
    pub price_per_night: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_night_unit")]
    pub pricing_unit: String,
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub stars: Option<u8>,
}

/// A way to move between places, priced per trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transport {
    pub id: String,
    /// Transport mode ("train", "bus", "flight", ...)
    pub mode: String,
    #[serde(default)]
    pub operator: String,
    pub origin: String,
    pub destination: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_trip_unit")]
    pub pricing_unit: String,
    /// Free-text trip duration ("2h 30m", "150 min", "3 hours")
    #[serde(default)]
    pub duration: String,
    /// Service class where the operator distinguishes one
    pub class: Option<String>,
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: u32,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_night_unit() -> String {
    "per_night".to_string()
}

fn default_trip_unit() -> String {
    "per_trip".to_string()
}

/// Common rating access for all three record kinds.
///
/// Rating-driven stages (the rating filter, every scoring strategy) are
/// written once against this trait instead of three times per pool.
pub trait Rated {
    /// Rating on a 0-5 scale, or None for unrated records.
    fn rating(&self) -> Option<f32>;

    fn review_count(&self) -> u32;

    /// Rating with unrated records pinned to 0.0 for sorting.
    fn rating_or_zero(&self) -> f32 {
        self.rating().unwrap_or(0.0)
    }
}

impl Rated for Location {
    fn rating(&self) -> Option<f32> {
        self.rating
    }

    fn review_count(&self) -> u32 {
        self.review_count
    }
}

impl Rated for Lodging {
    fn rating(&self) -> Option<f32> {
        self.rating
    }

    fn review_count(&self) -> u32 {
        self.review_count
    }
}

impl Rated for Transport {
    fn rating(&self) -> Option<f32> {
        self.rating
    }

    fn review_count(&self) -> u32 {
        self.review_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_category_defaults_to_general() {
        let location = Location {
            id: "loc-1".to_string(),
            name: "Old Town".to_string(),
            city: "Lisbon".to_string(),
            region: "Portugal".to_string(),
            categories: vec![],
            rating: Some(4.5),
            review_count: 120,
            entry_fee: 0.0,
            description: String::new(),
        };
        assert_eq!(location.primary_category(), "general");
    }

    #[test]
    fn test_rated_pins_missing_rating_to_zero() {
        let transport = Transport {
            id: "tr-1".to_string(),
            mode: "bus".to_string(),
            operator: String::new(),
            origin: "Lisbon".to_string(),
            destination: "Porto".to_string(),
            price: 25.0,
            currency: "USD".to_string(),
            pricing_unit: "per_trip".to_string(),
            duration: "3h".to_string(),
            class: None,
            rating: None,
            review_count: 0,
        };
        assert_eq!(transport.rating_or_zero(), 0.0);
    }

    #[test]
    fn test_lodging_deserializes_with_defaults() {
        let json = r#"{
            "id": "ldg-1",
            "name": "Hotel Avenida",
            "city": "Lisbon",
            "price_per_night": 90.0,
            "rating": 4.2,
            "stars": 4
        }"#;
        let lodging: Lodging = serde_json::from_str(json).unwrap();
        assert_eq!(lodging.currency, "USD");
        assert_eq!(lodging.pricing_unit, "per_night");
        assert!(lodging.amenities.is_empty());
    }
}
