//! The itinerary document produced by the assembler.
//!
//! A draft is a plain data snapshot: destinations, bookings, transport
//! legs, activities, and the derived day-by-day plan. All derivation
//! logic lives in the assembler; these types only hold the result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use travel_data::{Location, Rated, Transport};

/// A sight selected for the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub city: String,
    pub category: String,
    pub entry_fee: f64,
    pub rating: f32,
}

impl From<&Location> for Destination {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            city: location.city.clone(),
            category: location.primary_category().to_string(),
            entry_fee: location.entry_fee,
            rating: location.rating_or_zero(),
        }
    }
}

/// A lodging with its assigned stay window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccommodationBooking {
    pub id: String,
    pub name: String,
    pub city: String,
    pub check_in: NaiveDate,
    /// Exclusive: the morning the traveler moves on
    pub check_out: NaiveDate,
    pub nights: u32,
    pub price_per_night: f64,
    pub total_cost: f64,
    /// Upgrades added by enhancements ("suite upgrade", ...)
    #[serde(default)]
    pub upgrades: Vec<String>,
}

impl AccommodationBooking {
    /// Whether the traveler sleeps here on the night of `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

/// A transport option placed on the trip, optionally pinned to a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportLeg {
    pub id: String,
    pub mode: String,
    pub origin: String,
    pub destination: String,
    pub price: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub upgrades: Vec<String>,
}

impl TransportLeg {
    pub fn from_transport(transport: &Transport, date: Option<NaiveDate>) -> Self {
        Self {
            id: transport.id.clone(),
            mode: transport.mode.clone(),
            origin: transport.origin.clone(),
            destination: transport.destination.clone(),
            price: transport.price,
            date,
            upgrades: Vec::new(),
        }
    }
}

/// A scheduled or free-floating activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityItem {
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub cost: f64,
    /// Enhancement that contributed this activity, if any
    #[serde(default)]
    pub tag: Option<String>,
}

/// One day of the trip with its slots and running cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    pub date: NaiveDate,
    pub morning: Option<String>,
    pub afternoon: Option<String>,
    pub evening: Option<String>,
    pub destinations: Vec<Destination>,
    /// Lodging covering this night, by name
    pub lodging: Option<String>,
    pub transport: Vec<TransportLeg>,
    pub activities: Vec<ActivityItem>,
    pub daily_cost: f64,
}

/// The fully assembled itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDraft {
    pub title: String,
    pub traveler: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive day count: `end - start + 1`
    pub duration: u32,
    pub budget: f64,
    pub interests: Vec<String>,
    pub strategy: String,
    pub destinations: Vec<Destination>,
    pub accommodations: Vec<AccommodationBooking>,
    pub transportation: Vec<TransportLeg>,
    pub activities: Vec<ActivityItem>,
    pub daily_plans: Vec<DayPlan>,
    pub estimated_cost: f64,
}
