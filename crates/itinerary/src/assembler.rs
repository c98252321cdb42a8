//! Step-wise itinerary assembly.
//!
//! The assembler accumulates trip parts in any order, keeps a running
//! cost estimate, and validates everything once in the terminal
//! `build()`. Accommodation stay windows and the day-by-day plan are
//! derived, never supplied by the caller.

use crate::draft::{
    AccommodationBooking, ActivityItem, DayPlan, Destination, ItineraryDraft, TransportLeg,
};
use chrono::{Duration, NaiveDate};
use thiserror::Error;
use tracing::debug;
use travel_data::{Location, Lodging, Transport};

#[derive(Error, Debug, PartialEq)]
pub enum BuildError {
    #[error("itinerary title is required")]
    MissingTitle,
    #[error("traveler identifier is required")]
    MissingTraveler,
    #[error("invalid dates: {0}")]
    InvalidDates(String),
    #[error("an itinerary needs at least one destination")]
    NoDestinations,
    #[error("estimated cost {estimated:.2} exceeds budget {budget:.2}")]
    BudgetExceeded { estimated: f64, budget: f64 },
}

/// Builds an [`ItineraryDraft`] from selected candidates.
///
/// Mutating steps take `&mut self` and return it for chaining;
/// `build()` consumes the assembler. The cost estimate is kept current
/// after every step so callers can watch it grow.
#[derive(Debug, Default)]
pub struct ItineraryAssembler {
    title: String,
    traveler: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    budget: Option<f64>,
    interests: Vec<String>,
    strategy: String,
    destinations: Vec<Destination>,
    lodgings: Vec<Lodging>,
    transportation: Vec<TransportLeg>,
    activities: Vec<ActivityItem>,
    estimated_cost: f64,
}

impl ItineraryAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn traveler(&mut self, traveler: impl Into<String>) -> &mut Self {
        self.traveler = traveler.into();
        self
    }

    pub fn dates(&mut self, start: NaiveDate, end: NaiveDate) -> &mut Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self.recompute();
        self
    }

    pub fn budget(&mut self, budget: f64) -> &mut Self {
        self.budget = Some(budget);
        self
    }

    pub fn interests(&mut self, interests: &[String]) -> &mut Self {
        self.interests = interests.to_vec();
        self
    }

    pub fn strategy(&mut self, strategy: impl Into<String>) -> &mut Self {
        self.strategy = strategy.into();
        self
    }

    pub fn add_destinations(&mut self, locations: &[Location]) -> &mut Self {
        self.destinations
            .extend(locations.iter().map(Destination::from));
        self.recompute();
        self
    }

    /// Queue lodgings for the trip. Stay windows are assigned
    /// sequentially once the date range is known: each lodging covers
    /// `ceil(duration / count)` nights, the last one trimmed to fit.
    pub fn add_accommodations(&mut self, lodgings: &[Lodging]) -> &mut Self {
        self.lodgings.extend_from_slice(lodgings);
        self.recompute();
        self
    }

    pub fn add_transport(&mut self, transports: &[Transport]) -> &mut Self {
        // First leg lands on the start date when known; the rest float
        let arrival = self.start_date.filter(|_| self.transportation.is_empty());
        for (i, transport) in transports.iter().enumerate() {
            let date = if i == 0 { arrival } else { None };
            self.transportation
                .push(TransportLeg::from_transport(transport, date));
        }
        self.recompute();
        self
    }

    pub fn add_activity(&mut self, activity: ActivityItem) -> &mut Self {
        self.activities.push(activity);
        self.recompute();
        self
    }

    /// Current running cost estimate.
    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }

    /// Discard all accumulated state for reuse.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn duration(&self) -> Option<u32> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end >= start => {
                Some((end - start).num_days() as u32 + 1)
            }
            _ => None,
        }
    }

    /// Spread queued lodgings across the trip as sequential bookings.
    fn bookings(&self) -> Vec<AccommodationBooking> {
        let (Some(start), Some(duration)) = (self.start_date, self.duration()) else {
            return Vec::new();
        };
        if self.lodgings.is_empty() {
            return Vec::new();
        }

        let nights_per = duration.div_ceil(self.lodgings.len() as u32);
        let mut bookings = Vec::new();
        let mut night = 0u32;
        for lodging in &self.lodgings {
            if night >= duration {
                break;
            }
            let nights = nights_per.min(duration - night);
            let check_in = start + Duration::days(i64::from(night));
            bookings.push(AccommodationBooking {
                id: lodging.id.clone(),
                name: lodging.name.clone(),
                city: lodging.city.clone(),
                check_in,
                check_out: check_in + Duration::days(i64::from(nights)),
                nights,
                price_per_night: lodging.price_per_night,
                total_cost: f64::from(nights) * lodging.price_per_night,
                upgrades: Vec::new(),
            });
            night += nights;
        }
        bookings
    }

    fn recompute(&mut self) {
        let destinations: f64 = self.destinations.iter().map(|d| d.entry_fee).sum();
        let accommodations: f64 = self.bookings().iter().map(|b| b.total_cost).sum();
        let transport: f64 = self.transportation.iter().map(|t| t.price).sum();
        let activities: f64 = self.activities.iter().map(|a| a.cost).sum();
        self.estimated_cost = destinations + accommodations + transport + activities;
    }

    /// Validate and produce the draft.
    pub fn build(self) -> Result<ItineraryDraft, BuildError> {
        if self.title.trim().is_empty() {
            return Err(BuildError::MissingTitle);
        }
        if self.traveler.trim().is_empty() {
            return Err(BuildError::MissingTraveler);
        }
        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(BuildError::InvalidDates("date range not set".to_string())),
        };
        if end < start {
            return Err(BuildError::InvalidDates(format!(
                "end {end} is before start {start}"
            )));
        }
        if self.destinations.is_empty() {
            return Err(BuildError::NoDestinations);
        }
        if let Some(budget) = self.budget {
            if self.estimated_cost > budget {
                return Err(BuildError::BudgetExceeded {
                    estimated: self.estimated_cost,
                    budget,
                });
            }
        }

        let duration = (end - start).num_days() as u32 + 1;
        let accommodations = self.bookings();
        let daily_plans = self.derive_day_plans(start, duration, &accommodations);
        debug!(
            title = %self.title,
            duration,
            destinations = self.destinations.len(),
            cost = self.estimated_cost,
            "itinerary assembled"
        );

        Ok(ItineraryDraft {
            title: self.title,
            traveler: self.traveler,
            start_date: start,
            end_date: end,
            duration,
            budget: self.budget.unwrap_or(0.0),
            interests: self.interests,
            strategy: self.strategy,
            destinations: self.destinations,
            accommodations,
            transportation: self.transportation,
            activities: self.activities,
            daily_plans,
            estimated_cost: self.estimated_cost,
        })
    }

    fn derive_day_plans(
        &self,
        start: NaiveDate,
        duration: u32,
        accommodations: &[AccommodationBooking],
    ) -> Vec<DayPlan> {
        let per_day = self.destinations.len().div_ceil(duration as usize);
        (0..duration)
            .map(|day| {
                let date = start + Duration::days(i64::from(day));
                let destinations: Vec<Destination> = self
                    .destinations
                    .iter()
                    .skip(day as usize * per_day)
                    .take(per_day)
                    .cloned()
                    .collect();
                let mut slots = destinations.iter().map(|d| d.name.clone());

                let lodging = accommodations
                    .iter()
                    .find(|b| b.covers(date))
                    .map(|b| b.name.clone());
                let transport: Vec<TransportLeg> = self
                    .transportation
                    .iter()
                    .filter(|t| t.date == Some(date))
                    .cloned()
                    .collect();
                let activities: Vec<ActivityItem> = self
                    .activities
                    .iter()
                    .filter(|a| a.date == Some(date))
                    .cloned()
                    .collect();

                let daily_cost = destinations.iter().map(|d| d.entry_fee).sum::<f64>()
                    + accommodations
                        .iter()
                        .find(|b| b.covers(date))
                        .map(|b| b.price_per_night)
                        .unwrap_or(0.0)
                    + transport.iter().map(|t| t.price).sum::<f64>()
                    + activities.iter().map(|a| a.cost).sum::<f64>();

                DayPlan {
                    day: day + 1,
                    date,
                    morning: slots.next(),
                    afternoon: slots.next(),
                    evening: slots.next(),
                    destinations,
                    lodging,
                    transport,
                    activities,
                    daily_cost,
                }
            })
            .collect()
    }
}
