//! Filter that checks lodging and transport availability for the dates.
//!
//! The original system simulated availability with unseeded randomness,
//! which made pipeline output non-deterministic whenever dates were
//! supplied. Here the check sits behind a probe trait: the default probe
//! keeps the observed 80%/90% acceptance rates but draws from an RNG
//! seeded by the record id and date range, so the same request always
//! sees the same availability. A real calendar-backed probe can be
//! injected without touching the filter.

use crate::context::FilterContext;
use crate::traits::FilterStage;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use travel_data::{Lodging, Preferences, Transport};

/// Availability decision for one record over a date range.
pub trait AvailabilityProbe: Send + Sync {
    fn lodging_available(&self, lodging: &Lodging, start: NaiveDate, end: NaiveDate) -> bool;

    fn transport_available(&self, transport: &Transport, start: NaiveDate, end: NaiveDate)
    -> bool;
}

/// Deterministic stand-in for a real calendar check.
pub struct DeterministicProbe {
    lodging_acceptance: f64,
    transport_acceptance: f64,
}

impl Default for DeterministicProbe {
    fn default() -> Self {
        Self {
            lodging_acceptance: 0.80,
            transport_acceptance: 0.90,
        }
    }
}

/// FNV-1a fold of the record id and date range into a stable seed.
fn stable_seed(id: &str, start: NaiveDate, end: NaiveDate) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let mut fold = |byte: u8| {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    };
    for byte in id.bytes() {
        fold(byte);
    }
    for day in [start.num_days_from_ce(), end.num_days_from_ce()] {
        for byte in day.to_le_bytes() {
            fold(byte);
        }
    }
    hash
}

fn draw(id: &str, start: NaiveDate, end: NaiveDate, acceptance: f64) -> bool {
    let mut rng = StdRng::seed_from_u64(stable_seed(id, start, end));
    rng.random::<f64>() < acceptance
}

impl AvailabilityProbe for DeterministicProbe {
    fn lodging_available(&self, lodging: &Lodging, start: NaiveDate, end: NaiveDate) -> bool {
        draw(&lodging.id, start, end, self.lodging_acceptance)
    }

    fn transport_available(
        &self,
        transport: &Transport,
        start: NaiveDate,
        end: NaiveDate,
    ) -> bool {
        draw(&transport.id, start, end, self.transport_acceptance)
    }
}

/// Probe that accepts everything; used by tests that pin pool contents.
pub struct AlwaysAvailable;

impl AvailabilityProbe for AlwaysAvailable {
    fn lodging_available(&self, _: &Lodging, _: NaiveDate, _: NaiveDate) -> bool {
        true
    }

    fn transport_available(&self, _: &Transport, _: NaiveDate, _: NaiveDate) -> bool {
        true
    }
}

/// Drops lodgings and transport unavailable for the trip dates.
///
/// Only runs when both dates are present; locations are never dropped
/// for availability.
pub struct AvailabilityFilter {
    probe: Box<dyn AvailabilityProbe>,
}

impl AvailabilityFilter {
    pub fn new(probe: impl AvailabilityProbe + 'static) -> Self {
        Self {
            probe: Box::new(probe),
        }
    }

    /// The default deterministic probe.
    pub fn deterministic() -> Self {
        Self::new(DeterministicProbe::default())
    }
}

impl FilterStage for AvailabilityFilter {
    fn name(&self) -> &str {
        "AvailabilityFilter"
    }

    fn applies(&self, preferences: &Preferences) -> bool {
        preferences.has_date_range()
    }

    fn handle(&self, mut context: FilterContext) -> Result<FilterContext> {
        let start = context.preferences.start();
        let end = context.preferences.end();

        context
            .pools
            .lodgings
            .retain(|s| self.probe.lodging_available(&s.item, start, end));
        context
            .pools
            .transports
            .retain(|s| self.probe.transport_available(&s.item, start, end));

        Ok(context)
    }
}
