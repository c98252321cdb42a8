//! Filter that sizes the pools to the trip length.
//!
//! Caps the location pool to three sightseeing slots per day and drops
//! transport whose estimated travel time exceeds four hours. Travel time
//! comes from a free-text field, so parsing is best-effort with a fixed
//! default for unparseable values.

use crate::context::FilterContext;
use crate::traits::FilterStage;
use anyhow::Result;
use travel_data::{Preferences, Rated};

/// Assumed sightseeing slots per day.
pub const SIGHTSEEING_SLOTS_PER_DAY: usize = 3;

/// Transport legs longer than this are dropped.
const MAX_TRAVEL_HOURS: f32 = 4.0;

/// Assumed travel time when the duration text is unparseable.
const DEFAULT_TRAVEL_HOURS: f32 = 2.0;

/// Parse a free-text trip duration into hours.
///
/// Handles "2h 30m", "150 min", "3 hours", and bare numbers (taken as
/// hours). Anything unparseable falls back to 2 hours.
pub fn parse_travel_hours(text: &str) -> f32 {
    let text = text.trim().to_lowercase();
    let mut total = 0.0_f32;
    let mut found_unit = false;
    let mut pending: Option<f32> = None;

    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == '.' {
            let mut number = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    number.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            pending = number.parse().ok();
        } else if c.is_alphabetic() {
            let mut unit = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphabetic() {
                    unit.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            if let Some(value) = pending.take() {
                if unit.starts_with('h') {
                    total += value;
                    found_unit = true;
                } else if unit.starts_with('m') {
                    total += value / 60.0;
                    found_unit = true;
                }
            }
        } else {
            chars.next();
        }
    }

    if found_unit {
        total
    } else if let Some(bare) = pending {
        bare
    } else {
        DEFAULT_TRAVEL_HOURS
    }
}

/// Sizes the location pool to the trip and drops slow transport.
pub struct DurationFilter;

impl FilterStage for DurationFilter {
    fn name(&self) -> &str {
        "DurationFilter"
    }

    fn applies(&self, preferences: &Preferences) -> bool {
        preferences.duration > 0
    }

    fn handle(&self, mut context: FilterContext) -> Result<FilterContext> {
        let slots = context.preferences.duration as usize * SIGHTSEEING_SLOTS_PER_DAY;

        context
            .pools
            .locations
            .sort_by(|a, b| b.item.rating_or_zero().total_cmp(&a.item.rating_or_zero()));
        context.pools.locations.truncate(slots);

        context
            .pools
            .transports
            .retain(|s| parse_travel_hours(&s.item.duration) <= MAX_TRAVEL_HOURS);

        Ok(context)
    }
}
