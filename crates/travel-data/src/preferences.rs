//! Traveler preferences and their normalization rules.
//!
//! Preferences arrive as loosely validated caller input. `normalized()`
//! turns them into the canonical form the pipeline runs on: budget and
//! duration positive, the date pair present and consistent with the
//! duration, and the minimum rating clamped to the 0-5 scale.

use crate::error::{RecommendError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default minimum rating threshold when the caller supplies none.
pub const DEFAULT_MIN_RATING: f32 = 3.5;

/// The optimization criterion used to select and rank candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationGoal {
    Budget,
    Activity,
    Comfort,
    Time,
}

impl OptimizationGoal {
    /// Human-readable strategy label used in summaries and logs.
    pub fn label(&self) -> &'static str {
        match self {
            OptimizationGoal::Budget => "budget-optimized",
            OptimizationGoal::Activity => "activity-driven",
            OptimizationGoal::Comfort => "comfort-prioritized",
            OptimizationGoal::Time => "time-efficient",
        }
    }
}

impl FromStr for OptimizationGoal {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(OptimizationGoal::Budget),
            "activity" => Ok(OptimizationGoal::Activity),
            "comfort" => Ok(OptimizationGoal::Comfort),
            "time" => Ok(OptimizationGoal::Time),
            other => Err(RecommendError::StrategyNotFound(other.to_string())),
        }
    }
}

impl fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named thematic enhancement applied on top of a built itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhancementKind {
    Luxury,
    Adventure,
    Cultural,
    FamilyFriendly,
    EcoFriendly,
}

impl FromStr for EnhancementKind {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "luxury" => Ok(EnhancementKind::Luxury),
            "adventure" => Ok(EnhancementKind::Adventure),
            "cultural" => Ok(EnhancementKind::Cultural),
            "family-friendly" | "family" => Ok(EnhancementKind::FamilyFriendly),
            "eco-friendly" | "eco" => Ok(EnhancementKind::EcoFriendly),
            other => Err(RecommendError::ValidationFailure(format!(
                "unknown enhancement: {other}"
            ))),
        }
    }
}

/// Traveler preferences driving one recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Total trip budget; must be positive
    pub budget: f64,
    /// Trip length in days; 0 means "derive from the date pair"
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Interest tags matched against location categories
    #[serde(default)]
    pub interests: Vec<String>,
    pub optimization_goal: OptimizationGoal,
    #[serde(default = "default_min_rating")]
    pub min_rating: f32,
    #[serde(default)]
    pub enhancements: Vec<EnhancementKind>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Traveler identifier for the built itinerary; defaults to "guest"
    #[serde(default)]
    pub traveler: Option<String>,
}

fn default_min_rating() -> f32 {
    DEFAULT_MIN_RATING
}

impl Preferences {
    /// Minimal valid preferences, used as a base by tests and the CLI.
    pub fn new(budget: f64, duration: u32, goal: OptimizationGoal) -> Self {
        Self {
            budget,
            duration,
            start_date: None,
            end_date: None,
            interests: Vec::new(),
            optimization_goal: goal,
            min_rating: DEFAULT_MIN_RATING,
            enhancements: Vec::new(),
            destination: None,
            region: None,
            traveler: None,
        }
    }

    /// Normalize into the canonical form the pipeline runs on.
    ///
    /// Missing dates are derived: `start` defaults to today, `end` to
    /// `start + duration - 1`. A supplied date pair must agree with a
    /// supplied duration; disagreement is a validation failure, never a
    /// silent correction.
    pub fn normalized(&self) -> Result<Preferences> {
        if self.budget <= 0.0 {
            return Err(RecommendError::ValidationFailure(
                "budget must be positive".to_string(),
            ));
        }

        let mut prefs = self.clone();
        match (prefs.start_date, prefs.end_date) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(RecommendError::ValidationFailure(
                        "end date is before start date".to_string(),
                    ));
                }
                let derived = (end - start).num_days() as u32 + 1;
                if prefs.duration == 0 {
                    prefs.duration = derived;
                } else if prefs.duration != derived {
                    return Err(RecommendError::ValidationFailure(format!(
                        "duration {} disagrees with date range of {} days",
                        prefs.duration, derived
                    )));
                }
            }
            (Some(start), None) => {
                Self::require_duration(prefs.duration)?;
                prefs.end_date = Some(start + Duration::days(prefs.duration as i64 - 1));
            }
            (None, Some(end)) => {
                Self::require_duration(prefs.duration)?;
                prefs.start_date = Some(end - Duration::days(prefs.duration as i64 - 1));
            }
            (None, None) => {
                Self::require_duration(prefs.duration)?;
                let start = chrono::Local::now().date_naive();
                prefs.start_date = Some(start);
                prefs.end_date = Some(start + Duration::days(prefs.duration as i64 - 1));
            }
        }

        prefs.min_rating = prefs.min_rating.clamp(0.0, 5.0);
        Ok(prefs)
    }

    fn require_duration(duration: u32) -> Result<()> {
        if duration == 0 {
            return Err(RecommendError::ValidationFailure(
                "duration must be positive when no date range is given".to_string(),
            ));
        }
        Ok(())
    }

    /// Start date after normalization. Panics only if called on
    /// non-normalized preferences, which never leave `normalized()`.
    pub fn start(&self) -> NaiveDate {
        self.start_date.expect("preferences not normalized")
    }

    pub fn end(&self) -> NaiveDate {
        self.end_date.expect("preferences not normalized")
    }

    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}
