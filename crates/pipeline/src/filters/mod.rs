//! Filter stage implementations for the candidate pipeline.
//!
//! One file per stage; each narrows and re-scores the pools along a
//! single preference dimension and can be composed into a FilterChain.

pub mod availability;
pub mod budget;
pub mod category;
pub mod duration;
pub mod rating;

// Re-export for convenience
pub use availability::{AlwaysAvailable, AvailabilityFilter, AvailabilityProbe};
pub use budget::BudgetFilter;
pub use category::CategoryFilter;
pub use duration::{DurationFilter, parse_travel_hours};
pub use rating::RatingFilter;
