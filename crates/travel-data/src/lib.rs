//! Core domain types for the TripRecs itinerary recommender.
//!
//! This crate defines the data that flows through the recommendation
//! pipeline:
//! - Candidate records (locations, lodgings, transport options)
//! - Traveler preferences and their normalization rules
//! - The error taxonomy shared by every pipeline stage

pub mod error;
pub mod preferences;
pub mod types;

// Re-export commonly used types
pub use error::{RecommendError, Result};
pub use preferences::{EnhancementKind, OptimizationGoal, Preferences};
pub use types::{Location, Lodging, Rated, Transport};
