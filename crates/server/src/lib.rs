//! Server crate for the TripRecs recommendation engine.
//!
//! This crate contains the orchestrator that coordinates all components
//! of the recommendation pipeline.

pub mod orchestrator;

pub use orchestrator::{
    ItinerarySink, PersistedItinerary, Recommendation, RecommendationOrchestrator,
    ResponseEnvelope, Summary,
};
