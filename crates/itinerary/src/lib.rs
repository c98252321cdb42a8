//! Itinerary assembly and enhancement.
//!
//! Turns a set of selected candidates into a day-by-day itinerary
//! draft, then layers optional thematic enhancements on top.

pub mod assembler;
pub mod draft;
pub mod enhance;

pub use assembler::{BuildError, ItineraryAssembler};
pub use draft::{
    AccommodationBooking, ActivityItem, DayPlan, Destination, ItineraryDraft, TransportLeg,
};
pub use enhance::EnhancedItinerary;
