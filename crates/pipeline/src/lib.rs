//! Filtering and scoring pipeline for travel candidates.
//!
//! This crate provides:
//! - FilterContext and the FilterStage trait for composable narrowing
//! - FilterChain for folding stages in a caller-specified order
//! - Scoring strategies that turn a filtered context into a
//!   RecommendationSet
//!
//! ## Architecture
//! The pipeline processes candidate pools in stages:
//! 1. Filters narrow and re-score the three pools (budget, duration,
//!    category, rating, availability), each driven by one preference
//!    dimension and skipped when that preference is absent
//! 2. A scoring strategy selects, ranks, and truncates the survivors
//!    according to the requested optimization goal
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterChain, FilterContext, select_recommendations};
//!
//! let chain = FilterChain::canonical();
//! let context = chain.apply(FilterContext::new(prefs.clone(), pools))?;
//! let set = select_recommendations(prefs.optimization_goal, &context);
//! ```

pub mod context;
pub mod filter_chain;
pub mod filters;
pub mod strategies;
pub mod traits;

// Re-export main types
pub use context::{CandidatePools, FilterContext, Scored};
pub use filter_chain::FilterChain;
pub use strategies::{RecommendationSet, StrategyMetadata, select_recommendations};
pub use traits::FilterStage;
