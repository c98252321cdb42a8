//! The context object threaded through the filter chain.
//!
//! Each filter stage consumes the previous context and returns a new one;
//! no stage mutates input shared with another stage. The context carries
//! the normalized preferences, the three candidate pools with their
//! running scores, and the ordered list of applied filter names.

use serde::Serialize;
use travel_data::{Location, Lodging, Preferences, Transport};

/// A candidate record with its running pipeline score.
///
/// Filters and strategies communicate re-scoring through this wrapper
/// instead of mutating the records themselves.
#[derive(Debug, Clone, Serialize)]
pub struct Scored<T> {
    pub item: T,
    pub score: f32,
}

impl<T> Scored<T> {
    pub fn new(item: T) -> Self {
        Self { item, score: 0.0 }
    }

    pub fn with_score(item: T, score: f32) -> Self {
        Self { item, score }
    }
}

/// The three independent candidate pools.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidatePools {
    pub locations: Vec<Scored<Location>>,
    pub lodgings: Vec<Scored<Lodging>>,
    pub transports: Vec<Scored<Transport>>,
}

impl CandidatePools {
    /// Wrap raw supplier records with zeroed scores.
    pub fn from_records(
        locations: Vec<Location>,
        lodgings: Vec<Lodging>,
        transports: Vec<Transport>,
    ) -> Self {
        Self {
            locations: locations.into_iter().map(Scored::new).collect(),
            lodgings: lodgings.into_iter().map(Scored::new).collect(),
            transports: transports.into_iter().map(Scored::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.lodgings.is_empty() && self.transports.is_empty()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.locations.len(),
            self.lodgings.len(),
            self.transports.len(),
        )
    }
}

/// Everything a filter stage needs: preferences, pools, and the audit
/// trail of stages already applied.
#[derive(Debug, Clone)]
pub struct FilterContext {
    pub preferences: Preferences,
    pub pools: CandidatePools,
    pub applied_filters: Vec<String>,
}

impl FilterContext {
    pub fn new(preferences: Preferences, pools: CandidatePools) -> Self {
        Self {
            preferences,
            pools,
            applied_filters: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_data::OptimizationGoal;

    #[test]
    fn test_empty_pools() {
        let pools = CandidatePools::from_records(vec![], vec![], vec![]);
        assert!(pools.is_empty());
        assert_eq!(pools.counts(), (0, 0, 0));
    }

    #[test]
    fn test_context_starts_with_no_applied_filters() {
        let prefs = Preferences::new(1000.0, 3, OptimizationGoal::Budget);
        let context = FilterContext::new(prefs, CandidatePools::default());
        assert!(context.applied_filters.is_empty());
    }
}
