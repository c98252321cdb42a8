//! The FilterChain folds ordered filter stages over a context.
//!
//! Stages are an explicit ordered list applied left-to-right; ordering is
//! an observable property (filtering a pool already narrowed by an
//! earlier stage), not hidden linked-list state.

use crate::context::FilterContext;
use crate::filters::{
    AvailabilityFilter, BudgetFilter, CategoryFilter, DurationFilter, RatingFilter,
};
use crate::traits::FilterStage;
use anyhow::Result;
use tracing::debug;

/// Chains filter stages into a single narrowing pass.
///
/// ## Usage
/// ```ignore
/// let chain = FilterChain::new()
///     .add_stage(BudgetFilter)
///     .add_stage(RatingFilter);
///
/// let context = chain.apply(context)?;
/// ```
pub struct FilterChain {
    stages: Vec<Box<dyn FilterStage>>,
}

impl FilterChain {
    /// Create a new empty FilterChain.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The canonical stage order: Budget, Duration, Category, Rating,
    /// Availability. Each stage still only runs when its preference is
    /// present (see [`FilterStage::applies`]).
    pub fn canonical() -> Self {
        Self::new()
            .add_stage(BudgetFilter)
            .add_stage(DurationFilter)
            .add_stage(CategoryFilter)
            .add_stage(RatingFilter)
            .add_stage(AvailabilityFilter::deterministic())
    }

    /// Add a stage to the chain (builder pattern).
    pub fn add_stage(mut self, stage: impl FilterStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Apply all applicable stages in sequence.
    ///
    /// Each applied stage's name is appended to the context's
    /// `applied_filters` audit trail; skipped stages leave no trace.
    pub fn apply(&self, context: FilterContext) -> Result<FilterContext> {
        let mut current = context;
        for stage in &self.stages {
            if !stage.applies(&current.preferences) {
                debug!("Skipping stage: {} (preference absent)", stage.name());
                continue;
            }
            let name = stage.name().to_string();
            debug!(
                "Applying stage: {} (input counts: {:?})",
                name,
                current.pools.counts()
            );
            current = stage.handle(current)?;
            debug!(
                "Stage applied: {} (output counts: {:?})",
                name,
                current.pools.counts()
            );
            current.applied_filters.push(name);
        }
        Ok(current)
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}
