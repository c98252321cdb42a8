//! Core trait for the filtering chain.
//!
//! This module defines the FilterStage trait that allows composable,
//! independent narrowing passes to be folded over a FilterContext.

use crate::context::FilterContext;
use anyhow::Result;
use travel_data::Preferences;

/// One independent narrowing/re-scoring pass over the candidate pools.
///
/// ## Design Note
/// - `Send + Sync` allows stages to be shared across request tasks
/// - Stages take ownership of the context and return a derived one, so
///   no stage ever observes another's partial mutation
/// - A stage must never fail on missing optional record fields; it
///   degrades to best-effort instead of emptying the pool
pub trait FilterStage: Send + Sync {
    /// Returns the name of this stage (for logging and the audit trail)
    fn name(&self) -> &str;

    /// Whether the stage's driving preference is present.
    ///
    /// The chain skips stages whose preference is absent rather than
    /// running them as no-ops.
    fn applies(&self, preferences: &Preferences) -> bool {
        let _ = preferences;
        true
    }

    /// Apply this stage, returning the narrowed and re-scored context.
    fn handle(&self, context: FilterContext) -> Result<FilterContext>;
}
