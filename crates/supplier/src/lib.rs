//! # Supplier Crate
//!
//! This crate defines the candidate-supply boundary of the recommender:
//! a query type, the `CandidateSupplier` trait, and an in-memory
//! `Catalog`-backed implementation.
//!
//! The pipeline never reaches for a supplier through a global; the
//! orchestrator receives one at construction time, so tests inject mock
//! suppliers the same way production injects the catalog-backed one.
//!
//! ## Example Usage
//!
//! ```ignore
//! use supplier::{Catalog, CatalogSupplier, CandidateQuery, CandidateSupplier};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_file("catalog.json")?);
//! let supplier = CatalogSupplier::new(catalog);
//!
//! let query = CandidateQuery::for_destination(Some("Lisbon".into()), None);
//! let locations = supplier.fetch_locations(&query.with_limit(100))?;
//! ```

pub mod catalog;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogSupplier};

use anyhow::Result;
use travel_data::{Location, Lodging, Transport};

/// Geographic/filter query for one candidate pool fetch.
///
/// Pagination is an upstream concern: the orchestrator asks for large,
/// fixed page sizes rather than paging internally.
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    /// Destination city, matched case-insensitively by substring
    pub destination: Option<String>,
    /// Region, matched the same way
    pub region: Option<String>,
    /// Drop records strictly below this rating at the source
    pub min_rating: Option<f32>,
    pub page: u32,
    pub limit: usize,
}

impl CandidateQuery {
    pub fn for_destination(destination: Option<String>, region: Option<String>) -> Self {
        Self {
            destination,
            region,
            min_rating: None,
            page: 0,
            limit: 100,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Source of the three independent candidate pools.
///
/// Implementations make no ordering or scoring guarantee; narrowing and
/// ranking belong to the filter chain and the scoring strategies.
pub trait CandidateSupplier: Send + Sync {
    fn fetch_locations(&self, query: &CandidateQuery) -> Result<Vec<Location>>;

    fn fetch_lodgings(&self, query: &CandidateQuery) -> Result<Vec<Lodging>>;

    fn fetch_transports(&self, query: &CandidateQuery) -> Result<Vec<Transport>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_catalog_supplier_creation() {
        let catalog = Arc::new(Catalog::sample());
        let supplier = CatalogSupplier::new(catalog);
        let query = CandidateQuery::for_destination(None, None);
        let locations = supplier.fetch_locations(&query).unwrap();
        assert!(!locations.is_empty());
    }

    #[test]
    fn test_query_limit_is_honored() {
        let supplier = CatalogSupplier::new(Arc::new(Catalog::sample()));
        let query = CandidateQuery::for_destination(None, None).with_limit(2);
        assert_eq!(supplier.fetch_locations(&query).unwrap().len(), 2);
        assert_eq!(supplier.fetch_lodgings(&query).unwrap().len(), 2);
        assert_eq!(supplier.fetch_transports(&query).unwrap().len(), 2);
    }
}
