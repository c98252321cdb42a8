//! In-memory candidate catalog and the supplier backed by it.
//!
//! The catalog is a snapshot of raw candidate records, loadable from a
//! JSON file. `CatalogSupplier` answers pool queries with parallel scans
//! over the snapshot; it narrows by geography only, leaving preference
//! filtering to the pipeline.

use crate::{CandidateQuery, CandidateSupplier};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};
use travel_data::{Location, Lodging, Transport};

/// Snapshot of the three raw candidate pools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub lodgings: Vec<Lodging>,
    #[serde(default)]
    pub transports: Vec<Transport>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open catalog file {}", path.display()))?;
        let catalog: Catalog = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse catalog file {}", path.display()))?;
        debug!(
            "Loaded catalog: {} locations, {} lodgings, {} transports",
            catalog.locations.len(),
            catalog.lodgings.len(),
            catalog.transports.len()
        );
        Ok(catalog)
    }

    /// Deterministic sample catalog for tests and the CLI's sample mode.
    ///
    /// Seeded generation: the same catalog comes back on every call, so
    /// pipeline runs over it are reproducible end to end.
    pub fn sample() -> Self {
        let mut rng = StdRng::seed_from_u64(7);

        let cities = ["Lisbon", "Porto", "Sintra"];
        let categories: [&[&str]; 6] = [
            &["museum", "history"],
            &["hiking", "outdoor"],
            &["beach", "coast"],
            &["food", "market"],
            &["art", "heritage"],
            &["park", "scenic"],
        ];

        let locations = (0..30)
            .map(|i| {
                let city = cities[i % cities.len()];
                let tags = categories[i % categories.len()];
                let free = i % 5 == 0;
                Location {
                    id: format!("loc-{:03}", i + 1),
                    name: format!("{} {} #{}", city, tags[0], i + 1),
                    city: city.to_string(),
                    region: "Portugal".to_string(),
                    categories: tags.iter().map(|t| t.to_string()).collect(),
                    rating: Some(3.0 + rng.random_range(0.0..2.0_f32)),
                    review_count: rng.random_range(10..900),
                    entry_fee: if free {
                        0.0
                    } else {
                        f64::from(rng.random_range(5..40))
                    },
                    description: format!("A {} spot in {}", tags[0], city),
                }
            })
            .collect();

        let lodging_kinds = ["hotel", "guesthouse", "hostel"];
        let lodgings = (0..15)
            .map(|i| {
                let city = cities[i % cities.len()];
                let kind = lodging_kinds[i % lodging_kinds.len()];
                Lodging {
                    id: format!("ldg-{:03}", i + 1),
                    name: format!("{} {} #{}", city, kind, i + 1),
                    city: city.to_string(),
                    kind: kind.to_string(),
                    price_per_night: f64::from(rng.random_range(35..180)),
                    currency: "USD".to_string(),
                    pricing_unit: "per_night".to_string(),
                    rating: Some(3.2 + rng.random_range(0.0..1.8_f32)),
                    review_count: rng.random_range(20..600),
                    amenities: vec!["wifi".to_string(), "breakfast".to_string()],
                    stars: Some(rng.random_range(2..=5)),
                }
            })
            .collect();

        let modes = ["train", "bus", "tram"];
        let durations = ["45 min", "1h 30m", "2 hours", "3h"];
        let transports = (0..12)
            .map(|i| {
                let origin = cities[i % cities.len()];
                let destination = cities[(i + 1) % cities.len()];
                Transport {
                    id: format!("tr-{:03}", i + 1),
                    mode: modes[i % modes.len()].to_string(),
                    operator: "CP".to_string(),
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                    price: f64::from(rng.random_range(8..90)),
                    currency: "USD".to_string(),
                    pricing_unit: "per_trip".to_string(),
                    duration: durations[i % durations.len()].to_string(),
                    class: if i % 4 == 0 {
                        Some("first".to_string())
                    } else {
                        None
                    },
                    rating: Some(3.4 + rng.random_range(0.0..1.6_f32)),
                    review_count: rng.random_range(5..300),
                }
            })
            .collect();

        Catalog {
            locations,
            lodgings,
            transports,
        }
    }
}

/// Candidate supplier backed by an in-memory catalog snapshot.
#[derive(Clone)]
pub struct CatalogSupplier {
    catalog: Arc<Catalog>,
}

impl CatalogSupplier {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

/// Case-insensitive substring match in either direction.
fn term_matches(term: &str, field: &str) -> bool {
    let term = term.to_lowercase();
    let field = field.to_lowercase();
    field.contains(&term) || term.contains(&field)
}

fn geo_matches(query: &CandidateQuery, fields: &[&str]) -> bool {
    let destination_ok = query
        .destination
        .as_deref()
        .map(|term| fields.iter().any(|f| term_matches(term, f)))
        .unwrap_or(true);
    let region_ok = query
        .region
        .as_deref()
        .map(|term| fields.iter().any(|f| term_matches(term, f)))
        .unwrap_or(true);
    destination_ok && region_ok
}

fn rating_matches(query: &CandidateQuery, rating: Option<f32>) -> bool {
    match query.min_rating {
        Some(min) => rating.map(|r| r >= min).unwrap_or(false),
        None => true,
    }
}

fn paginate<T>(mut records: Vec<T>, query: &CandidateQuery) -> Vec<T> {
    let skip = query.page as usize * query.limit;
    if skip >= records.len() {
        return Vec::new();
    }
    records.drain(..skip);
    records.truncate(query.limit);
    records
}

impl CandidateSupplier for CatalogSupplier {
    #[instrument(skip(self, query))]
    fn fetch_locations(&self, query: &CandidateQuery) -> Result<Vec<Location>> {
        let matched: Vec<Location> = self
            .catalog
            .locations
            .par_iter()
            .filter(|l| geo_matches(query, &[&l.city, &l.region]))
            .filter(|l| rating_matches(query, l.rating))
            .cloned()
            .collect();
        let page = paginate(matched, query);
        debug!("Fetched {} locations", page.len());
        Ok(page)
    }

    #[instrument(skip(self, query))]
    fn fetch_lodgings(&self, query: &CandidateQuery) -> Result<Vec<Lodging>> {
        let matched: Vec<Lodging> = self
            .catalog
            .lodgings
            .par_iter()
            .filter(|l| geo_matches(query, &[&l.city]))
            .filter(|l| rating_matches(query, l.rating))
            .cloned()
            .collect();
        let page = paginate(matched, query);
        debug!("Fetched {} lodgings", page.len());
        Ok(page)
    }

    #[instrument(skip(self, query))]
    fn fetch_transports(&self, query: &CandidateQuery) -> Result<Vec<Transport>> {
        let matched: Vec<Transport> = self
            .catalog
            .transports
            .par_iter()
            .filter(|t| geo_matches(query, &[&t.origin, &t.destination]))
            .filter(|t| rating_matches(query, t.rating))
            .cloned()
            .collect();
        let page = paginate(matched, query);
        debug!("Fetched {} transports", page.len());
        Ok(page)
    }
}
