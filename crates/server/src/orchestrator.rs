//! Coordinates the whole recommendation flow:
//! 1. Normalize traveler preferences
//! 2. Fetch the three candidate pools in parallel, under a timeout
//! 3. Run the canonical filter chain
//! 4. Select candidates with the requested strategy
//! 5. Assemble the itinerary and apply enhancement layers
//! 6. Return the recommendation, or a typed failure
//!
//! Every failure mode maps to one `RecommendError` variant; the
//! response envelope is the only serialization of that taxonomy.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use itinerary::{EnhancedItinerary, ItineraryAssembler, ItineraryDraft};
use pipeline::{
    CandidatePools, FilterChain, FilterContext, RecommendationSet, select_recommendations,
};
use supplier::{CandidateQuery, CandidateSupplier};
use travel_data::{
    EnhancementKind, Location, Lodging, Preferences, RecommendError, Result, Transport,
};

const LOCATION_FETCH_LIMIT: usize = 100;
const LODGING_FETCH_LIMIT: usize = 50;
const TRANSPORT_FETCH_LIMIT: usize = 30;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Condensed view of a recommendation for list displays and logs.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_destinations: usize,
    pub total_cost: f64,
    pub description: String,
    pub features: Vec<String>,
    pub filters_applied: Vec<String>,
    pub strategy_used: String,
    pub enhancements: Vec<EnhancementKind>,
}

/// A successful recommendation: the full itinerary plus its summary.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub itinerary: EnhancedItinerary,
    pub summary: Summary,
}

/// Wire-level response shape for both outcomes.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<EnhancedItinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ResponseEnvelope {
    pub fn from_result(result: Result<Recommendation>) -> Self {
        match result {
            Ok(recommendation) => Self {
                success: true,
                itinerary: Some(recommendation.itinerary),
                summary: Some(recommendation.summary),
                error: None,
                code: None,
            },
            Err(error) => Self {
                success: false,
                itinerary: None,
                summary: None,
                error: Some(error.to_string()),
                code: Some(error.code().to_string()),
            },
        }
    }
}

/// Record of one saved itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct PersistedItinerary {
    pub id: String,
    pub saved_at: DateTime<Utc>,
}

/// Storage boundary for itineraries the caller wants to keep.
pub trait ItinerarySink: Send + Sync {
    /// Persist the itinerary and return its storage identifier.
    fn save(&self, itinerary: &EnhancedItinerary) -> anyhow::Result<String>;
}

/// Main orchestrator wiring the supplier, pipeline, and assembler.
pub struct RecommendationOrchestrator {
    supplier: Arc<dyn CandidateSupplier>,
    fetch_timeout: Duration,
    sink: Option<Arc<dyn ItinerarySink>>,
}

impl RecommendationOrchestrator {
    pub fn new(supplier: Arc<dyn CandidateSupplier>) -> Self {
        Self {
            supplier,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            sink: None,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ItinerarySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Main entry point: produce one recommendation for the caller.
    pub async fn recommend(&self, preferences: &Preferences) -> Result<Recommendation> {
        let started = Instant::now();
        let prefs = preferences.normalized()?;
        info!(
            budget = prefs.budget,
            duration = prefs.duration,
            goal = %prefs.optimization_goal,
            "recommendation requested"
        );

        let pools = self.fetch_pools(&prefs).await?;
        if pools.is_empty() {
            return Err(RecommendError::NoCandidates);
        }
        let (locations, lodgings, transports) = pools.counts();
        info!(locations, lodgings, transports, "candidate pools fetched");

        let context = FilterChain::canonical()
            .apply(FilterContext::new(prefs.clone(), pools))
            .map_err(|error| {
                warn!(%error, "filter chain failed");
                RecommendError::UpstreamFailure(error.to_string())
            })?;
        if context.pools.locations.is_empty() {
            return Err(RecommendError::NoMatchingCandidates);
        }

        let set = select_recommendations(prefs.optimization_goal, &context);
        if set.locations.is_empty() {
            return Err(RecommendError::NoDestinations);
        }

        let draft = Self::assemble(&prefs, &set)?;
        let itinerary = EnhancedItinerary::apply_stack(draft, &prefs.enhancements);
        let summary = Self::summarize(&itinerary, &context, &set);
        info!(
            destinations = summary.total_destinations,
            cost = summary.total_cost,
            elapsed = ?started.elapsed(),
            "recommendation complete"
        );
        Ok(Recommendation { itinerary, summary })
    }

    /// Recommend, then persist through the configured sink.
    pub async fn recommend_and_save(
        &self,
        preferences: &Preferences,
    ) -> Result<(Recommendation, Option<PersistedItinerary>)> {
        let recommendation = self.recommend(preferences).await?;
        let persisted = match &self.sink {
            Some(sink) => {
                let id = sink.save(&recommendation.itinerary).map_err(|error| {
                    warn!(%error, "itinerary persistence failed");
                    RecommendError::UpstreamFailure(error.to_string())
                })?;
                info!(%id, "itinerary persisted");
                Some(PersistedItinerary {
                    id,
                    saved_at: Utc::now(),
                })
            }
            None => None,
        };
        Ok((recommendation, persisted))
    }

    /// Fetch all three pools in parallel, bounded by the fetch timeout.
    async fn fetch_pools(&self, prefs: &Preferences) -> Result<CandidatePools> {
        let base = CandidateQuery::for_destination(prefs.destination.clone(), prefs.region.clone());

        let fetches = async {
            tokio::join!(
                tokio::task::spawn_blocking({
                    let supplier = Arc::clone(&self.supplier);
                    let query = base.clone().with_limit(LOCATION_FETCH_LIMIT);
                    move || supplier.fetch_locations(&query)
                }),
                tokio::task::spawn_blocking({
                    let supplier = Arc::clone(&self.supplier);
                    let query = base.clone().with_limit(LODGING_FETCH_LIMIT);
                    move || supplier.fetch_lodgings(&query)
                }),
                tokio::task::spawn_blocking({
                    let supplier = Arc::clone(&self.supplier);
                    let query = base.clone().with_limit(TRANSPORT_FETCH_LIMIT);
                    move || supplier.fetch_transports(&query)
                }),
            )
        };

        match tokio::time::timeout(self.fetch_timeout, fetches).await {
            Ok((locations, lodgings, transports)) => Ok(CandidatePools::from_records(
                Self::unwrap_fetch(locations)?,
                Self::unwrap_fetch(lodgings)?,
                Self::unwrap_fetch(transports)?,
            )),
            Err(_) => {
                warn!(timeout = ?self.fetch_timeout, "candidate fetch timed out");
                Err(RecommendError::NoCandidates)
            }
        }
    }

    fn unwrap_fetch<T>(
        joined: std::result::Result<anyhow::Result<Vec<T>>, tokio::task::JoinError>,
    ) -> Result<Vec<T>> {
        match joined {
            Ok(Ok(records)) => Ok(records),
            Ok(Err(error)) => {
                warn!(%error, "supplier fetch failed");
                Err(RecommendError::UpstreamFailure(error.to_string()))
            }
            Err(error) => Err(RecommendError::UpstreamFailure(format!(
                "fetch task panicked: {error}"
            ))),
        }
    }

    /// Build the itinerary draft from the selected candidates.
    ///
    /// All selected lodgings are booked sequentially; only the top
    /// transport option is placed on the itinerary, the rest stay
    /// alternatives in the recommendation set.
    fn assemble(prefs: &Preferences, set: &RecommendationSet) -> Result<ItineraryDraft> {
        let place = prefs
            .destination
            .clone()
            .unwrap_or_else(|| set.locations[0].item.city.clone());
        let traveler = prefs.traveler.clone().unwrap_or_else(|| "guest".to_string());

        let locations: Vec<Location> = set.locations.iter().map(|s| s.item.clone()).collect();
        let lodgings: Vec<Lodging> = set.lodgings.iter().map(|s| s.item.clone()).collect();
        let transports: Vec<Transport> =
            set.transports.iter().take(1).map(|s| s.item.clone()).collect();

        let mut assembler = ItineraryAssembler::new();
        assembler
            .title(format!("{place} Trip"))
            .traveler(traveler)
            .dates(prefs.start(), prefs.end())
            .budget(prefs.budget)
            .interests(&prefs.interests)
            .strategy(set.strategy.clone())
            .add_destinations(&locations)
            .add_accommodations(&lodgings)
            .add_transport(&transports);
        assembler
            .build()
            .map_err(|error| RecommendError::ValidationFailure(error.to_string()))
    }

    fn summarize(
        itinerary: &EnhancedItinerary,
        context: &FilterContext,
        set: &RecommendationSet,
    ) -> Summary {
        Summary {
            total_destinations: itinerary.data.destinations.len(),
            total_cost: itinerary.cost,
            description: itinerary.description.clone(),
            features: itinerary.features.clone(),
            filters_applied: context.applied_filters.clone(),
            strategy_used: set.strategy.clone(),
            enhancements: itinerary.applied.clone(),
        }
    }
}
