//! Filter that scores locations by interest relevance.
//!
//! An interest matches a location category directly, by substring, or
//! through a fixed synonym table. The table is intentionally partial:
//! unknown interests simply fail to match and the uniform-relevance
//! fallback keeps the pool non-empty.

use crate::context::FilterContext;
use crate::traits::FilterStage;
use anyhow::Result;
use tracing::debug;
use travel_data::Preferences;

/// Relevance assigned to every location when nothing matched at all.
const FALLBACK_RELEVANCE: f32 = 0.1;

/// Fixed, partial synonym table; matched in both directions.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("adventure", &["hiking", "outdoor", "climbing", "rafting", "trekking"]),
    ("cultural", &["museum", "history", "heritage", "art", "temple"]),
    ("food", &["culinary", "dining", "market", "wine"]),
    ("nature", &["park", "wildlife", "garden", "scenic"]),
    ("beach", &["coast", "island", "seaside"]),
    ("nightlife", &["entertainment", "music", "bar"]),
    ("relaxation", &["spa", "wellness", "resort"]),
];

fn terms_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn synonym_match(a: &str, b: &str) -> bool {
    SYNONYMS.iter().any(|(key, synonyms)| {
        (terms_equal(key, a) && synonyms.iter().any(|s| terms_equal(s, b)))
            || (terms_equal(key, b) && synonyms.iter().any(|s| terms_equal(s, a)))
    })
}

/// Direct, substring, or synonym match between an interest and a category.
fn interest_matches(interest: &str, category: &str) -> bool {
    let interest_lower = interest.to_lowercase();
    let category_lower = category.to_lowercase();
    interest_lower == category_lower
        || interest_lower.contains(&category_lower)
        || category_lower.contains(&interest_lower)
        || synonym_match(interest, category)
}

/// Retains interest-matching locations with a relevance score.
///
/// ## Algorithm
/// 1. For each location, count interests matching any of its categories
/// 2. relevance = matching interests / total interests
/// 3. Keep locations with relevance > 0, sorted by relevance descending
/// 4. If nothing matched, keep all locations at a uniform low relevance;
///    filtering must never eliminate every option
pub struct CategoryFilter;

impl FilterStage for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn applies(&self, preferences: &Preferences) -> bool {
        !preferences.interests.is_empty()
    }

    fn handle(&self, mut context: FilterContext) -> Result<FilterContext> {
        let interests = &context.preferences.interests;
        let total = interests.len() as f32;

        let mut any_matched = false;
        for scored in &mut context.pools.locations {
            let matched = interests
                .iter()
                .filter(|interest| {
                    scored
                        .item
                        .categories
                        .iter()
                        .any(|category| interest_matches(interest, category))
                })
                .count();
            scored.score = matched as f32 / total;
            any_matched |= matched > 0;
        }

        if any_matched {
            context.pools.locations.retain(|s| s.score > 0.0);
            context
                .pools
                .locations
                .sort_by(|a, b| b.score.total_cmp(&a.score));
        } else {
            debug!("No interest matched any location; keeping all with fallback relevance");
            for scored in &mut context.pools.locations {
                scored.score = FALLBACK_RELEVANCE;
            }
        }

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CandidatePools;
    use travel_data::{Location, OptimizationGoal, Preferences};

    fn location(id: &str, categories: &[&str]) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_string(),
            city: "Sintra".to_string(),
            region: "Portugal".to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            rating: Some(4.0),
            review_count: 5,
            entry_fee: 0.0,
            description: String::new(),
        }
    }

    fn run(interests: &[&str], locations: Vec<Location>) -> FilterContext {
        let mut prefs = Preferences::new(1000.0, 3, OptimizationGoal::Activity);
        prefs.interests = interests.iter().map(|i| i.to_string()).collect();
        let prefs = prefs.normalized().unwrap();
        let pools = CandidatePools::from_records(locations, vec![], vec![]);
        CategoryFilter
            .handle(FilterContext::new(prefs, pools))
            .unwrap()
    }

    #[test]
    fn test_synonym_table_matches_both_directions() {
        assert!(interest_matches("adventure", "hiking"));
        assert!(interest_matches("hiking", "adventure"));
        assert!(interest_matches("cultural", "museum"));
        assert!(!interest_matches("cultural", "rafting"));
    }

    #[test]
    fn test_matching_locations_keep_relevance_order() {
        let out = run(
            &["cultural", "food"],
            vec![
                location("both", &["museum", "market"]),
                location("one", &["museum"]),
                location("none", &["beach"]),
            ],
        );
        let ids: Vec<&str> = out
            .pools
            .locations
            .iter()
            .map(|s| s.item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["both", "one"]);
        assert_eq!(out.pools.locations[0].score, 1.0);
        assert_eq!(out.pools.locations[1].score, 0.5);
    }

    #[test]
    fn test_fallback_never_empties_a_non_empty_pool() {
        let out = run(
            &["stargazing"],
            vec![location("a", &["museum"]), location("b", &["beach"])],
        );
        assert_eq!(out.pools.locations.len(), 2);
        assert!(out.pools.locations.iter().all(|s| s.score == 0.1));
    }

    #[test]
    fn test_unknown_interest_falls_through_synonyms() {
        // Not in the table: no synonym expansion, only direct/substring
        assert!(!interest_matches("stargazing", "observatory"));
    }
}
