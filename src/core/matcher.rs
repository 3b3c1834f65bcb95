use std::collections::HashSet;

use crate::core::{filters::SchoolFilter, pinning::PinPolicy, scoring::calculate_match_score};
use crate::models::{compare_names, MatchResult, PinnedSchoolSummary, SchoolRecord, SearchPreferences};

/// Number of filtered candidates kept before scoring
pub const DEFAULT_CANDIDATE_LIMIT: usize = 100;

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub recommendations: Vec<MatchResult>,
    pub pinned_school: Option<PinnedSchoolSummary>,
    pub total_candidates: usize,
    pub filtered_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Preference filter over the catalog
/// 2. Catalog ordering (tier, name) and pre-scoring cap
/// 3. Scoring and pin marking
/// 4. Pinned-school fallback lookup
/// 5. De-duplication, ranking and truncation
///
/// The matcher holds configuration only; every call is independent.
#[derive(Debug, Clone)]
pub struct Matcher {
    pin_policy: PinPolicy,
    candidate_limit: usize,
}

impl Matcher {
    pub fn new(pin_policy: PinPolicy, candidate_limit: usize) -> Self {
        Self {
            pin_policy,
            candidate_limit: candidate_limit.max(1),
        }
    }

    pub fn without_pinning() -> Self {
        Self::new(PinPolicy::disabled(), DEFAULT_CANDIDATE_LIMIT)
    }

    /// Recommend schools for the given preferences
    ///
    /// # Arguments
    /// * `preferences` - Normalized search preferences
    /// * `catalog` - Schools to choose from; full or already narrowed to the city
    /// * `limit` - Maximum number of recommendations to return, at least 1
    ///
    /// # Returns
    /// Recommendations sorted pinned first, then by score, then by name
    pub fn recommend(
        &self,
        preferences: &SearchPreferences,
        catalog: &[SchoolRecord],
        limit: usize,
    ) -> Recommendations {
        let total_candidates = catalog.len();
        let filter = SchoolFilter::from_preferences(preferences);

        // Stage 1: preference filter
        let mut candidates: Vec<&SchoolRecord> = catalog.iter().filter(|school| filter.matches(school)).collect();
        let filtered_candidates = candidates.len();

        // Stage 2: catalog order and cap
        candidates.sort_by(|a, b| a.catalog_order(b));
        candidates.truncate(self.candidate_limit);

        // Stage 3: score
        let mut results: Vec<MatchResult> = candidates
            .into_iter()
            .map(|school| self.score(school, preferences))
            .collect();

        // Stage 4: pinned fallback
        if !results.iter().any(|r| r.is_pinned) {
            if let Some(school) = self.pin_policy.lookup(preferences, catalog) {
                tracing::debug!("Pinned school {} added outside the filter", school.slug);
                results.insert(0, self.score(school, preferences));
            }
        }

        // Stage 5: dedupe, rank, truncate
        let mut seen = HashSet::new();
        results.retain(|r| seen.insert(r.id.clone()));

        results.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| {
                    b.match_score
                        .partial_cmp(&a.match_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| compare_names(&a.name, &b.name))
        });

        // The pinned school sorts first and must survive truncation
        results.truncate(limit.max(1));

        let pinned_school = results
            .iter()
            .find(|r| r.is_pinned)
            .map(PinnedSchoolSummary::from);

        Recommendations {
            recommendations: results,
            pinned_school,
            total_candidates,
            filtered_candidates,
        }
    }

    fn score(&self, school: &SchoolRecord, preferences: &SearchPreferences) -> MatchResult {
        let breakdown = calculate_match_score(school, preferences);
        MatchResult::from_school(
            school,
            breakdown.score,
            breakdown.reasons,
            self.pin_policy.is_pinned(school),
        )
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::without_pinning()
    }
}
