//! School Finder - school matching and recommendation service
//!
//! This library provides the matching engine behind the school finder:
//! a preference filter, an equal-weight scorer and the pinned-school policy,
//! plus the HTTP service that feeds it from the school catalog.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, PinPolicy, Recommendations, SchoolFilter};
pub use crate::models::{MatchResult, PinnedSchoolSummary, RecommendRequest, RecommendResponse, SchoolRecord, SearchPreferences};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = Matcher::default().recommend(&SearchPreferences::default(), &[], 5);
        assert!(result.recommendations.is_empty());
    }
}
