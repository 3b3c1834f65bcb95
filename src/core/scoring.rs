use crate::core::filters::{
    matches_facilities, matches_learning_environment, offers_boarding, offers_day, BoardingRequest,
};
use crate::core::synonyms::{CURRICULUM_SYNONYMS, PHASE_SYNONYMS};
use crate::models::{SchoolRecord, SearchPreferences};

/// Outcome of scoring one school
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub matched: u32,
    pub denominator: u32,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Calculate a match score (0-100) and the reasons behind it.
///
/// Every populated preference is one signal group, weighted equally:
///
/// ```text
/// score = matched_groups / populated_groups * 100
/// ```
///
/// Requesting both Day and Boarding makes two groups, one per side. A
/// boarding request with no recognised value is one group that never hits.
/// With nothing requested every school scores 100.
///
/// Reasons are appended in field order: environment, phase, boarding/day,
/// curriculum, facilities.
pub fn calculate_match_score(school: &SchoolRecord, preferences: &SearchPreferences) -> ScoreBreakdown {
    let mut matched = 0u32;
    let mut denominator = 0u32;
    let mut reasons = Vec::new();

    if let Some(environment) = preferences.environment() {
        denominator += 1;
        if matches_learning_environment(school, environment) {
            matched += 1;
            let label = school.learning_environment.clone().unwrap_or_else(|| environment.to_string());
            reasons.push(label);
        }
    }

    if !preferences.phase.is_empty() {
        denominator += 1;
        let hits = PHASE_SYNONYMS.matched_tokens(&preferences.phase, &school.phase);
        if !hits.is_empty() {
            matched += 1;
            reasons.push(hits.join(", "));
        }
    }

    let boarding = BoardingRequest::from_tokens(&preferences.boarding_type);
    denominator += boarding.signal_weight();
    if boarding.wants_day() && offers_day(school) {
        matched += 1;
        reasons.push("Day".to_string());
    }
    if boarding.wants_boarding() && offers_boarding(school) {
        matched += 1;
        reasons.push("Boarding".to_string());
    }

    if !preferences.curriculum.is_empty() {
        denominator += 1;
        let hits = CURRICULUM_SYNONYMS.matched_tokens(&preferences.curriculum, &school.curricula);
        if !hits.is_empty() {
            matched += 1;
            reasons.push(hits.join(", "));
        }
    }

    let facilities = preferences.known_facilities();
    if !facilities.is_empty() {
        denominator += 1;
        if matches_facilities(school, &facilities) {
            matched += 1;
            reasons.push(format!("Facilities: {}", facilities.join(", ")));
        }
    }

    let score = if denominator == 0 {
        100.0
    } else {
        matched as f64 / denominator as f64 * 100.0
    };

    ScoreBreakdown {
        matched,
        denominator,
        score,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn create_test_school() -> SchoolRecord {
        let mut facilities = BTreeMap::new();
        facilities.insert("swimmingPool".to_string(), true);
        facilities.insert("library".to_string(), true);
        facilities.insert("boarding".to_string(), true);

        SchoolRecord {
            id: "school_1".to_string(),
            name: "Test School".to_string(),
            slug: "test-school-harare".to_string(),
            city: "Harare".to_string(),
            phase: vec!["Primary School".to_string(), "High School".to_string()],
            boarding_type: vec!["Day".to_string(), "Boarding".to_string()],
            curricula: vec!["caie".to_string()],
            learning_environment: Some("Enhanced".to_string()),
            facilities,
            tier: None,
            website: None,
            facebook_url: None,
            logo: None,
            hero_image: None,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_no_preferences_scores_full() {
        let result = calculate_match_score(&create_test_school(), &SearchPreferences::default());
        assert_eq!(result.denominator, 0);
        assert_eq!(result.score, 100.0);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_all_groups_matched() {
        let prefs = SearchPreferences {
            learning_environment: Some("enhanced".to_string()),
            phase: strings(&["High School"]),
            boarding_type: strings(&["Day", "Boarding"]),
            curriculum: strings(&["Cambridge"]),
            facilities: strings(&["swimmingPool", "library"]),
            ..Default::default()
        };

        let result = calculate_match_score(&create_test_school(), &prefs);
        assert_eq!(result.denominator, 6);
        assert_eq!(result.matched, 6);
        assert_eq!(result.score, 100.0);
        assert_eq!(
            result.reasons,
            vec![
                "Enhanced",
                "High School",
                "Day",
                "Boarding",
                "Cambridge",
                "Facilities: swimmingPool, library",
            ]
        );
    }

    #[test]
    fn test_partial_match_ratio() {
        let prefs = SearchPreferences {
            curriculum: strings(&["ZIMSEC"]),
            phase: strings(&["Primary School"]),
            ..Default::default()
        };

        let result = calculate_match_score(&create_test_school(), &prefs);
        assert_eq!(result.denominator, 2);
        assert_eq!(result.matched, 1);
        assert_eq!(result.score, 50.0);
        assert_eq!(result.reasons, vec!["Primary School"]);
    }

    #[test]
    fn test_facility_subset_does_not_count() {
        let mut school = create_test_school();
        school.facilities.insert("library".to_string(), false);

        let prefs = SearchPreferences {
            facilities: strings(&["swimmingPool", "library"]),
            ..Default::default()
        };

        let result = calculate_match_score(&school, &prefs);
        assert_eq!(result.matched, 0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_both_boarding_sides_count_separately() {
        let mut school = create_test_school();
        school.boarding_type = vec!["Boarding".to_string()];

        let prefs = SearchPreferences {
            boarding_type: strings(&["Day", "Boarding"]),
            ..Default::default()
        };

        let result = calculate_match_score(&school, &prefs);
        assert_eq!(result.denominator, 2);
        assert_eq!(result.matched, 1);
        assert_eq!(result.score, 50.0);
        assert_eq!(result.reasons, vec!["Boarding"]);
    }

    #[test]
    fn test_boarding_school_request_misses_day_only_school() {
        let mut school = create_test_school();
        school.boarding_type = vec!["Day".to_string()];
        school.facilities.insert("boarding".to_string(), false);

        let prefs = SearchPreferences {
            boarding_type: strings(&["Boarding School"]),
            ..Default::default()
        };

        let result = calculate_match_score(&school, &prefs);
        assert_eq!(result.denominator, 1);
        assert_eq!(result.matched, 0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_unrecognised_boarding_request_scores_as_miss() {
        let prefs = SearchPreferences {
            boarding_type: strings(&["Weekends"]),
            ..Default::default()
        };

        let result = calculate_match_score(&create_test_school(), &prefs);
        assert_eq!(result.denominator, 1);
        assert_eq!(result.matched, 0);
        assert_eq!(result.score, 0.0);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_unknown_facilities_do_not_enter_denominator() {
        let prefs = SearchPreferences {
            facilities: strings(&["helipad"]),
            ..Default::default()
        };
        let result = calculate_match_score(&create_test_school(), &prefs);
        assert_eq!(result.denominator, 0);
        assert_eq!(result.score, 100.0);
    }
}
