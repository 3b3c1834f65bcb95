use crate::core::synonyms::{
    contains_any, is_boarding_token, is_day_token, SynonymTable, BOARDING_VALUES, CURRICULUM_SYNONYMS,
    DAY_VALUES, PHASE_SYNONYMS,
};
use crate::models::{SchoolRecord, SearchPreferences};

/// Which side(s) of the boarding/day split were requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardingRequest {
    Any,
    DayOnly,
    BoardingOnly,
    Both,
    /// Non-empty request with no recognised day or boarding value
    Unrecognised,
}

impl BoardingRequest {
    pub fn from_tokens(tokens: &[String]) -> Self {
        let day = tokens.iter().any(|t| is_day_token(t));
        let boarding = tokens.iter().any(|t| is_boarding_token(t));
        match (day, boarding) {
            (true, true) => BoardingRequest::Both,
            (true, false) => BoardingRequest::DayOnly,
            (false, true) => BoardingRequest::BoardingOnly,
            (false, false) if tokens.iter().all(|t| t.trim().is_empty()) => BoardingRequest::Any,
            (false, false) => BoardingRequest::Unrecognised,
        }
    }

    pub fn wants_day(self) -> bool {
        matches!(self, BoardingRequest::DayOnly | BoardingRequest::Both)
    }

    pub fn wants_boarding(self) -> bool {
        matches!(self, BoardingRequest::BoardingOnly | BoardingRequest::Both)
    }

    /// Number of scoring signal groups this request contributes
    pub fn signal_weight(self) -> u32 {
        match self {
            BoardingRequest::Any => 0,
            BoardingRequest::DayOnly | BoardingRequest::BoardingOnly | BoardingRequest::Unrecognised => 1,
            BoardingRequest::Both => 2,
        }
    }
}

/// Lowercase and collapse whitespace runs to a single space
#[inline]
pub fn normalize_whitespace(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case-insensitive, whitespace-tolerant substring test on the city
#[inline]
pub fn matches_city(school: &SchoolRecord, city: &str) -> bool {
    let wanted = normalize_whitespace(city);
    wanted.is_empty() || normalize_whitespace(&school.city).contains(&wanted)
}

/// Case-insensitive substring test on the learning environment
#[inline]
pub fn matches_learning_environment(school: &SchoolRecord, environment: &str) -> bool {
    let wanted = environment.trim().to_lowercase();
    school
        .learning_environment
        .as_deref()
        .map(|value| value.to_lowercase().contains(&wanted))
        .unwrap_or(false)
}

#[inline]
fn matches_any_token(table: &SynonymTable, tokens: &[String], stored: &[String]) -> bool {
    tokens.iter().any(|token| table.matches(token, stored))
}

/// OR across requested curricula and their synonyms
#[inline]
pub fn matches_curriculum(school: &SchoolRecord, curricula: &[String]) -> bool {
    matches_any_token(&CURRICULUM_SYNONYMS, curricula, &school.curricula)
}

/// OR across requested phases and their synonyms
#[inline]
pub fn matches_phase(school: &SchoolRecord, phases: &[String]) -> bool {
    matches_any_token(&PHASE_SYNONYMS, phases, &school.phase)
}

/// Boarding hit test. The `boarding` facility flag stands in for schools
/// whose typed field was never filled.
#[inline]
pub fn offers_boarding(school: &SchoolRecord) -> bool {
    contains_any(BOARDING_VALUES, &school.boarding_type) || school.has_facility("boarding")
}

/// Day hit test. No boarding flag counts as day-only.
#[inline]
pub fn offers_day(school: &SchoolRecord) -> bool {
    contains_any(DAY_VALUES, &school.boarding_type) || !school.has_facility("boarding")
}

#[inline]
pub fn matches_boarding(school: &SchoolRecord, request: BoardingRequest) -> bool {
    match request {
        BoardingRequest::Any | BoardingRequest::Both | BoardingRequest::Unrecognised => true,
        BoardingRequest::BoardingOnly => offers_boarding(school),
        BoardingRequest::DayOnly => offers_day(school),
    }
}

/// AND across requested facility keys
#[inline]
pub fn matches_facilities(school: &SchoolRecord, facilities: &[&str]) -> bool {
    facilities.iter().all(|key| school.has_facility(key))
}

/// Declarative predicate over the catalog built from search preferences.
///
/// Every populated field is an independent constraint and all of them must
/// hold. An empty field adds no constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolFilter {
    pub city: Option<String>,
    pub learning_environment: Option<String>,
    pub curriculum: Vec<String>,
    pub phase: Vec<String>,
    pub boarding: BoardingRequest,
    pub facilities: Vec<String>,
}

impl SchoolFilter {
    pub fn from_preferences(preferences: &SearchPreferences) -> Self {
        Self {
            city: Self::city_constraint(preferences),
            learning_environment: preferences.environment().map(str::to_string),
            curriculum: preferences.curriculum.clone(),
            phase: preferences.phase.clone(),
            boarding: BoardingRequest::from_tokens(&preferences.boarding_type),
            facilities: preferences
                .known_facilities()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Filter used for the pinned-school lookup: city only
    pub fn city_only(preferences: &SearchPreferences) -> Self {
        Self {
            city: Self::city_constraint(preferences),
            learning_environment: None,
            curriculum: vec![],
            phase: vec![],
            boarding: BoardingRequest::Any,
            facilities: vec![],
        }
    }

    fn city_constraint(preferences: &SearchPreferences) -> Option<String> {
        Some(preferences.city.trim())
            .filter(|city| !city.is_empty())
            .map(str::to_string)
    }

    /// Check a school against every constraint
    pub fn matches(&self, school: &SchoolRecord) -> bool {
        if let Some(city) = &self.city {
            if !matches_city(school, city) {
                return false;
            }
        }

        if let Some(environment) = &self.learning_environment {
            if !matches_learning_environment(school, environment) {
                return false;
            }
        }

        if !self.curriculum.is_empty() && !matches_curriculum(school, &self.curriculum) {
            return false;
        }

        if !self.phase.is_empty() && !matches_phase(school, &self.phase) {
            return false;
        }

        if !matches_boarding(school, self.boarding) {
            return false;
        }

        let facilities: Vec<&str> = self.facilities.iter().map(String::as_str).collect();
        matches_facilities(school, &facilities)
    }
}

/// SQL `ILIKE` pattern for the city pre-filter. LIKE metacharacters are
/// escaped with `\` and whitespace collapsed to match the normalized column.
pub fn city_like_pattern(city: &str) -> String {
    let mut pattern = String::from("%");
    for c in normalize_whitespace(city).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
