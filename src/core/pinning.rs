use crate::core::filters::SchoolFilter;
use crate::models::{normalize_name, SchoolRecord, SearchPreferences};

/// Identifies the promoted school that is always surfaced in results.
///
/// Candidates are compared against a school's lowercase name, its slug and
/// its normalized name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinPolicy {
    candidates: Vec<String>,
}

impl PinPolicy {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = candidates
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Self { candidates }
    }

    /// Policy that never pins
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_pinned(&self, school: &SchoolRecord) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let name = school.name.trim().to_lowercase();
        let slug = school.slug.trim().to_lowercase();
        let normalized = school.normalized_name();

        self.candidates.iter().any(|candidate| {
            *candidate == name
                || *candidate == slug
                || *candidate == normalized
                || normalize_name(candidate) == normalized
        })
    }

    /// Find the promoted school in the catalog, ignoring every preference
    /// except the city.
    pub fn lookup<'a>(&self, preferences: &SearchPreferences, catalog: &'a [SchoolRecord]) -> Option<&'a SchoolRecord> {
        if !self.is_enabled() {
            return None;
        }

        let filter = SchoolFilter::city_only(preferences);
        catalog
            .iter()
            .find(|school| filter.matches(school) && self.is_pinned(school))
    }
}
