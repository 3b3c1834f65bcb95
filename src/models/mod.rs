// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    compare_names, is_known_facility, normalize_name, slugify, MatchResult, PinnedSchoolSummary,
    SchoolRecord, SearchPreferences, Tier, DEFAULT_CITY, FACILITY_KEYS, REASON_SEPARATOR,
};
pub use requests::{ListField, RecommendRequest};
pub use responses::{ErrorResponse, HealthResponse, InvalidateCacheResponse, RecommendResponse};
