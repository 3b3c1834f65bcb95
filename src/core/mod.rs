// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod pinning;
pub mod scoring;
pub mod synonyms;

pub use filters::{city_like_pattern, BoardingRequest, SchoolFilter};
pub use matcher::{Matcher, Recommendations, DEFAULT_CANDIDATE_LIMIT};
pub use pinning::PinPolicy;
pub use scoring::{calculate_match_score, ScoreBreakdown};
pub use synonyms::{SynonymTable, CURRICULUM_SYNONYMS, PHASE_SYNONYMS};
