use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, PinnedSchoolSummary};

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub recommendations: Vec<MatchResult>,
    #[serde(rename = "pinnedSchool", skip_serializing_if = "Option::is_none", default)]
    pub pinned_school: Option<PinnedSchoolSummary>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Cache invalidation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateCacheResponse {
    pub success: bool,
    pub invalidated: usize,
}
